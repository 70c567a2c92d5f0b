//! Personal notes backend: domain services, HTTP pages, and storage adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use middleware::Trace;
