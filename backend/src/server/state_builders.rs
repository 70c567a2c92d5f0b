//! Assemble the HTTP handler state from the configured stores.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::{NoteRepository, UserRepository};
use crate::domain::{AccountService, NoteService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryNoteRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DbPool, DieselNoteRepository, DieselUserRepository};

fn state_over<N, U>(notes: N, users: U) -> HttpState
where
    N: NoteRepository + 'static,
    U: UserRepository + 'static,
{
    let notes = Arc::new(NoteService::new(Arc::new(notes), Arc::new(DefaultClock)));
    let accounts = Arc::new(AccountService::new(Arc::new(users)));
    HttpState::new(notes.clone(), notes, accounts.clone(), accounts)
}

/// State backed by fresh, empty in-memory stores.
///
/// # Examples
/// ```
/// use backend::server::in_memory_http_state;
///
/// let _state = in_memory_http_state();
/// ```
pub fn in_memory_http_state() -> HttpState {
    state_over(InMemoryNoteRepository::new(), InMemoryUserRepository::new())
}

/// State backed by PostgreSQL when a pool is configured, memory otherwise.
pub fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL note and account stores");
            state_over(
                DieselNoteRepository::new(pool.clone()),
                DieselUserRepository::new(pool.clone()),
            )
        }
        None => {
            info!("no database configured; using in-memory stores");
            in_memory_http_state()
        }
    }
}
