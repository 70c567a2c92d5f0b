//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod note_repository;
mod notes_command;
mod notes_query;
mod signup_service;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NotePersistenceError, NoteRepository};
#[cfg(test)]
pub use notes_command::MockNotesCommand;
pub use notes_command::{NoteSubmissionOutcome, NotesCommand};
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::{SignupOutcome, SignupService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserPersistenceError, UserRepository};
