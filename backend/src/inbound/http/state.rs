//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, NotesCommand, NotesQuery, SignupService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub notes: Arc<dyn NotesQuery>,
    pub notes_command: Arc<dyn NotesCommand>,
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
}

impl HttpState {
    /// Bundle the port implementations used by the HTTP handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AccountService, NoteService};
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::{InMemoryNoteRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let notes = Arc::new(NoteService::new(
    ///     Arc::new(InMemoryNoteRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let accounts = Arc::new(AccountService::new(Arc::new(InMemoryUserRepository::new())));
    /// let state = HttpState::new(notes.clone(), notes, accounts.clone(), accounts);
    /// let _ = state;
    /// ```
    pub fn new(
        notes: Arc<dyn NotesQuery>,
        notes_command: Arc<dyn NotesCommand>,
        login: Arc<dyn LoginService>,
        signup: Arc<dyn SignupService>,
    ) -> Self {
        Self {
            notes,
            notes_command,
            login,
            signup,
        }
    }
}
