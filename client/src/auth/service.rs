//! The session state machine.
//!
//! A [`Session`] is the single writer of authentication state. It owns the
//! client storage and the credential directory, and publishes every state
//! change on a `watch` channel so any number of [`SessionWatcher`]s can read
//! the current identity without holding the session itself.
//!
//! States cycle for the life of the process:
//!
//! ```text
//! Unauthenticated --login/register--> Authenticated
//! Authenticated   --logout/expire---> Unauthenticated
//! (start, token stored) Loading --resolve--> Authenticated | Unauthenticated
//! ```
//!
//! Invariants:
//! - `Loading` and `Authenticated` imply a token is in storage.
//! - An identity is only exposed in `Authenticated`.
//! - A failed login or registration leaves state and storage untouched.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};
use trackly_adapters::{ClientStorage, CredentialDirectory};

use super::errors::{AuthError, AuthResult};
use super::models::{AuthTokens, Identity, LoginRequest, RegisterRequest, PROFILE_KEY, TOKEN_KEY};

const EVENT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Loading,
    Authenticated(Identity),
}

impl SessionState {
    /// True whenever a token is held, including while its identity resolves.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, SessionState::Unauthenticated)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated | SessionState::Loading => None,
        }
    }
}

/// Emitted on every session transition, for notice rendering and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Restored(Identity),
    LoggedIn(Identity),
    Registered(Identity),
    LoginFailed { email: String },
    RegistrationFailed { email: String, reason: String },
    LoggedOut,
    Expired,
}

pub struct Session {
    storage: Arc<dyn ClientStorage>,
    directory: Arc<dyn CredentialDirectory>,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Opens a session over `storage`. Starts in `Loading` when a token is
    /// stored, otherwise in `Unauthenticated`. Unreadable storage is
    /// discarded and the session starts signed out.
    pub async fn open(
        storage: Arc<dyn ClientStorage>,
        directory: Arc<dyn CredentialDirectory>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let session = Self {
            storage,
            directory,
            state,
            events,
        };

        match session.storage.get(TOKEN_KEY).await {
            Ok(Some(_)) => session.transition(SessionState::Loading),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "session storage is unreadable, discarding it");
                session.clear_storage().await;
            }
        }
        debug!(
            backend = session.storage.backend_name(),
            state = ?*session.state.borrow(),
            "session opened"
        );
        session
    }

    /// Opens the session and resolves any stored identity.
    pub async fn restore(
        storage: Arc<dyn ClientStorage>,
        directory: Arc<dyn CredentialDirectory>,
    ) -> Self {
        let mut session = Self::open(storage, directory).await;
        session.resolve().await;
        session
    }

    /// Moves `Loading` to `Authenticated` using the stored profile. A missing
    /// token, an unreadable profile or a storage failure discards the stored
    /// session instead. Never leaves the session in `Loading`.
    pub async fn resolve(&mut self) {
        if !self.state.borrow().is_loading() {
            return;
        }

        let identity = match self.read_stored_identity().await {
            Ok(identity) => identity,
            Err(err) => {
                warn!(error = %err, "session storage is unreadable, discarding it");
                None
            }
        };

        match identity {
            Some(identity) => {
                info!(email = %identity.email, role = %identity.role, "session restored");
                self.transition(SessionState::Authenticated(identity.clone()));
                self.emit(SessionEvent::Restored(identity));
            }
            None => {
                self.clear_storage().await;
                self.transition(SessionState::Unauthenticated);
            }
        }
    }

    pub async fn login(&mut self, request: LoginRequest) -> AuthResult<AuthTokens> {
        let Some(identity) = self
            .directory
            .verify(&request.email, &request.password)
            .await
        else {
            warn!(email = %request.email, "login rejected");
            self.emit(SessionEvent::LoginFailed {
                email: request.email,
            });
            return Err(AuthError::InvalidCredentials);
        };

        let tokens = self.establish(&identity).await?;
        info!(email = %identity.email, role = %identity.role, "logged in");
        self.emit(SessionEvent::LoggedIn(identity));
        Ok(tokens)
    }

    /// Enrolls a new account and signs it in.
    pub async fn register(&mut self, request: RegisterRequest) -> AuthResult<AuthTokens> {
        let identity = match self
            .directory
            .enroll(&request.email, &request.name, &request.password)
            .await
        {
            Ok(identity) => identity,
            Err(err) => {
                let err = AuthError::from(err);
                warn!(email = %request.email, error = %err, "registration rejected");
                self.emit(SessionEvent::RegistrationFailed {
                    email: request.email,
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        let tokens = self.establish(&identity).await?;
        info!(email = %identity.email, id = identity.id, "registered");
        self.emit(SessionEvent::Registered(identity));
        Ok(tokens)
    }

    /// Ends the session. Always succeeds and may be called repeatedly.
    pub async fn logout(&mut self) {
        self.clear_storage().await;
        self.transition(SessionState::Unauthenticated);
        info!("logged out");
        self.emit(SessionEvent::LoggedOut);
    }

    /// Ends the session because the upstream rejected its token.
    pub async fn invalidate(&mut self) {
        self.clear_storage().await;
        self.transition(SessionState::Unauthenticated);
        warn!("session token rejected, signed out");
        self.emit(SessionEvent::Expired);
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn watch(&self) -> SessionWatcher {
        SessionWatcher {
            rx: self.state.subscribe(),
        }
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Persists `identity` under a fresh token and switches to it. On a
    /// storage failure the stored session is discarded.
    async fn establish(&mut self, identity: &Identity) -> AuthResult<AuthTokens> {
        let profile = serde_json::to_string(identity)?;
        let tokens = AuthTokens::bearer(new_token());

        // Profile before token: a stored token must always have a profile.
        let written = match self.storage.set(PROFILE_KEY, &profile).await {
            Ok(()) => self.storage.set(TOKEN_KEY, &tokens.access_token).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            warn!(error = %err, "failed to persist session");
            self.clear_storage().await;
            self.transition(SessionState::Unauthenticated);
            return Err(AuthError::Storage(err));
        }

        self.transition(SessionState::Authenticated(identity.clone()));
        Ok(tokens)
    }

    async fn read_stored_identity(&self) -> AuthResult<Option<Identity>> {
        let token = self.storage.get(TOKEN_KEY).await?;
        let profile = self.storage.get(PROFILE_KEY).await?;
        Ok(match (token, profile) {
            (Some(_), Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    warn!(error = %err, "stored profile is unreadable");
                    None
                }
            },
            (Some(_), None) => {
                warn!("token stored without a profile");
                None
            }
            (None, _) => None,
        })
    }

    // Token first, so a partial failure never leaves a token behind.
    async fn clear_storage(&self) {
        if let Err(first) = self.storage.remove(TOKEN_KEY).await {
            warn!(error = %first, "failed to remove session token, retrying");
            if let Err(err) = self.storage.remove(TOKEN_KEY).await {
                warn!(
                    error = %err,
                    "session token is still stored, the session will be restored on restart"
                );
            }
        }
        if let Err(err) = self.storage.remove(PROFILE_KEY).await {
            warn!(error = %err, "failed to remove stored profile");
        }
    }

    fn transition(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        debug!(from = ?previous, to = ?*self.state.borrow(), "session transition");
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Read-only view of a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionWatcher {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    pub fn state(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.rx.borrow().identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading()
    }

    /// Waits for the next transition. Returns `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

fn new_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use trackly_adapters::{MemoryStorage, StaticDirectory};

    const DOMAIN: &str = "trackly.com";

    fn directory() -> Arc<dyn CredentialDirectory> {
        Arc::new(StaticDirectory::seeded(DOMAIN))
    }

    async fn fresh() -> (Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::open(storage.clone(), directory()).await;
        (session, storage)
    }

    #[tokio::test]
    async fn starts_unauthenticated_without_token() {
        let (session, _) = fresh().await;
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(session.current_identity().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn starts_loading_with_token() {
        let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "tok")]));
        let session = Session::open(storage, directory()).await;
        assert!(session.is_loading());
        assert!(session.is_authenticated());
        assert!(session.current_identity().is_none());
    }

    #[tokio::test]
    async fn login_persists_profile_and_token() {
        let (mut session, storage) = fresh().await;
        let tokens = session
            .login(LoginRequest::new("finance@trackly.com", "finance"))
            .await
            .unwrap();

        assert_eq!(tokens.access_token.len(), 64);
        assert_eq!(
            storage.get(TOKEN_KEY).await.unwrap(),
            Some(tokens.access_token)
        );
        let profile: Identity =
            serde_json::from_str(&storage.get(PROFILE_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(profile.role, Role::Finance);
        assert_eq!(session.current_identity(), Some(profile));
    }

    #[tokio::test]
    async fn failed_login_keeps_previous_identity() {
        let (mut session, storage) = fresh().await;
        session
            .login(LoginRequest::new("approver@trackly.com", "approver"))
            .await
            .unwrap();
        let before = storage.get(TOKEN_KEY).await.unwrap();

        let err = session
            .login(LoginRequest::new("admin@trackly.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(session.current_identity().unwrap().role, Role::Approver);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn second_login_replaces_the_session() {
        let (mut session, storage) = fresh().await;
        let first = session
            .login(LoginRequest::new("approver@trackly.com", "approver"))
            .await
            .unwrap();
        let mut events = session.events();

        let second = session
            .login(LoginRequest::new("finance@trackly.com", "finance"))
            .await
            .unwrap();

        let identity = session.current_identity().unwrap();
        assert_eq!(identity.role, Role::Finance);
        assert_ne!(first.access_token, second.access_token);
        assert_eq!(
            storage.get(TOKEN_KEY).await.unwrap(),
            Some(second.access_token)
        );
        let profile: Identity =
            serde_json::from_str(&storage.get(PROFILE_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(profile, identity);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn(identity));
    }

    #[tokio::test]
    async fn resolve_discards_unreadable_profile() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (TOKEN_KEY, "tok"),
            (PROFILE_KEY, r#"{"id":1,"email":"x@y","name":"X","role":"user"}"#),
        ]));
        let session = Session::restore(storage.clone(), directory()).await;
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(storage.get(PROFILE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn resolve_discards_token_without_profile() {
        let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "tok")]));
        let session = Session::restore(storage.clone(), directory()).await;
        assert!(!session.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn register_signs_in_as_employee() {
        let (mut session, _) = fresh().await;
        let mut events = session.events();
        session
            .register(RegisterRequest {
                email: "new@trackly.com".to_string(),
                password: "pw".to_string(),
                name: "New Hire".to_string(),
            })
            .await
            .unwrap();

        let identity = session.current_identity().unwrap();
        assert_eq!(identity.role, Role::Employee);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Registered(identity));
    }

    #[tokio::test]
    async fn register_with_taken_email_fails_without_state_change() {
        let (mut session, _) = fresh().await;
        let err = session
            .register(RegisterRequest {
                email: "admin@trackly.com".to_string(),
                password: "pw".to_string(),
                name: "Impostor".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn invalidate_clears_and_reports_expiry() {
        let (mut session, storage) = fresh().await;
        session
            .login(LoginRequest::new("admin@trackly.com", "admin"))
            .await
            .unwrap();
        let mut events = session.events();

        session.invalidate().await;
        assert!(session.current_identity().is_none());
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn watcher_sees_transitions() {
        let (mut session, _) = fresh().await;
        let mut watcher = session.watch();
        assert!(!watcher.is_authenticated());

        session
            .login(LoginRequest::new("employee@trackly.com", "employee"))
            .await
            .unwrap();
        let state = watcher.changed().await.unwrap();
        assert_eq!(state.identity().unwrap().role, Role::Employee);
        assert_eq!(watcher.current_identity().unwrap().email, "employee@trackly.com");

        drop(session);
        assert!(watcher.changed().await.is_none());
    }
}
