//! Session holder: the current credential and signed-in member.
//!
//! A [`Session`] is an explicit object created at app start and handed to
//! whatever needs the signed-in identity. State changes are published through
//! a `tokio::sync::watch` channel so views can subscribe instead of polling.
//!
//! # Usage
//!
//! ```rust,ignore
//! use community_directory::{DirectoryConfig, FileTokenStore, HttpDirectoryApi, Session, SystemClock};
//!
//! let config = DirectoryConfig::from_env()?;
//! let api = HttpDirectoryApi::from_config(&config)?;
//! let store = FileTokenStore::from_config(&config);
//!
//! // Picks up a token persisted by an earlier run, if it is still valid
//! let session = Session::restore(api, store, Arc::new(SystemClock)).await;
//!
//! if !session.is_authenticated() {
//!     let me = session.login("amina@example.com", "password").await?;
//!     println!("Signed in as {} ({})", me.full_name, me.age());
//! }
//! ```

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::{DirectoryError, Result};
use crate::token::AuthToken;
use crate::traits::{api::DirectoryApi, token_store::TokenStore};
use crate::types::{AuthResponse, LoginRequest, Member, RegisterRequest};

/// A credential and, once known, the member it belongs to.
///
/// The member lives inside this struct so there can never be a signed-in
/// member without a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub token: AuthToken,
    /// `None` while the profile for a restored token is still loading
    pub user: Option<Member>,
}

/// Snapshot of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub auth: Option<Authenticated>,
    pub is_loading: bool,
}

impl SessionState {
    pub fn token(&self) -> Option<&AuthToken> {
        self.auth.as_ref().map(|auth| &auth.token)
    }

    pub fn current_user(&self) -> Option<&Member> {
        self.auth.as_ref().and_then(|auth| auth.user.as_ref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Holds the session and performs login, registration and logout.
pub struct Session<A, S> {
    api: A,
    store: S,
    clock: Arc<dyn Clock>,
    state: watch::Sender<SessionState>,
}

impl<A: DirectoryApi, S: TokenStore> Session<A, S> {
    /// An empty session. Storage is not read.
    pub fn new(api: A, store: S, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            api,
            store,
            clock,
            state,
        }
    }

    /// Start-up path: pick up a persisted token and load its profile.
    ///
    /// A token the backend rejects (or any other profile failure) is cleared
    /// with [`Session::logout`]; nothing is retried and no error surfaces.
    pub async fn restore(api: A, store: S, clock: Arc<dyn Clock>) -> Self {
        let session = Self::new(api, store, clock);

        let token = match session.store.load().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Could not read persisted token, starting signed out");
                None
            }
        };

        if let Some(token) = token {
            session.state.send_modify(|state| {
                state.auth = Some(Authenticated {
                    token: token.clone(),
                    user: None,
                });
            });
            session.hydrate(token).await;
        }

        session
    }

    async fn hydrate(&self, token: AuthToken) {
        self.set_loading(true);

        match self.api.fetch_profile(&token).await {
            Ok(record) => {
                let user = Member::from_record(record, self.clock.today());
                info!(member_id = %user.id, "Restored session");
                self.state.send_modify(|state| {
                    state.auth = Some(Authenticated {
                        token,
                        user: Some(user),
                    });
                });
            }
            Err(err) => {
                warn!(error = %err, "Persisted session is no longer valid, logging out");
                self.logout().await;
            }
        }

        self.set_loading(false);
    }

    /// Sign in with email and password.
    ///
    /// On failure the existing session, if any, is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Member> {
        let request = LoginRequest::new(email, password);

        self.set_loading(true);
        let outcome = match self.api.login(&request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(err) => {
                warn!(email = %email, error = %err, "Login failed");
                Err(err)
            }
        };
        self.set_loading(false);

        outcome
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, request: RegisterRequest) -> Result<Member> {
        request.validate()?;

        self.set_loading(true);
        let outcome = match self.api.register(&request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(err) => {
                warn!(email = %request.email, error = %err, "Registration failed");
                Err(err)
            }
        };
        self.set_loading(false);

        outcome
    }

    /// Re-fetch the signed-in member's profile.
    ///
    /// A rejected token ends the session; other failures leave it untouched.
    pub async fn refresh_profile(&self) -> Result<Member> {
        let token = self
            .token()
            .ok_or_else(|| DirectoryError::Authentication("not signed in".into()))?;

        self.set_loading(true);
        let outcome = match self.api.fetch_profile(&token).await {
            Ok(record) => {
                let user = Member::from_record(record, self.clock.today());
                self.state.send_modify(|state| {
                    if let Some(auth) = state.auth.as_mut() {
                        auth.user = Some(user.clone());
                    }
                });
                Ok(user)
            }
            Err(err) => {
                if err.is_authentication() {
                    warn!(error = %err, "Token rejected while refreshing profile, logging out");
                    self.logout().await;
                }
                Err(err)
            }
        };
        self.set_loading(false);

        outcome
    }

    /// Forget the credential and the signed-in member.
    ///
    /// Safe to call when already signed out. Failing to remove the persisted
    /// token is logged, not returned.
    pub async fn logout(&self) {
        let mut previous = None;
        self.state.send_if_modified(|state| {
            previous = state.auth.take();
            previous.is_some()
        });

        if let Some(Authenticated {
            user: Some(user), ..
        }) = previous
        {
            info!(member_id = %user.id, "Logged out");
        }

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "Failed to remove persisted token");
        }
    }

    /// Current snapshot, with the member's age as of today.
    pub fn state(&self) -> SessionState {
        let mut state = self.state.borrow().clone();
        if let Some(user) = state.auth.as_mut().and_then(|auth| auth.user.as_mut()) {
            user.refresh_age(self.clock.today());
        }
        state
    }

    /// Receive every subsequent state change.
    ///
    /// Published members carry the age from when they were stored; use
    /// [`Member::age_on`] or [`Session::current_user`] to display one.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.state.borrow().token().cloned()
    }

    /// The signed-in member, with the age re-derived for today.
    pub fn current_user(&self) -> Option<Member> {
        let mut user = self.state.borrow().current_user().cloned()?;
        user.refresh_age(self.clock.today());
        Some(user)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The backend this session authenticates against, for authenticated
    /// calls made with [`Session::token`].
    pub fn api(&self) -> &A {
        &self.api
    }

    async fn establish(&self, response: AuthResponse) -> Member {
        let AuthResponse { token, user } = response;
        let user = Member::from_record(user, self.clock.today());

        if let Err(err) = self.store.save(&token).await {
            warn!(error = %err, "Failed to persist token, session will not survive a restart");
        }

        info!(member_id = %user.id, "Signed in");
        self.state.send_modify(|state| {
            state.auth = Some(Authenticated {
                token,
                user: Some(user.clone()),
            });
        });

        user
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            if state.is_loading == loading {
                false
            } else {
                state.is_loading = loading;
                true
            }
        });
    }
}
