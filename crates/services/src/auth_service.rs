use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use flow_core::Clock;
use flow_core::model::{User, UserId};
use flow_core::validation::{AuthMode, Credentials};

use crate::deadline::within;
use crate::error::{AuthError, ProviderError};

//
// ─── PROVIDERS ─────────────────────────────────────────────────────────────────
//

/// Third-party identity providers offered next to the email form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Google,
    Facebook,
    Apple,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 3] = [
        SocialProvider::Google,
        SocialProvider::Facebook,
        SocialProvider::Apple,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
            SocialProvider::Apple => "Apple",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity backend that turns credentials into a `User`.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in or registers with already validated credentials.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the backend refuses or cannot be reached.
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<User, ProviderError>;

    /// Signs in through a social identity provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the backend refuses or cannot be reached.
    async fn register_social(&self, provider: SocialProvider) -> Result<User, ProviderError>;
}

/// Produces ids for newly created accounts.
pub type IdSource = Arc<dyn Fn() -> UserId + Send + Sync>;

/// Stand-in backend: waits, then fabricates a fresh account with zero progress.
pub struct SimulatedAuthProvider {
    delay: Duration,
    social_delay: Duration,
    clock: Clock,
    next_id: IdSource,
}

impl SimulatedAuthProvider {
    #[must_use]
    pub fn new(delay: Duration, social_delay: Duration, clock: Clock) -> Self {
        Self {
            delay,
            social_delay,
            clock,
            next_id: Arc::new(UserId::random),
        }
    }

    #[must_use]
    pub fn with_id_source(mut self, next_id: IdSource) -> Self {
        self.next_id = next_id;
        self
    }
}

#[async_trait]
impl AuthProvider for SimulatedAuthProvider {
    async fn authenticate(
        &self,
        _mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<User, ProviderError> {
        tokio::time::sleep(self.delay).await;
        let user = User::new(
            (self.next_id)(),
            credentials.display_name(),
            credentials.email.trim(),
            self.clock.now(),
        )?;
        Ok(user)
    }

    async fn register_social(&self, provider: SocialProvider) -> Result<User, ProviderError> {
        tokio::time::sleep(self.social_delay).await;
        let user = User::new(
            (self.next_id)(),
            format!("User from {provider}"),
            format!("user@{}.com", provider.name().to_lowercase()),
            self.clock.now(),
        )?;
        Ok(user)
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Validates sign-in forms and forwards them to the configured `AuthProvider`.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    timeout: Duration,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Validates `credentials` for `mode`, then asks the provider for the account.
    ///
    /// The provider is never called when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with every failing field,
    /// `AuthError::Provider` if the backend fails, and `AuthError::Timeout`
    /// if it does not answer in time.
    pub async fn submit(&self, mode: AuthMode, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.validate(mode)?;
        info!(?mode, "submitting credentials");
        let user = self
            .bounded(self.provider.authenticate(mode, credentials))
            .await?;
        info!(user_id = %user.id(), ?mode, "signed in");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Provider` or `AuthError::Timeout`.
    pub async fn register_social(&self, provider: SocialProvider) -> Result<User, AuthError> {
        info!(%provider, "social sign-in");
        let user = self.bounded(self.provider.register_social(provider)).await?;
        info!(user_id = %user.id(), %provider, "signed in");
        Ok(user)
    }

    async fn bounded(
        &self,
        call: impl Future<Output = Result<User, ProviderError>>,
    ) -> Result<User, AuthError> {
        match within(self.timeout, call).await {
            Ok(Ok(user)) => Ok(user),
            Ok(Err(e)) => {
                warn!(error = %e, "auth provider failed");
                Err(e.into())
            }
            Err(ms) => {
                warn!(timeout_ms = ms, "auth provider timed out");
                Err(AuthError::Timeout(ms))
            }
        }
    }
}
