use async_trait::async_trait;
use std::env;

/// A CRM login credential pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Read-only source of CRM credentials. Writing credentials is the job of an
/// external configuration surface, never this crate.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored credential pair, or `None` when nothing is configured.
    async fn credentials(&self) -> Option<Credentials>;
}

/// Reads credentials from `TALENTIS_EMAIL` / `TALENTIS_PASSWORD`, honouring
/// a `.env` file when present.
#[derive(Debug, Default)]
pub struct EnvCredentialStore;

impl EnvCredentialStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn credentials(&self) -> Option<Credentials> {
        dotenvy::dotenv().ok();
        let email = env::var("TALENTIS_EMAIL").ok()?;
        let password = env::var("TALENTIS_PASSWORD").ok()?;
        Some(Credentials { email, password })
    }
}

/// In-memory store, for hosts that hold credentials themselves instead of
/// the environment.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Option<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Some(Credentials {
                email: email.into(),
                password: password.into(),
            }),
        }
    }

    /// A store with nothing configured.
    pub fn empty() -> Self {
        Self { credentials: None }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn credentials(&self) -> Option<Credentials> {
        self.credentials.clone()
    }
}
