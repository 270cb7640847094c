use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

pub(crate) mod nfl;

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque session credential, sent back as a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub cookie: String,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Session>;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Body text of `url`. Transport failures are errors; HTTP error statuses are not.
    async fn fetch(&self, url: &str, session: &Session) -> Result<String>;
}
