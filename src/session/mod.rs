mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Bearer token plus the username it was issued to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub token: String,
    pub username: String,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Persisted session capability. The adapter only reads it; the gateway only clears it.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionCredential>, Error>;
    fn save(&self, credential: &SessionCredential) -> Result<(), Error>;
    fn clear(&self) -> Result<(), Error>;
}
