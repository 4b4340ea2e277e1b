use std::sync::RwLock;

use crate::errors::Error;

use super::{SessionCredential, SessionStore};

#[derive(Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<SessionCredential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: SessionCredential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionCredential>, Error> {
        let guard = self
            .credential
            .read()
            .map_err(|_| Error::Session("session lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), Error> {
        let mut guard = self
            .credential
            .write()
            .map_err(|_| Error::Session("session lock poisoned".into()))?;
        *guard = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        let mut guard = self
            .credential
            .write()
            .map_err(|_| Error::Session("session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        let credential = SessionCredential::new("tok", "farmer");
        store.save(&credential).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }
}
