use crate::gateway::Descriptor;
use crate::types::LoginRequest;

use super::Api;

impl Api {
    /// `POST /auth/login`. Answers `{ token, username? }`.
    pub fn login(&self, username: &str, password: &str) -> Descriptor {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("auth.login", "/auth/login".to_string(), body)
    }
}
