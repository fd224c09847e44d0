use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::identity::IdentityStore;
use crate::models::user::CurrentUser;

/// Fixed token → user table.
#[derive(Default)]
pub struct MemoryIdentityStore {
    sessions: HashMap<String, CurrentUser>,
}

impl MemoryIdentityStore {
    pub fn with_session(mut self, token: &str, user_id: &str) -> Self {
        self.sessions.insert(
            token.to_string(),
            CurrentUser {
                id: user_id.to_string(),
                email: format!("{user_id}@example.com"),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn resolve_session(&self, token: &str) -> Result<Option<CurrentUser>> {
        Ok(self.sessions.get(token).cloned())
    }
}
