//! User registration service implementation

use crate::database::UserRepository;
use crate::utils::errors::Result;

/// Bot user registration and lookup
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Register a user; repeat registrations are no-ops
    pub async fn register(&self, user_id: i64) -> Result<()> {
        self.users.register(user_id).await
    }

    /// Whether the user has ever been registered
    pub async fn is_registered(&self, user_id: i64) -> Result<bool> {
        Ok(self.users.find_by_id(user_id).await?.is_some())
    }
}
