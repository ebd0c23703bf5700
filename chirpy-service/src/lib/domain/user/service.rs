use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::Platform;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    platform: Platform,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `platform` - Deployment environment, gates [`UserServicePort::purge_users`]
    pub fn new(repository: Arc<UR>, platform: Platform) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
            platform,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: PasswordHash::new(password_hash),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.email = command.email;
        user.password_hash =
            PasswordHash::new(self.password_hasher.hash(command.password.as_str())?);
        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User credentials updated");

        Ok(updated_user)
    }

    async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<User, UserError> {
        let user = self.repository.set_chirpy_red(id).await?;
        tracing::info!(user_id = %user.id, "User upgraded to Chirpy Red");

        Ok(user)
    }

    async fn purge_users(&self) -> Result<u64, UserError> {
        if !self.platform.allows_purge() {
            tracing::warn!(platform = ?self.platform, "Refused to purge users");
            return Err(UserError::PurgeForbidden);
        }

        let removed = self.repository.delete_all().await?;
        tracing::warn!(removed, "All users purged");

        Ok(removed)
    }
}
