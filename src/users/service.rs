use std::sync::Arc;
use uuid::Uuid;

use super::error::UserError;
use super::models::{NewUser, User};
use super::repository::UserStore;
use crate::auth::{self, TokenManager};

/// Registration, login and balance queries.
pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenManager>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenManager>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and issue a token for the fresh session.
    pub async fn register(&self, login: &str, password: &str) -> Result<(User, String), UserError> {
        if login.is_empty() || password.is_empty() {
            return Err(UserError::EmptyCredentials);
        }

        let password_hash =
            auth::password::hash(password).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                id: Uuid::new_v4(),
                login: login.to_string(),
                password_hash,
            })
            .await?;

        let token = self.tokens.generate(user.id, &user.login)?;
        Ok((user, token))
    }

    /// Authenticate a user and issue a token.
    ///
    /// Unknown logins and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, login: &str, password: &str) -> Result<(User, String), UserError> {
        if login.is_empty() || password.is_empty() {
            return Err(UserError::EmptyCredentials);
        }

        let user = match self.users.get_by_login(login).await {
            Ok(user) => user,
            Err(UserError::NotFound) => return Err(UserError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !auth::password::verify(password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        let token = self.tokens.generate(user.id, &user.login)?;
        Ok((user, token))
    }

    /// Current balance and withdrawn total for the user.
    pub async fn get_balance(&self, user_id: Uuid) -> Result<User, UserError> {
        self.users.get_by_id(user_id).await
    }
}
