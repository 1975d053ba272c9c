use std::sync::Arc;

use crate::errors::AppError;
use crate::store::StoreClient;
use crate::user::{NewUser, UserService};

use super::token::{AuthUser, TokenCodec};

/// Login, signup and token validation on top of the user store.
pub struct AuthService {
    users: UserService,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(store: Arc<StoreClient>, codec: TokenCodec) -> Self {
        Self { users: UserService::new(store), codec }
    }

    /// Checks the credentials against the stored record and, on success,
    /// returns the reduced user projection together with a fresh token.
    ///
    /// Passwords are compared as plain text; the stored records carry them
    /// unhashed.
    pub fn login(&self, username: &str, password: &str) -> Result<(AuthUser, String), AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation("missing required credentials".to_string()));
        }
        log::debug!("auth.login attempt username={username}");
        let user = self.users.get_by_username(username)?;
        let user = match user {
            Some(u) if u.password == password => u,
            _ => {
                log::warn!("auth.login failed username={username}");
                return Err(AppError::Validation("invalid username or password".to_string()));
            }
        };
        let reduced = AuthUser::reduced(&user)?;
        let token = self.codec.issue(&reduced)?;
        Ok((reduced, token))
    }

    /// Creates the account, then logs it straight in.
    pub fn signup(&self, new_user: &NewUser) -> Result<(AuthUser, String), AppError> {
        self.users.add(new_user)?;
        self.login(&new_user.username, &new_user.password)
    }

    pub fn validate_token(&self, token: &str) -> Option<AuthUser> {
        self.codec.validate(token)
    }
}
