pub mod auth;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod review;
pub mod stats;
pub mod store;
pub mod toy;
pub mod types;
pub mod user;

use std::sync::Arc;

use crate::auth::{AuthService, TokenCodec};
use crate::review::ReviewService;
use crate::toy::ToyService;
use crate::user::UserService;

pub use crate::config::Config;
pub use crate::errors::AppError;
pub use crate::store::StoreClient;

/// The assembled backend: one store client shared by every service.
pub struct Backend {
    pub store: Arc<StoreClient>,
    pub toys: ToyService,
    pub reviews: ReviewService,
    pub users: UserService,
    pub auth: AuthService,
}

impl Backend {
    /// Wires up the services against a single store client. Fails when the
    /// configured token secret is unusable; there is no default secret.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let codec = TokenCodec::new(&config.token_secret)?;
        let store = Arc::new(StoreClient::new(&config.db_name));
        Ok(Self {
            toys: ToyService::new(Arc::clone(&store)),
            reviews: ReviewService::new(Arc::clone(&store)),
            users: UserService::new(Arc::clone(&store)),
            auth: AuthService::new(Arc::clone(&store), codec),
            store,
        })
    }

    /// Convenience constructor reading `TOYSTORE_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(&Config::from_env()?)
    }
}
