mod service;
mod token;

pub use service::AuthService;
pub use token::{AuthUser, TokenCodec};
