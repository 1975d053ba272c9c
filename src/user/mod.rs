mod service;
mod types;

pub use service::UserService;
pub use types::{NewUser, User, UserView};
