mod filter;
mod service;
mod types;

pub use filter::ReviewFilter;
pub use service::{ReviewQueryResult, ReviewService};
pub use types::{Review, ReviewView, ToyRef, UserRef};
