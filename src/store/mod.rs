mod client;
mod collection;

pub use client::{Database, StoreClient};
pub use collection::Collection;
