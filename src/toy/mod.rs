mod filter;
mod service;
mod types;

pub use filter::ToyFilter;
pub use service::{LabelChartsData, ToyQueryResult, ToyService};
pub use types::{LabelSets, MsgAuthor, Toy, ToyMsg};
