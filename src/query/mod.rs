// Submodules for separation of concerns
mod eval;
mod page;
mod types;
mod update;

// Public API re-exports
pub use eval::{as_f64, compare_bson, compare_docs, eval_filter};
pub use page::{PAGE_SIZE, max_page_count, page_bounds};
pub use types::{CmpOp, Criteria, Filter, Order, SortSpec, UpdateDoc, resolve_sort};
pub use update::apply_update;
