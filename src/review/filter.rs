use bson::Bson;
use serde::Deserialize;

use crate::query::{CmpOp, Criteria, Filter, page_bounds, resolve_sort};

/// Normalized search/sort/paginate parameters for the review resource.
///
/// `toy_name` is deliberately absent from the base criteria: it targets the
/// joined toy's name and is applied only after enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewFilter {
    pub by_user_id: Option<String>,
    pub by_toy_id: Option<String>,
    /// Lower rating bound; zero means no bound.
    pub min_rating: f64,
    /// Case-insensitive substring match on the review body.
    pub review_txt: String,
    /// Case-insensitive substring match on the joined toy name.
    pub toy_name: String,
    pub sort_type: Option<String>,
    pub dir: Option<i32>,
    pub page_idx: Option<usize>,
}

impl ReviewFilter {
    pub fn criteria(&self) -> Criteria {
        let mut preds = Vec::new();
        if let Some(user_id) = self.by_user_id.as_deref()
            && !user_id.is_empty()
        {
            preds.push(Filter::Cmp {
                path: "userId".to_string(),
                op: CmpOp::Eq,
                value: Bson::String(user_id.to_string()),
            });
        }
        if let Some(toy_id) = self.by_toy_id.as_deref()
            && !toy_id.is_empty()
        {
            preds.push(Filter::Cmp {
                path: "toyId".to_string(),
                op: CmpOp::Eq,
                value: Bson::String(toy_id.to_string()),
            });
        }
        if self.min_rating != 0.0 {
            preds.push(Filter::Cmp {
                path: "rating".to_string(),
                op: CmpOp::Gte,
                value: Bson::Double(self.min_rating),
            });
        }
        if !self.review_txt.is_empty() {
            preds.push(Filter::Regex {
                path: "txt".to_string(),
                pattern: self.review_txt.clone(),
                case_insensitive: true,
            });
        }

        let (skip, limit) = page_bounds(self.page_idx);
        Criteria {
            filter: Filter::all_of(preds),
            sort: resolve_sort(self.sort_type.as_deref(), self.dir),
            skip,
            limit,
        }
    }
}
