use bson::Bson;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

#[derive(Debug, Clone)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Match predicate tree evaluated against stored documents.
#[derive(Debug, Clone)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Cmp { path: String, op: CmpOp, value: Bson },
    /// Any-of membership. When the stored field is an array, matches if any
    /// element belongs to the set.
    In { path: String, values: Vec<Bson> },
    /// Case-insensitive substring/regex match on a string field.
    Regex { path: String, pattern: String, case_insensitive: bool },
}

impl Filter {
    /// Equality predicate on the `_id` field.
    pub fn id(oid: ObjectId) -> Self {
        Filter::Cmp { path: "_id".to_string(), op: CmpOp::Eq, value: Bson::ObjectId(oid) }
    }

    /// Collapses a predicate list: empty means match-all.
    pub fn all_of(mut preds: Vec<Filter>) -> Self {
        match preds.len() {
            0 => Filter::True,
            1 => preds.remove(0),
            _ => Filter::And(preds),
        }
    }
}

/// Maps a logical sort key and direction to a physical sort. `createdAt` is
/// not stored; creation order lives in `_id`, so it maps there. A missing key
/// or direction falls back to descending creation order.
pub fn resolve_sort(sort_type: Option<&str>, dir: Option<i32>) -> Vec<SortSpec> {
    match (sort_type, dir) {
        (Some(key), Some(dir)) if !key.is_empty() && dir != 0 => {
            let field = if key == "createdAt" { "_id" } else { key };
            let order = if dir > 0 { Order::Asc } else { Order::Desc };
            vec![SortSpec { field: field.to_string(), order }]
        }
        _ => vec![SortSpec { field: "_id".to_string(), order: Order::Desc }],
    }
}

/// The resolved (criteria, sort, skip, limit) tuple for one query.
#[derive(Debug, Clone)]
pub struct Criteria {
    pub filter: Filter,
    pub sort: Vec<SortSpec>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl Criteria {
    /// Criteria that matches `filter` with no sort and no pagination.
    pub fn matching(filter: Filter) -> Self {
        Self { filter, sort: Vec::new(), skip: 0, limit: None }
    }
}

/// Field mutations applied by `update_one`.
#[derive(Debug, Default, Clone)]
pub struct UpdateDoc {
    pub set: Vec<(String, Bson)>,
    pub push: Vec<(String, Bson)>,
    /// For each array field, remove elements matching the sub-criteria.
    pub pull: Vec<(String, bson::Document)>,
}
