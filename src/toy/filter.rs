use bson::Bson;
use serde::Deserialize;

use crate::query::{CmpOp, Criteria, Filter, page_bounds, resolve_sort};

/// Normalized search/sort/paginate parameters for the toy resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToyFilter {
    /// Case-insensitive substring match on the toy name.
    pub name: String,
    /// Lower price bound; zero means no bound.
    pub price: f64,
    /// Tri-state: `None` matches both states.
    pub in_stock: Option<bool>,
    pub brands: Vec<String>,
    pub product_types: Vec<String>,
    pub companies: Vec<String>,
    pub sort_type: Option<String>,
    /// +1 ascending, -1 descending.
    pub dir: Option<i32>,
    pub page_idx: Option<usize>,
}

impl ToyFilter {
    /// Resolves the filter into match criteria, sort and pagination. Never
    /// fails; absent fields simply contribute no predicate.
    pub fn criteria(&self) -> Criteria {
        let mut preds = Vec::new();
        if !self.name.is_empty() {
            preds.push(Filter::Regex {
                path: "name".to_string(),
                pattern: self.name.clone(),
                case_insensitive: true,
            });
        }
        if self.price != 0.0 {
            preds.push(Filter::Cmp {
                path: "price".to_string(),
                op: CmpOp::Gte,
                value: Bson::Double(self.price),
            });
        }
        if let Some(in_stock) = self.in_stock {
            preds.push(Filter::Cmp {
                path: "inStock".to_string(),
                op: CmpOp::Eq,
                value: Bson::Boolean(in_stock),
            });
        }
        for (field, set) in [
            ("brands", &self.brands),
            ("productTypes", &self.product_types),
            ("companies", &self.companies),
        ] {
            if !set.is_empty() {
                preds.push(Filter::In {
                    path: field.to_string(),
                    values: set.iter().map(|s| Bson::String(s.clone())).collect(),
                });
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Order;

    #[test]
    fn empty_filter_matches_all_with_default_sort() {
        let c = ToyFilter::default().criteria();
        assert!(matches!(c.filter, Filter::True));
        assert_eq!(c.sort.len(), 1);
        assert_eq!(c.sort[0].field, "_id");
        assert!(matches!(c.sort[0].order, Order::Desc));
        assert_eq!(c.skip, 0);
        assert_eq!(c.limit, None);
    }

    #[test]
    fn explicit_false_in_stock_still_adds_predicate() {
        let filter = ToyFilter { in_stock: Some(false), ..Default::default() };
        let c = filter.criteria();
        assert!(matches!(c.filter, Filter::Cmp { .. }));
    }

    #[test]
    fn created_at_maps_to_id_field() {
        let filter = ToyFilter {
            sort_type: Some("createdAt".to_string()),
            dir: Some(1),
            ..Default::default()
        };
        let c = filter.criteria();
        assert_eq!(c.sort[0].field, "_id");
        assert!(matches!(c.sort[0].order, Order::Asc));
    }

    #[test]
    fn missing_direction_falls_back_to_default_sort() {
        let filter = ToyFilter { sort_type: Some("price".to_string()), ..Default::default() };
        let c = filter.criteria();
        assert_eq!(c.sort[0].field, "_id");
        assert!(matches!(c.sort[0].order, Order::Desc));
    }

    #[test]
    fn page_idx_sets_skip_and_limit() {
        let filter = ToyFilter { page_idx: Some(2), ..Default::default() };
        let c = filter.criteria();
        assert_eq!(c.skip, 16);
        assert_eq!(c.limit, Some(8));
    }

    #[test]
    fn combined_predicates_fold_into_and() {
        let filter = ToyFilter {
            name: "luffy".to_string(),
            price: 25.0,
            brands: vec!["One Piece".to_string()],
            ..Default::default()
        };
        let c = filter.criteria();
        let Filter::And(preds) = c.filter else { panic!("expected And") };
        assert_eq!(preds.len(), 3);
    }
}
