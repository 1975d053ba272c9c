use bson::Document as BsonDocument;
use bson::oid::ObjectId;
use parking_lot::RwLock;

use crate::query::{Criteria, Filter, UpdateDoc, apply_update, compare_docs, eval_filter};

/// A named set of documents held in insertion order. Insertion order is also
/// ascending `_id` order for ids generated here, which is what the default
/// descending-creation sort relies on.
pub struct Collection {
    name: String,
    docs: RwLock<Vec<BsonDocument>>,
}

impl Collection {
    pub(crate) fn new(name: String) -> Self {
        Self { name, docs: RwLock::new(Vec::new()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a document, assigning a fresh `_id` when one is absent, and
    /// returns the document's id.
    pub fn insert_one(&self, mut doc: BsonDocument) -> ObjectId {
        let id = match doc.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                doc.insert("_id", id);
                id
            }
        };
        self.docs.write().push(doc);
        crate::logger::log_audit("insert", &self.name, &id.to_hex());
        id
    }

    /// Filter, sort, then paginate. The sort is stable, so equal keys keep
    /// insertion order.
    pub fn find(&self, criteria: &Criteria) -> Vec<BsonDocument> {
        let docs = self.docs.read();
        let mut matched: Vec<BsonDocument> =
            docs.iter().filter(|d| eval_filter(d, &criteria.filter)).cloned().collect();
        drop(docs);
        if !criteria.sort.is_empty() {
            matched.sort_by(|a, b| compare_docs(a, b, &criteria.sort));
        }
        let skip = criteria.skip.min(matched.len());
        let end = match criteria.limit {
            Some(limit) => (skip + limit).min(matched.len()),
            None => matched.len(),
        };
        matched[skip..end].to_vec()
    }

    pub fn find_one(&self, filter: &Filter) -> Option<BsonDocument> {
        self.docs.read().iter().find(|d| eval_filter(d, filter)).cloned()
    }

    pub fn count_documents(&self, filter: &Filter) -> usize {
        self.docs.read().iter().filter(|d| eval_filter(d, filter)).count()
    }

    /// Applies `update` to the first matching document. Returns whether a
    /// document matched.
    pub fn update_one(&self, filter: &Filter, update: &UpdateDoc) -> bool {
        let mut docs = self.docs.write();
        if let Some(doc) = docs.iter_mut().find(|d| eval_filter(d, filter)) {
            apply_update(doc, update);
            let id = doc.get_object_id("_id").map(|id| id.to_hex()).unwrap_or_default();
            crate::logger::log_audit("update", &self.name, &id);
            true
        } else {
            false
        }
    }

    /// Removes the first matching document. Returns whether one was removed.
    pub fn delete_one(&self, filter: &Filter) -> bool {
        let mut docs = self.docs.write();
        if let Some(pos) = docs.iter().position(|d| eval_filter(d, filter)) {
            let removed = docs.remove(pos);
            let id = removed.get_object_id("_id").map(|id| id.to_hex()).unwrap_or_default();
            crate::logger::log_audit("delete", &self.name, &id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CmpOp, Order, SortSpec};
    use bson::doc;

    #[test]
    fn insert_assigns_id_and_find_one_matches() {
        let col = Collection::new("t".into());
        let id = col.insert_one(doc! {"name": "goku"});
        let found = col.find_one(&Filter::id(id)).unwrap();
        assert_eq!(found.get_str("name").unwrap(), "goku");
        assert_eq!(col.count_documents(&Filter::True), 1);
    }

    #[test]
    fn find_applies_sort_skip_limit() {
        let col = Collection::new("t".into());
        for price in [30, 10, 20, 40] {
            col.insert_one(doc! {"price": price});
        }
        let criteria = Criteria {
            filter: Filter::True,
            sort: vec![SortSpec { field: "price".into(), order: Order::Asc }],
            skip: 1,
            limit: Some(2),
        };
        let got = col.find(&criteria);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].get_i32("price").unwrap(), 20);
        assert_eq!(got[1].get_i32("price").unwrap(), 30);
    }

    #[test]
    fn skip_past_end_yields_empty() {
        let col = Collection::new("t".into());
        col.insert_one(doc! {"price": 1});
        let criteria = Criteria { filter: Filter::True, sort: vec![], skip: 9, limit: Some(8) };
        assert!(col.find(&criteria).is_empty());
    }

    #[test]
    fn update_and_delete_report_matches() {
        let col = Collection::new("t".into());
        let id = col.insert_one(doc! {"name": "a"});
        let upd = UpdateDoc { set: vec![("name".into(), "b".into())], ..Default::default() };
        assert!(col.update_one(&Filter::id(id), &upd));
        assert_eq!(col.find_one(&Filter::id(id)).unwrap().get_str("name").unwrap(), "b");

        assert!(col.delete_one(&Filter::id(id)));
        assert!(!col.delete_one(&Filter::id(id)));
        let missing = Filter::Cmp { path: "name".into(), op: CmpOp::Eq, value: "zzz".into() };
        assert!(!col.update_one(&missing, &upd));
    }
}
