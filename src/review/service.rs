use bson::oid::ObjectId;
use bson::{Bson, Document as BsonDocument, doc};
use serde::Serialize;
use std::sync::Arc;

use super::filter::ReviewFilter;
use super::types::{Review, ReviewView};
use crate::errors::AppError;
use crate::query::{
    CmpOp, Criteria, Filter, UpdateDoc, as_f64, compare_docs, eval_filter, max_page_count,
};
use crate::stats::{self, RatingStats};
use crate::store::StoreClient;
use crate::types::parse_id;

const COLLECTION: &str = "review";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueryResult {
    pub reviews: Vec<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_stats: Option<RatingStats>,
    pub max_page_count: usize,
}

pub struct ReviewService {
    store: Arc<StoreClient>,
}

impl ReviewService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Filtered review page, joined with the referenced toys and users.
    ///
    /// The pipeline order matters: base criteria match first, then the join,
    /// then the toy-name filter (it targets a joined field), then sort and
    /// pagination. The page count is taken over the base criteria, before the
    /// join, so the toy-name narrowing never shrinks the pager.
    pub fn query(&self, filter: &ReviewFilter) -> Result<ReviewQueryResult, AppError> {
        let col = self.store.collection(COLLECTION);
        let criteria = filter.criteria();

        let mut enriched: Vec<BsonDocument> = col
            .find(&Criteria::matching(criteria.filter.clone()))
            .iter()
            .filter_map(|d| self.enrich(d))
            .collect();

        if !filter.toy_name.is_empty() {
            let name_match = Filter::Regex {
                path: "toy.name".to_string(),
                pattern: filter.toy_name.clone(),
                case_insensitive: true,
            };
            enriched.retain(|d| eval_filter(d, &name_match));
        }

        enriched.sort_by(|a, b| compare_docs(a, b, &criteria.sort));

        let skip = criteria.skip.min(enriched.len());
        let end = match criteria.limit {
            Some(limit) => (skip + limit).min(enriched.len()),
            None => enriched.len(),
        };
        let reviews = enriched[skip..end]
            .iter()
            .cloned()
            .map(bson::from_document)
            .collect::<Result<Vec<ReviewView>, _>>()?;

        let rating_stats = match filter.by_toy_id.as_deref() {
            Some(toy_id) if !toy_id.is_empty() && !reviews.is_empty() => {
                let ratings: Vec<f64> = reviews.iter().map(|r| r.rating).collect();
                Some(stats::rating_stats(&ratings))
            }
            _ => None,
        };

        let total = col.count_documents(&criteria.filter);
        Ok(ReviewQueryResult { reviews, rating_stats, max_page_count: max_page_count(total) })
    }

    pub fn get_by_id(&self, review_id: &str) -> Result<ReviewView, AppError> {
        let oid = parse_id(review_id)?;
        let col = self.store.collection(COLLECTION);
        let doc = col
            .find_one(&Filter::id(oid))
            .and_then(|d| self.enrich(&d))
            .ok_or_else(|| AppError::NotFound(format!("review {review_id}")))?;
        Ok(bson::from_document(doc)?)
    }

    /// Stores a review and returns it with its id and derived creation time.
    pub fn add(
        &self,
        toy_id: &str,
        txt: &str,
        rating: f64,
        user_id: &ObjectId,
    ) -> Result<Review, AppError> {
        if txt.is_empty() {
            return Err(AppError::Validation("review txt is required".to_string()));
        }
        if rating == 0.0 {
            return Err(AppError::Validation("review rating is required".to_string()));
        }
        // Validates the reference; the stored foreign key stays a string.
        parse_id(toy_id)?;
        let doc = doc! {
            "userId": user_id.to_hex(),
            "toyId": toy_id,
            "txt": txt,
            "rating": rating,
        };
        let col = self.store.collection(COLLECTION);
        let id = col.insert_one(doc);
        Ok(Review {
            id: Some(id),
            user_id: user_id.to_hex(),
            toy_id: toy_id.to_string(),
            txt: txt.to_string(),
            rating,
            created_at: Some(id.timestamp().timestamp_millis()),
        })
    }

    /// Only the body and the rating are editable.
    pub fn update(&self, review_id: &str, txt: &str, rating: f64) -> Result<(), AppError> {
        if txt.is_empty() {
            return Err(AppError::Validation("review txt is required".to_string()));
        }
        if rating == 0.0 {
            return Err(AppError::Validation("review rating is required".to_string()));
        }
        let oid = parse_id(review_id)?;
        let upd = UpdateDoc {
            set: vec![("txt".to_string(), Bson::String(txt.to_string())),
                      ("rating".to_string(), Bson::Double(rating))],
            ..Default::default()
        };
        let col = self.store.collection(COLLECTION);
        if !col.update_one(&Filter::id(oid), &upd) {
            return Err(AppError::NotFound(format!("review {review_id}")));
        }
        Ok(())
    }

    pub fn remove(&self, review_id: &str) -> Result<(), AppError> {
        let oid = parse_id(review_id)?;
        let col = self.store.collection(COLLECTION);
        if !col.delete_one(&Filter::id(oid)) {
            return Err(AppError::NotFound(format!("review {review_id}")));
        }
        Ok(())
    }

    /// Rating summary for a review set. With an empty set and a toy id, the
    /// toy's reviews are looked up first; with neither, the zero-filled
    /// default comes back.
    pub fn rating_stats(
        &self,
        ratings: &[f64],
        toy_id: Option<&str>,
    ) -> Result<RatingStats, AppError> {
        if ratings.is_empty()
            && let Some(toy_id) = toy_id
        {
            let col = self.store.collection(COLLECTION);
            let by_toy = Filter::Cmp {
                path: "toyId".to_string(),
                op: CmpOp::Eq,
                value: Bson::String(toy_id.to_string()),
            };
            let fetched: Vec<f64> = col
                .find(&Criteria::matching(by_toy))
                .iter()
                .filter_map(|d| d.get("rating").and_then(as_f64))
                .collect();
            return Ok(stats::rating_stats(&fetched));
        }
        Ok(stats::rating_stats(ratings))
    }

    /// Resolves the referenced toy and user; reviews with a dangling
    /// reference are dropped, mirroring unwind semantics. `createdAt` is
    /// extracted from the id's embedded timestamp.
    fn enrich(&self, doc: &BsonDocument) -> Option<BsonDocument> {
        let id = doc.get_object_id("_id").ok()?;
        let toy_oid = ObjectId::parse_str(doc.get_str("toyId").ok()?).ok()?;
        let user_oid = ObjectId::parse_str(doc.get_str("userId").ok()?).ok()?;
        let toy = self.store.collection("toy").find_one(&Filter::id(toy_oid))?;
        let user = self.store.collection("user").find_one(&Filter::id(user_oid))?;
        Some(doc! {
            "_id": id,
            "txt": doc.get_str("txt").unwrap_or_default(),
            "rating": doc.get("rating").and_then(as_f64).unwrap_or_default(),
            "toy": { "_id": toy_oid, "name": toy.get_str("name").unwrap_or_default() },
            "user": { "_id": user_oid, "username": user.get_str("username").unwrap_or_default() },
            "createdAt": id.timestamp().timestamp_millis(),
        })
    }
}
