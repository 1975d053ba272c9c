use bson::Bson;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::filter::ToyFilter;
use super::types::{BRANDS, COMPANIES, LabelSets, MsgAuthor, PRODUCT_TYPES, Toy, ToyMsg};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::query::{CmpOp, Criteria, Filter, UpdateDoc, max_page_count};
use crate::stats::{self, LabelDimension, LabelPercentage};
use crate::store::StoreClient;
use crate::types::parse_id;

const COLLECTION: &str = "toy";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyQueryResult {
    pub toys: Vec<Toy>,
    pub max_page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelChartsData {
    pub brands: Vec<LabelPercentage>,
    pub product_types: Vec<LabelPercentage>,
    pub companies: Vec<LabelPercentage>,
}

pub struct ToyService {
    store: Arc<StoreClient>,
}

impl ToyService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Filtered, sorted, optionally paginated catalog page plus the page
    /// count over the filtered-but-unpaginated set.
    pub fn query(&self, filter: &ToyFilter) -> Result<ToyQueryResult, AppError> {
        let col = self.store.collection(COLLECTION);
        let criteria = filter.criteria();
        let toys = col
            .find(&criteria)
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<Toy>, _>>()?;
        let total = col.count_documents(&criteria.filter);
        Ok(ToyQueryResult { toys, max_page_count: max_page_count(total) })
    }

    pub fn get_by_id(&self, toy_id: &str) -> Result<Toy, AppError> {
        let oid = parse_id(toy_id)?;
        let col = self.store.collection(COLLECTION);
        let doc = col
            .find_one(&Filter::id(oid))
            .ok_or_else(|| AppError::NotFound(format!("toy {toy_id}")))?;
        Ok(bson::from_document(doc)?)
    }

    /// Inserts a new toy with an empty message list and returns it with its
    /// assigned id.
    pub fn add(&self, toy: &Toy) -> Result<Toy, AppError> {
        validate_toy(toy)?;
        let mut to_save = toy.clone();
        to_save.id = None;
        to_save.msgs = Vec::new();
        let doc = bson::to_document(&to_save).map_err(|e| AppError::Store(e.to_string()))?;
        let col = self.store.collection(COLLECTION);
        to_save.id = Some(col.insert_one(doc));
        Ok(to_save)
    }

    /// Overwrites the editable fields; `msgs` is never clobbered on update.
    pub fn update(&self, toy: &Toy) -> Result<Toy, AppError> {
        let id = toy.id.ok_or_else(|| AppError::Validation("missing toy id".to_string()))?;
        validate_toy(toy)?;
        let mut doc = bson::to_document(toy).map_err(|e| AppError::Store(e.to_string()))?;
        doc.remove("_id");
        doc.remove("msgs");
        let upd = UpdateDoc { set: doc.into_iter().collect(), ..Default::default() };
        let col = self.store.collection(COLLECTION);
        if !col.update_one(&Filter::id(id), &upd) {
            return Err(AppError::NotFound(format!("toy {}", id.to_hex())));
        }
        Ok(toy.clone())
    }

    /// Deletes a toy and reports the remaining max page count over the whole
    /// collection, for client-side pager adjustment.
    pub fn remove(&self, toy_id: &str) -> Result<usize, AppError> {
        let oid = parse_id(toy_id)?;
        let col = self.store.collection(COLLECTION);
        if !col.delete_one(&Filter::id(oid)) {
            return Err(AppError::NotFound(format!("toy {toy_id}")));
        }
        Ok(max_page_count(col.count_documents(&Filter::True)))
    }

    pub fn save_msg(&self, toy_id: &str, txt: &str, by: &AuthUser) -> Result<ToyMsg, AppError> {
        if txt.is_empty() {
            return Err(AppError::Validation("msg txt is required".to_string()));
        }
        let oid = parse_id(toy_id)?;
        let msg = ToyMsg {
            id: Uuid::new_v4().simple().to_string(),
            txt: txt.to_string(),
            by: MsgAuthor { id: by.id, username: by.username.clone() },
            at: Utc::now().timestamp_millis(),
        };
        let value = bson::to_document(&msg).map_err(|e| AppError::Store(e.to_string()))?;
        let upd = UpdateDoc { push: vec![("msgs".to_string(), Bson::Document(value))], ..Default::default() };
        let col = self.store.collection(COLLECTION);
        if !col.update_one(&Filter::id(oid), &upd) {
            return Err(AppError::NotFound(format!("toy {toy_id}")));
        }
        Ok(msg)
    }

    pub fn remove_msg(&self, toy_id: &str, msg_id: &str) -> Result<(), AppError> {
        let oid = parse_id(toy_id)?;
        let upd = UpdateDoc {
            pull: vec![("msgs".to_string(), bson::doc! {"id": msg_id})],
            ..Default::default()
        };
        let col = self.store.collection(COLLECTION);
        if !col.update_one(&Filter::id(oid), &upd) {
            return Err(AppError::NotFound(format!("toy {toy_id}")));
        }
        Ok(())
    }

    /// The static label vocabulary offered to clients.
    pub fn labels(&self) -> LabelSets {
        LabelSets {
            brands: BRANDS.iter().map(|s| s.to_string()).collect(),
            product_types: PRODUCT_TYPES.iter().map(|s| s.to_string()).collect(),
            companies: COMPANIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Label popularity over the in-stock catalog, for all three dimensions.
    pub fn label_charts_data(&self) -> Result<LabelChartsData, AppError> {
        let col = self.store.collection(COLLECTION);
        let in_stock = Filter::Cmp {
            path: "inStock".to_string(),
            op: CmpOp::Eq,
            value: Bson::Boolean(true),
        };
        let toys = col
            .find(&Criteria::matching(in_stock))
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<Toy>, _>>()?;
        Ok(LabelChartsData {
            brands: stats::label_percentages(&toys, LabelDimension::Brands),
            product_types: stats::label_percentages(&toys, LabelDimension::ProductTypes),
            companies: stats::label_percentages(&toys, LabelDimension::Companies),
        })
    }
}

fn validate_toy(toy: &Toy) -> Result<(), AppError> {
    if toy.name.is_empty() {
        return Err(AppError::Validation("toy name is required".to_string()));
    }
    if toy.price == 0.0 {
        return Err(AppError::Validation("toy price is required".to_string()));
    }
    if toy.description.is_empty() {
        return Err(AppError::Validation("toy description is required".to_string()));
    }
    Ok(())
}
