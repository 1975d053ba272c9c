use bson::{Bson, doc};
use std::sync::Arc;

use super::types::{NewUser, User, UserView};
use crate::errors::AppError;
use crate::query::{CmpOp, Criteria, Filter, UpdateDoc};
use crate::store::StoreClient;
use crate::types::parse_id;

const COLLECTION: &str = "user";

pub struct UserService {
    store: Arc<StoreClient>,
}

impl UserService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// All users as outward views, in natural (creation) order.
    pub fn query(&self) -> Result<Vec<UserView>, AppError> {
        let col = self.store.collection(COLLECTION);
        let mut views = Vec::new();
        for doc in col.find(&Criteria::matching(Filter::True)) {
            let user: User = bson::from_document(doc)?;
            if let Some(view) = UserView::from_user(&user) {
                views.push(view);
            }
        }
        Ok(views)
    }

    pub fn get_by_id(&self, user_id: &str) -> Result<UserView, AppError> {
        let oid = parse_id(user_id)?;
        let col = self.store.collection(COLLECTION);
        let doc = col
            .find_one(&Filter::id(oid))
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
        let user: User = bson::from_document(doc)?;
        UserView::from_user(&user).ok_or_else(|| AppError::Store("user without id".to_string()))
    }

    /// Full stored record, password included; login needs it.
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let col = self.store.collection(COLLECTION);
        let by_name = Filter::Cmp {
            path: "username".to_string(),
            op: CmpOp::Eq,
            value: Bson::String(username.to_string()),
        };
        match col.find_one(&by_name) {
            Some(doc) => Ok(Some(bson::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Creates an account. New accounts are never admins.
    pub fn add(&self, credentials: &NewUser) -> Result<UserView, AppError> {
        if credentials.username.is_empty()
            || credentials.password.is_empty()
            || credentials.fullname.is_empty()
        {
            return Err(AppError::Validation("missing required credentials".to_string()));
        }
        if self.get_by_username(&credentials.username)?.is_some() {
            return Err(AppError::Validation("username is taken".to_string()));
        }
        let doc = doc! {
            "username": &credentials.username,
            "password": &credentials.password,
            "fullname": &credentials.fullname,
            "isAdmin": false,
            "imgUrl": credentials.img_url.clone().unwrap_or_default(),
        };
        let col = self.store.collection(COLLECTION);
        let id = col.insert_one(doc);
        self.get_by_id(&id.to_hex())
    }

    /// Updates the username and/or image URL. A new username must not collide
    /// with an existing account.
    pub fn update(
        &self,
        user_id: &str,
        username: Option<&str>,
        img_url: Option<&str>,
    ) -> Result<UserView, AppError> {
        let oid = parse_id(user_id)?;
        let mut view = self.get_by_id(user_id)?;
        let mut set = Vec::new();
        if let Some(username) = username
            && !username.is_empty()
        {
            if self.get_by_username(username)?.is_some() {
                return Err(AppError::Validation("username is taken".to_string()));
            }
            view.username = username.to_string();
            set.push(("username".to_string(), Bson::String(username.to_string())));
        }
        if let Some(img_url) = img_url
            && !img_url.is_empty()
        {
            view.img_url = img_url.to_string();
            set.push(("imgUrl".to_string(), Bson::String(img_url.to_string())));
        }
        if !set.is_empty() {
            let col = self.store.collection(COLLECTION);
            col.update_one(&Filter::id(oid), &UpdateDoc { set, ..Default::default() });
        }
        Ok(view)
    }

    pub fn remove(&self, user_id: &str) -> Result<(), AppError> {
        let oid = parse_id(user_id)?;
        let col = self.store.collection(COLLECTION);
        if !col.delete_one(&Filter::id(oid)) {
            return Err(AppError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }
}
