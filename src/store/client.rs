use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::collection::Collection;

/// A connected database: a set of named collections.
pub struct Database {
    name: String,
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl Database {
    fn new(name: String) -> Self {
        Self { name, collections: RwLock::new(HashMap::new()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the named collection, creating it on first access.
    pub fn collection(&self, name: &str) -> Arc<Collection> {
        if let Some(col) = self.collections.read().get(name) {
            return col.clone();
        }
        let mut cols = self.collections.write();
        cols.entry(name.to_string())
            .or_insert_with(|| Arc::new(Collection::new(name.to_string())))
            .clone()
    }
}

/// Explicitly constructed store client. The database handle is established on
/// first use and reused afterwards; acquisition is idempotent.
pub struct StoreClient {
    db_name: String,
    handle: OnceCell<Arc<Database>>,
}

impl StoreClient {
    pub fn new(db_name: impl Into<String>) -> Self {
        Self { db_name: db_name.into(), handle: OnceCell::new() }
    }

    /// Connect-or-reuse acquisition of the database handle.
    pub fn database(&self) -> Arc<Database> {
        self.handle
            .get_or_init(|| {
                log::info!("connected to database {}", self.db_name);
                Arc::new(Database::new(self.db_name.clone()))
            })
            .clone()
    }

    pub fn collection(&self, name: &str) -> Arc<Collection> {
        self.database().collection(name)
    }
}
