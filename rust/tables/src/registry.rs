use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use holdem_engine::config::TableConfig;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::PlayerAction;
use holdem_engine::snapshot::TableSnapshot;
use uuid::Uuid;

use crate::errors::TableError;
use crate::events::TableEvent;
use crate::settings::Settings;
use crate::table::{SharedHistory, Table};

pub type TableId = String;

/// Owns every open table. Lookups take the map's read lock only long enough
/// to clone the table handle; the operation itself runs under that table's
/// own mutex, so different tables never wait on each other.
#[derive(Debug)]
pub struct TableRegistry {
    tables: RwLock<HashMap<TableId, Arc<Mutex<Table>>>>,
    config: TableConfig,
    history: Option<SharedHistory>,
}

impl TableRegistry {
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self {
            tables: RwLock::new(HashMap::new()),
            config,
            history: None,
        })
    }

    /// Registry configured from resolved settings, appending hand records to
    /// `history_path` when one is set.
    pub fn from_settings(settings: &Settings) -> Result<Self, TableError> {
        let mut registry = Self::new(settings.table.clone())?;
        if let Some(path) = &settings.history_path {
            let logger = HandLogger::create(path)?;
            registry.history = Some(Arc::new(Mutex::new(logger)));
        }
        Ok(registry)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Opens a table with `host` in seat 0.
    pub fn create_table(&self, host: &str) -> Result<TableId, TableError> {
        let id = Uuid::new_v4().to_string();
        let table = Table::new(id.clone(), self.config.clone(), host, self.history.clone())?;

        let mut guard = self
            .tables
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard.insert(id.clone(), Arc::new(Mutex::new(table)));
        drop(guard);

        tracing::info!(table_id = %id, host, "table created");
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Arc<Mutex<Table>>, TableError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.to_string()))
    }

    /// Runs `op` under the table's lock. Tables that closed during `op` are
    /// removed from the registry afterwards.
    fn with_table<T, F>(&self, id: &str, op: F) -> Result<T, TableError>
    where
        F: FnOnce(&mut Table) -> Result<T, TableError>,
    {
        let handle = self.get(id)?;
        let (result, closed) = {
            let mut table = handle.lock().map_err(|_| TableError::StoragePoisoned)?;
            let result = op(&mut table);
            (result, table.is_closed())
        };
        if closed {
            self.remove_table(id)?;
        }
        if let Err(err) = &result {
            err.log(id);
        }
        result
    }

    pub fn join(&self, id: &str, name: &str) -> Result<Vec<TableEvent>, TableError> {
        self.with_table(id, |t| t.join(name))
    }

    pub fn leave(&self, id: &str, name: &str) -> Result<Vec<TableEvent>, TableError> {
        self.with_table(id, |t| t.leave(name))
    }

    pub fn start_hand(&self, id: &str) -> Result<Vec<TableEvent>, TableError> {
        self.with_table(id, |t| t.start_hand())
    }

    pub fn act(
        &self,
        id: &str,
        name: &str,
        action: PlayerAction,
    ) -> Result<Vec<TableEvent>, TableError> {
        self.with_table(id, |t| t.act(name, action))
    }

    /// Table view for `viewer`, or with every live hand shown when `None`.
    pub fn snapshot(&self, id: &str, viewer: Option<&str>) -> Result<TableSnapshot, TableError> {
        self.with_table(id, |t| t.snapshot(viewer))
    }

    pub fn remove_table(&self, id: &str) -> Result<bool, TableError> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        let removed = guard.remove(id).is_some();
        if removed {
            tracing::info!(table_id = %id, "table removed");
        }
        Ok(removed)
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        match self.tables.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
