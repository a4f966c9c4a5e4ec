//! Calculation history store
//!
//! Ordered rows of evaluated calculations with filtering, aggregate
//! statistics and CSV persistence.

use crate::error::{StorageError, StorageResult};
use crate::row::{HistoryRow, COLUMNS};
use crate::Calculation;
use abacus_core::{Number, NumberError};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// File used when no history path is given
pub const DEFAULT_HISTORY_FILE: &str = "calculation_history.csv";

/// Aggregate statistics over the whole store.
///
/// Only `count` is present for an empty store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result: Option<f64>,
}

impl HistoryStats {
    fn empty() -> Self {
        Self {
            count: 0,
            operations: None,
            avg_result: None,
            min_result: None,
            max_result: None,
        }
    }
}

/// In-memory history, persisted only on explicit `save`
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    rows: Vec<HistoryRow>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Evaluate `calculation`, append its row stamped with local time, return the exact result
    pub fn add(&mut self, calculation: &Calculation) -> Result<Number, NumberError> {
        self.add_at(calculation, Local::now().naive_local())
    }

    /// `add` with an explicit timestamp
    pub fn add_at(&mut self, calculation: &Calculation, timestamp: NaiveDateTime) -> Result<Number, NumberError> {
        let result = calculation.perform().inspect_err(|e| {
            error!("Error adding calculation to history: {}", e);
        })?;

        self.rows.push(HistoryRow::new(calculation, &result, timestamp));
        info!("Added calculation to history: {}", calculation);
        Ok(result)
    }

    /// Copy of every row in insertion order
    pub fn all(&self) -> Vec<HistoryRow> {
        debug!("Retrieved calculation history");
        self.rows.clone()
    }

    /// One field map per row, keyed by column name
    pub fn as_records(&self) -> Vec<Map<String, JsonValue>> {
        debug!("Retrieved calculation history as records");
        self.rows.iter().map(row_to_record).collect()
    }

    pub fn latest(&self) -> Option<&HistoryRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        info!("Cleared calculation history");
    }

    /// Rows whose operation equals `name`, in insertion order
    pub fn filter_by_operation(&self, name: &str) -> Vec<HistoryRow> {
        debug!("Filtered history by operation: {}", name);
        self.rows.iter()
            .filter(|row| row.operation == name)
            .cloned()
            .collect()
    }

    pub fn statistics(&self) -> HistoryStats {
        if self.rows.is_empty() {
            debug!("No calculations in history for statistics");
            return HistoryStats::empty();
        }

        let mut operations = BTreeMap::new();
        for row in &self.rows {
            *operations.entry(row.operation.clone()).or_insert(0) += 1;
        }

        let results = self.rows.iter().map(|row| row.result);
        let total: f64 = results.clone().sum();
        let min = results.clone().fold(f64::INFINITY, f64::min);
        let max = results.fold(f64::NEG_INFINITY, f64::max);

        debug!("Generated calculation history statistics");
        HistoryStats {
            count: self.rows.len(),
            operations: Some(operations),
            avg_result: Some(total / self.rows.len() as f64),
            min_result: Some(min),
            max_result: Some(max),
        }
    }

    /// Write every row to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        self.write_csv(path).inspect_err(|e| {
            error!("Error saving calculation history: {}", e);
        })?;
        info!("Saved calculation history to {}", path.display());
        Ok(())
    }

    fn write_csv(&self, path: &Path) -> StorageResult<()> {
        let csv_err = |source| StorageError::Csv { path: path.to_path_buf(), source };

        // Header written by hand so an empty store still produces one
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        writer.write_record(COLUMNS).map_err(csv_err)?;
        for row in &self.rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| StorageError::Io { path: path.to_path_buf(), source })
    }

    /// Replace all rows with the contents of `path`.
    ///
    /// Returns `Ok(false)` without touching the store when the file does
    /// not exist. A malformed file also leaves the store untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StorageResult<bool> {
        let path = path.as_ref();
        if !file_present(path, fs::metadata(path))? {
            return Ok(false);
        }

        let rows = Self::read_csv(path).inspect_err(|e| {
            error!("Error loading calculation history: {}", e);
        })?;
        self.rows = rows;
        info!("Loaded calculation history from {}", path.display());
        Ok(true)
    }

    fn read_csv(path: &Path) -> StorageResult<Vec<HistoryRow>> {
        let csv_err = |source| StorageError::Csv { path: path.to_path_buf(), source };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_err)?;

        reader.deserialize()
            .collect::<Result<Vec<HistoryRow>, csv::Error>>()
            .map_err(csv_err)
    }

    /// Remove the history file at `path`; `Ok(false)` if it was absent
    pub fn delete_file(&self, path: impl AsRef<Path>) -> StorageResult<bool> {
        let path = path.as_ref();
        // The link itself is removed, so do not follow it
        if !file_present(path, fs::symlink_metadata(path))? {
            return Ok(false);
        }

        fs::remove_file(path)
            .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })
            .inspect_err(|e| error!("Error deleting calculation history file: {}", e))?;
        info!("Deleted calculation history file {}", path.display());
        Ok(true)
    }
}

/// Only `NotFound` counts as absent; other lookup failures are errors
fn file_present(path: &Path, metadata: io::Result<Metadata>) -> StorageResult<bool> {
    match metadata {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("History file {} not found", path.display());
            Ok(false)
        }
        Err(source) => {
            let err = StorageError::Io { path: path.to_path_buf(), source };
            error!("Error accessing calculation history file: {}", err);
            Err(err)
        }
    }
}

fn row_to_record(row: &HistoryRow) -> Map<String, JsonValue> {
    // Non-finite fields serialize as null
    match serde_json::to_value(row) {
        Ok(JsonValue::Object(map)) => map,
        _ => Map::new(),
    }
}
