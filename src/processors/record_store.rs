use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use crate::models::{RawRecord, StationRecord};

struct Collection {
    records: Arc<[StationRecord]>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Collection {
    fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            loaded_at: None,
        }
    }
}

/// Owner of the all-stations and current-city collections
///
/// Each setter validates the whole batch first and then swaps the snapshot in
/// one write, so readers see either the previous or the new collection.
pub struct RecordStore {
    all: RwLock<Collection>,
    city: RwLock<Collection>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            all: RwLock::new(Collection::empty()),
            city: RwLock::new(Collection::empty()),
        }
    }

    /// Replace the full station set
    pub fn set_all(&self, records: Vec<RawRecord>) {
        let received = records.len();
        let snapshot = ingest(records);
        info!(
            received,
            stored = snapshot.len(),
            "Replacing all-stations collection"
        );
        replace(&self.all, snapshot);
    }

    /// Replace the current city's station set
    pub fn set_city(&self, records: Vec<RawRecord>) {
        let received = records.len();
        let snapshot = ingest(records);
        info!(
            received,
            stored = snapshot.len(),
            "Replacing city collection"
        );
        replace(&self.city, snapshot);
    }

    pub fn get_all(&self) -> Arc<[StationRecord]> {
        snapshot(&self.all)
    }

    pub fn get_city(&self) -> Arc<[StationRecord]> {
        snapshot(&self.city)
    }

    pub fn all_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.all
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded_at
    }

    pub fn city_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.city
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded_at
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Records without a usable position never enter a collection
fn ingest(records: Vec<RawRecord>) -> Arc<[StationRecord]> {
    records
        .into_iter()
        .filter_map(StationRecord::from_raw)
        .collect::<Vec<_>>()
        .into()
}

fn replace(slot: &RwLock<Collection>, records: Arc<[StationRecord]>) {
    let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Collection {
        records,
        loaded_at: Some(Utc::now()),
    };
}

fn snapshot(slot: &RwLock<Collection>) -> Arc<[StationRecord]> {
    slot.read()
        .unwrap_or_else(PoisonError::into_inner)
        .records
        .clone()
}
