//! In-memory RulesStore backend.
//!
//! The default backend for the CLI server and for tests. Records live in
//! a `BTreeMap` behind a `tokio::sync::RwLock`, so listing is ordered by
//! supplier id and writes are last-write-wins.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::record::SupplierRecord;
use crate::traits::RulesStore;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, SupplierRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl RulesStore for MemoryStore {
    async fn fetch(&self, supplier_id: &str) -> Result<SupplierRecord, StoreError> {
        let records = self.records.read().await;
        records
            .get(supplier_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                supplier_id: supplier_id.to_owned(),
            })
    }

    async fn upsert(&self, record: SupplierRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.supplier_id.clone(), record);
        Ok(())
    }

    async fn remove(&self, supplier_id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records
            .remove(supplier_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                supplier_id: supplier_id.to_owned(),
            })
    }

    async fn list(&self) -> Result<Vec<SupplierRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commis_core::RulesDoc;

    fn record(supplier_id: &str, deadline: i64) -> SupplierRecord {
        SupplierRecord::new(
            supplier_id,
            RulesDoc {
                order_days: vec!["mardi".into()],
                order_deadline_hour: deadline,
                delivery_days: vec![],
                delivery_delay_days: 1,
                delivery_time: "10:00".into(),
                special_rules: None,
            },
        )
    }

    #[tokio::test]
    async fn fetch_missing_supplier_is_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch("metro").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { supplier_id } if supplier_id == "metro"
        ));
    }

    #[tokio::test]
    async fn upsert_then_fetch_round_trips() {
        let store = MemoryStore::new();
        let rec = record("metro", 11);
        store.upsert(rec.clone()).await.unwrap();
        assert_eq!(store.fetch("metro").await.unwrap(), rec);
    }

    #[tokio::test]
    async fn upsert_is_last_write_wins() {
        let store = MemoryStore::new();
        store.upsert(record("metro", 11)).await.unwrap();
        store.upsert(record("metro", 15)).await.unwrap();
        let got = store.fetch("metro").await.unwrap();
        assert_eq!(got.rules.order_deadline_hour, 15);
    }

    #[tokio::test]
    async fn remove_then_fetch_is_not_found() {
        let store = MemoryStore::new();
        store.upsert(record("metro", 11)).await.unwrap();
        store.remove("metro").await.unwrap();
        assert!(store.fetch("metro").await.is_err());
        assert!(store.remove("metro").await.is_err());
    }

    #[tokio::test]
    async fn list_is_ordered_by_supplier_id() {
        let store = MemoryStore::new();
        store.upsert(record("transgourmet", 9)).await.unwrap();
        store.upsert(record("metro", 11)).await.unwrap();
        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.supplier_id)
            .collect();
        assert_eq!(ids, vec!["metro", "transgourmet"]);
    }
}
