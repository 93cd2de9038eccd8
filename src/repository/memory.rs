//! In-memory repository backend
//!
//! Rows are kept in insertion order, which is also the order `find_all`
//! returns them in.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::criteria::Criteria;
use super::error::{RepositoryError, RepositoryResult};
use super::traits::Repository;
use crate::domain::Entity;

/// In-memory table for one entity type
pub struct MemoryRepository<E> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_one(&self, criteria: Criteria) -> RepositoryResult<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| criteria.matches(*row)).cloned())
    }

    async fn find_all(&self, criteria: Criteria) -> RepositoryResult<Vec<E>> {
        let rows = self.rows.read().await;
        let matching = rows.iter().filter(|row| criteria.matches(*row)).cloned();
        Ok(match criteria.limit() {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    async fn insert_one(&self, row: E) -> RepositoryResult<E> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|existing| existing.id() == row.id()) {
            return Err(RepositoryError::conflict(format!(
                "{} {} already exists",
                E::KIND,
                row.id()
            )));
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_one(&self, criteria: Criteria, patch: Value) -> RepositoryResult<E> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| criteria.matches(row))
            .ok_or_else(|| RepositoryError::not_found(format!("{} for update", E::KIND)))?;

        let mut current = serde_json::to_value(&rows[index])?;
        merge_patch(&mut current, patch);
        let restored: E =
            serde_json::from_value(current).map_err(|e| RepositoryError::restore(E::KIND, e))?;

        rows[index] = restored.clone();
        Ok(restored)
    }

    async fn delete_one(&self, criteria: Criteria) -> RepositoryResult<E> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| criteria.matches(row))
            .ok_or_else(|| RepositoryError::not_found(format!("{} for delete", E::KIND)))?;
        Ok(rows.remove(index))
    }
}

/// JSON merge patch: objects merge recursively, `null` removes a key,
/// anything else replaces the target
fn merge_patch(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(fields) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(map) = target {
                for (key, value) in fields {
                    if value.is_null() {
                        map.remove(&key);
                    } else {
                        merge_patch(map.entry(key).or_insert(Value::Null), value);
                    }
                }
            }
        }
        other => *target = other,
    }
}
