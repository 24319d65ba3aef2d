//! Live bearer token store.

use crate::models::Identity;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a token value maps to.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
}

/// Map from token value to the identity captured at issuance.
#[derive(Clone, Default)]
pub struct TokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless it is already live.
    ///
    /// Returns `false` on collision, leaving the existing record untouched.
    /// Check and insert happen under one write lock.
    pub async fn insert_if_absent(&self, value: String, record: TokenRecord) -> bool {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&value) {
            return false;
        }
        tokens.insert(value, record);
        true
    }

    /// Drop `value`. Returns `true` if it was present.
    pub async fn remove(&self, value: &str) -> bool {
        self.tokens.write().await.remove(value).is_some()
    }

    /// Drop every record issued at or before `cutoff`, returning how many
    /// were removed.
    pub async fn retain_issued_after(&self, cutoff: DateTime<Utc>) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| record.issued_at > cutoff);
        before - tokens.len()
    }

    pub async fn get(&self, value: &str) -> Option<TokenRecord> {
        self.tokens.read().await.get(value).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}
