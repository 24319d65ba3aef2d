//! Service descriptor registry.

use crate::models::ServiceDescriptor;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<String, ServiceDescriptor>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `descriptor` under its name, replacing any previous entry.
    ///
    /// Returns `true` if an existing descriptor was overwritten.
    pub async fn upsert(&self, descriptor: ServiceDescriptor) -> bool {
        self.services
            .write()
            .await
            .insert(descriptor.name.clone(), descriptor)
            .is_some()
    }

    pub async fn get(&self, name: &str) -> Option<ServiceDescriptor> {
        self.services.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.services.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.services.read().await.is_empty()
    }
}
