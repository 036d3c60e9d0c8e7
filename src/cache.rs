//! Provider cache
//!
//! One-time grouping and ordering of all registered providers. Built during
//! [`SourceRepository`](crate::SourceRepository) construction and never
//! mutated afterwards, so concurrent resolutions can read it without locking.

use crate::error::{Error, Result};
use crate::ordering::order_providers;
use crate::provider::ResourceProvider;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable mapping from resource type to its ordered provider sequence
pub(crate) struct ProviderCache {
    groups: HashMap<TypeId, Vec<Arc<dyn ResourceProvider>>>,
}

impl ProviderCache {
    /// Group providers by resource type and order each group
    ///
    /// A descriptor with an empty name is the caller's error and is rejected
    /// here, synchronously, rather than surfacing at resolution time.
    pub(crate) fn new(providers: Vec<Arc<dyn ResourceProvider>>) -> Result<Self> {
        let mut grouped: HashMap<TypeId, Vec<Arc<dyn ResourceProvider>>> = HashMap::new();
        for provider in providers {
            if provider.name().trim().is_empty() {
                return Err(Error::invalid_provider("provider name must not be empty"));
            }
            grouped
                .entry(provider.resource_type())
                .or_default()
                .push(provider);
        }

        let groups: HashMap<_, _> = grouped
            .into_iter()
            .map(|(resource_type, group)| {
                let ordered = order_providers(group);
                tracing::trace!(
                    providers = ?ordered.iter().map(|p| p.name()).collect::<Vec<_>>(),
                    "ordered provider group"
                );
                (resource_type, ordered)
            })
            .collect();

        Ok(Self { groups })
    }

    /// Ordered providers for one resource type, if any are registered
    pub(crate) fn providers_for(
        &self,
        resource_type: TypeId,
    ) -> Option<&[Arc<dyn ResourceProvider>]> {
        self.groups.get(&resource_type).map(Vec::as_slice)
    }

    /// Number of distinct resource types with registered providers
    pub(crate) fn resource_type_count(&self) -> usize {
        self.groups.len()
    }
}
