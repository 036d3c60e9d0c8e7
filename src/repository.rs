//! Source repository
//!
//! The per-source owner of the provider cache and the resolution entry
//! points. Construction is synchronous and eager (grouping + ordering run
//! once); resolution is per-call and asynchronous, reading the immutable
//! cache and driving provider factories strictly in order.

use crate::cache::ProviderCache;
use crate::error::{Error, Result};
use crate::provider::{DeferredProvider, Resource, ResourceProvider};
use crate::source::Source;
use std::any::TypeId;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Per-source capability registry
///
/// Created once per endpoint and typically long-lived. Stateless across
/// resolution calls: nothing is memoized, and the only shared state (the
/// [`Source`] and the provider cache) is immutable after construction, so a
/// repository behind an `Arc` is safe to resolve against concurrently.
///
/// # Example
///
/// ```ignore
/// let repository = SourceRepository::builder(Source::new("internal", url))
///     .provider(Arc::new(HttpSearchProvider))
///     .deferred(|| Arc::new(ExpensiveMetadataProvider::load()))
///     .build()?;
///
/// if let Some(search) = repository.resolve::<SearchResource>().await? {
///     search.query("tokio").await?;
/// }
/// ```
pub struct SourceRepository {
    source: Source,
    cache: ProviderCache,
}

impl SourceRepository {
    /// Create a repository from already-constructed providers
    ///
    /// Groups the providers by resource type and orders each group. Fails
    /// fast on malformed descriptors (empty name); an empty provider
    /// collection is valid and simply resolves nothing.
    pub fn new(source: Source, providers: Vec<Arc<dyn ResourceProvider>>) -> Result<Self> {
        Ok(Self {
            cache: ProviderCache::new(providers)?,
            source,
        })
    }

    /// Start building a repository for the given source
    pub fn builder(source: Source) -> SourceRepositoryBuilder {
        SourceRepositoryBuilder {
            source,
            providers: Vec::new(),
        }
    }

    /// The source this repository resolves capabilities against
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Resolve a resource of type `T`
    ///
    /// Equivalent to [`resolve_with`](Self::resolve_with) with a token that
    /// is never cancelled.
    pub async fn resolve<T: Resource>(&self) -> Result<Option<Arc<T>>> {
        self.resolve_with(&CancellationToken::new()).await
    }

    /// Resolve a resource of type `T` with a cancellation token
    ///
    /// Tries the ordered providers for `T` strictly in sequence, awaiting
    /// each factory before the next; the first provider that produces a
    /// resource wins and later providers are never invoked. A provider
    /// decline (`Ok(None)`) continues with the next provider; a provider
    /// error aborts the resolution and is propagated unchanged.
    ///
    /// Returns `Ok(None)` when no providers are registered for `T` or every
    /// provider declined; neither is an error.
    ///
    /// Every call re-runs the full sequence. Callers wanting reuse cache the
    /// returned `Arc<T>` themselves.
    pub async fn resolve_with<T: Resource>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<T>>> {
        let Some(providers) = self.cache.providers_for(TypeId::of::<T>()) else {
            tracing::debug!(
                source = %self.source,
                resource = std::any::type_name::<T>(),
                "no providers registered for resource type"
            );
            return Ok(None);
        };

        for provider in providers {
            tracing::debug!(
                source = %self.source,
                provider = provider.name(),
                "attempting resource creation"
            );
            match provider.try_create(self, cancel).await? {
                Some(resource) => {
                    let resource =
                        resource
                            .downcast_arc::<T>()
                            .map_err(|_| Error::ResourceType {
                                provider: provider.name().to_string(),
                                resource: std::any::type_name::<T>(),
                            })?;
                    tracing::debug!(
                        source = %self.source,
                        provider = provider.name(),
                        "resource created"
                    );
                    return Ok(Some(resource));
                }
                None => {
                    tracing::debug!(
                        source = %self.source,
                        provider = provider.name(),
                        "provider declined"
                    );
                }
            }
        }

        tracing::debug!(
            source = %self.source,
            resource = std::any::type_name::<T>(),
            "all providers declined"
        );
        Ok(None)
    }

    /// Blocking equivalent of [`resolve`](Self::resolve)
    ///
    /// Suspends the calling thread until resolution completes. Must not be
    /// called from within an async context: blocking a cooperative executor
    /// thread on a future it is supposed to drive can deadlock. That is the
    /// caller's responsibility; the repository does not detect it.
    pub fn resolve_blocking<T: Resource>(&self) -> Result<Option<Arc<T>>> {
        futures::executor::block_on(self.resolve::<T>())
    }

    /// Blocking equivalent of [`resolve_with`](Self::resolve_with)
    ///
    /// Same contract and caveat as [`resolve_blocking`](Self::resolve_blocking).
    pub fn resolve_blocking_with<T: Resource>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<T>>> {
        futures::executor::block_on(self.resolve_with::<T>(cancel))
    }

    /// Ordered provider names registered for resource type `T`
    ///
    /// Empty when no providers are registered. Useful for diagnostics and
    /// admin surfaces.
    pub fn provider_names<T: Resource>(&self) -> Vec<String> {
        self.cache
            .providers_for(TypeId::of::<T>())
            .map(|providers| providers.iter().map(|p| p.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// Number of distinct resource types with registered providers
    pub fn resource_type_count(&self) -> usize {
        self.cache.resource_type_count()
    }
}

/// Builder for [`SourceRepository`]
///
/// Collects eager and deferred provider registrations; deferred descriptors
/// are instantiated once, during [`build`](Self::build), because grouping and
/// ordering need their name, resource type, and hints.
pub struct SourceRepositoryBuilder {
    source: Source,
    providers: Vec<DeferredProvider>,
}

impl SourceRepositoryBuilder {
    /// Register an already-constructed provider
    pub fn provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.providers.push(DeferredProvider::eager(provider));
        self
    }

    /// Register a provider built lazily at `build` time
    pub fn deferred(
        mut self,
        init: impl Fn() -> Arc<dyn ResourceProvider> + Send + Sync + 'static,
    ) -> Self {
        self.providers.push(DeferredProvider::new(init));
        self
    }

    /// Register a pre-existing deferred descriptor
    ///
    /// Lets callers share one [`DeferredProvider`] across repositories; the
    /// underlying descriptor is still instantiated at most once overall.
    pub fn deferred_provider(mut self, provider: DeferredProvider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Build the repository, instantiating deferred descriptors
    pub fn build(self) -> Result<SourceRepository> {
        let providers = self
            .providers
            .iter()
            .map(|deferred| Arc::clone(deferred.get()))
            .collect();
        SourceRepository::new(self.source, providers)
    }
}
