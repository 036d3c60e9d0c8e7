//! Provider and resource ports
//!
//! Defines the contracts a capability provider implements to participate in
//! resolution:
//!
//! - [`Resource`]: marker trait for capability instances, with trait-object
//!   downcasting so [`SourceRepository::resolve`](crate::SourceRepository::resolve)
//!   can hand back a concrete `Arc<T>`.
//! - [`ResourceProvider`]: named, orderable async factory for one resource
//!   type. May decline (`Ok(None)`) or malfunction (`Err`).
//! - [`DeferredProvider`]: thunk that instantiates a descriptor at most once,
//!   separating descriptor-construction cost from `try_create` cost.

use crate::error::Result;
use crate::repository::SourceRepository;
use async_trait::async_trait;
use downcast_rs::{DowncastSync, impl_downcast};
use std::any::TypeId;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

/// Marker trait for capability instances
///
/// The registry core is oblivious to what a resource does; it only needs type
/// identity for grouping and a downcast path for typed resolution. Implement
/// it on any `Send + Sync + 'static` type:
///
/// ```ignore
/// struct SearchResource { /* ... */ }
/// impl capreg::Resource for SearchResource {}
/// ```
pub trait Resource: DowncastSync {}
impl_downcast!(sync Resource);

/// Resource Provider Port
///
/// Defines the contract for capability providers. A provider declares which
/// resource type it can produce, optional relative-ordering hints against
/// other providers of the same type, and an asynchronous factory.
///
/// # Ordering hints
///
/// `before` and `after` name other providers. They only take effect when the
/// named provider is registered for the same resource type; hints against
/// absent providers are ignored. Contradictory or cyclic hints never fail:
/// the registry falls back to a deterministic name-based order.
///
/// # Factory contract
///
/// `try_create` distinguishes two negative outcomes:
///
/// - `Ok(None)` — the provider declines ("not applicable to this source");
///   resolution continues with the next provider.
/// - `Err(_)` — the provider malfunctioned; resolution aborts and the error
///   is propagated to the caller unchanged.
///
/// # Example
///
/// ```ignore
/// struct HttpSearchProvider;
///
/// #[async_trait]
/// impl ResourceProvider for HttpSearchProvider {
///     fn name(&self) -> &str {
///         "http-search"
///     }
///
///     fn resource_type(&self) -> TypeId {
///         TypeId::of::<SearchResource>()
///     }
///
///     async fn try_create(
///         &self,
///         repository: &SourceRepository,
///         cancel: &CancellationToken,
///     ) -> Result<Option<Arc<dyn Resource>>> {
///         if !repository.source().url.starts_with("https://") {
///             return Ok(None); // decline: wrong kind of endpoint
///         }
///         Ok(Some(Arc::new(SearchResource::probe(repository.source(), cancel).await?)))
///     }
/// }
/// ```
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Provider name, unique among providers of the same resource type
    ///
    /// Uniqueness is not enforced, but ordering hints are only meaningful
    /// against unambiguous names.
    fn name(&self) -> &str;

    /// The resource type this provider can produce (the grouping key)
    fn resource_type(&self) -> TypeId;

    /// Names of providers that must be ordered after this one
    fn before(&self) -> &[String] {
        &[]
    }

    /// Names of providers that must be ordered before this one
    fn after(&self) -> &[String] {
        &[]
    }

    /// Attempt to create a resource for the repository's source
    ///
    /// The repository is passed in so the provider can read the
    /// [`Source`](crate::Source) (and resolve other capabilities it depends
    /// on). The cancellation token is cooperative: a provider performing I/O
    /// should observe it and return [`Error::Cancelled`](crate::Error::Cancelled)
    /// when cancelled. The registry itself never inspects the token.
    async fn try_create(
        &self,
        repository: &SourceRepository,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<dyn Resource>>>;
}

/// Deferred provider descriptor
///
/// Wraps a zero-argument initializer and instantiates the descriptor at most
/// once, on first use. This defers the cost of building the descriptor object
/// itself (not the `try_create` call) until a repository is constructed from
/// it.
pub struct DeferredProvider {
    cell: OnceLock<Arc<dyn ResourceProvider>>,
    init: Box<dyn Fn() -> Arc<dyn ResourceProvider> + Send + Sync>,
}

impl DeferredProvider {
    /// Create a deferred descriptor from an initializer
    pub fn new(init: impl Fn() -> Arc<dyn ResourceProvider> + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Box::new(init),
        }
    }

    /// Wrap an already-constructed descriptor
    pub fn eager(provider: Arc<dyn ResourceProvider>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::clone(&provider));
        Self {
            cell,
            init: Box::new(move || Arc::clone(&provider)),
        }
    }

    /// Get the descriptor, instantiating it on first call
    pub fn get(&self) -> &Arc<dyn ResourceProvider> {
        self.cell.get_or_init(|| (self.init)())
    }
}

impl std::fmt::Debug for DeferredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cell.get() {
            Some(provider) => write!(f, "DeferredProvider({})", provider.name()),
            None => write!(f, "DeferredProvider(<pending>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubResource;
    impl Resource for StubResource {}

    struct StubProvider;

    #[async_trait]
    impl ResourceProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn resource_type(&self) -> TypeId {
            TypeId::of::<StubResource>()
        }

        async fn try_create(
            &self,
            _repository: &SourceRepository,
            _cancel: &CancellationToken,
        ) -> Result<Option<Arc<dyn Resource>>> {
            Ok(None)
        }
    }

    #[test]
    fn test_deferred_instantiates_once() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let deferred = DeferredProvider::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(StubProvider)
        });

        assert_eq!(built.load(Ordering::SeqCst), 0, "must not build eagerly");
        assert_eq!(deferred.get().name(), "stub");
        assert_eq!(deferred.get().name(), "stub");
        assert_eq!(built.load(Ordering::SeqCst), 1, "initializer must run once");
    }

    #[test]
    fn test_eager_never_runs_initializer() {
        let deferred = DeferredProvider::eager(Arc::new(StubProvider));
        assert_eq!(deferred.get().name(), "stub");
    }

    #[test]
    fn test_default_ordering_hints_are_empty() {
        let provider = StubProvider;
        assert!(provider.before().is_empty());
        assert!(provider.after().is_empty());
    }
}
