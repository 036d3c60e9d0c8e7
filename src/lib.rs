//! Capability Registry
//!
//! Resolves requests for typed capabilities ("resources") against a logical
//! endpoint (a [`Source`]) by consulting registered providers. Consumers ask
//! "give me the implementation of capability `T` for this source" without
//! knowing which provider answers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Resolution Flow                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  construction (once, sync):                                  │
//! │    SourceRepository::new ──▶ group by resource type          │
//! │                          ──▶ order each group (best-effort   │
//! │                              topological sort, deterministic │
//! │                              tie-break, cycle tolerant)      │
//! │                                                              │
//! │  resolve::<T>() (per call, async):                           │
//! │    ordered providers ──▶ try_create in sequence              │
//! │       Ok(Some(r))  first success wins, remaining skipped     │
//! │       Ok(None)     decline, try next                         │
//! │       Err(e)       malfunction, abort and propagate          │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Source`] | Endpoint identity + configuration, immutable |
//! | [`Resource`] | Marker trait for capability instances |
//! | [`ResourceProvider`] | Named, orderable async factory for one resource type |
//! | [`DeferredProvider`] | Lazily instantiated provider descriptor |
//! | [`SourceRepository`] | Per-source registry and resolution entry points |
//!
//! Resolution never memoizes: each call re-runs provider selection so the
//! outcome can reflect runtime conditions. Callers needing reuse hold on to
//! the returned `Arc<T>`.

/// Provider grouping and lookup, built once per repository
mod cache;
/// Error handling types
pub mod error;
/// Deterministic best-effort provider ordering
mod ordering;
/// Resource and provider port traits
pub mod provider;
/// Repository construction and the resolution protocol
pub mod repository;
/// Source value object
pub mod source;

// Re-export the public surface
pub use error::{Error, Result};
pub use provider::{DeferredProvider, Resource, ResourceProvider};
pub use repository::{SourceRepository, SourceRepositoryBuilder};
pub use source::Source;
