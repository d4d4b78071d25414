//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by binaries built on
//! this framework.
//!
//! - **Structured logging**: actors log with fields such as `entity_type`, `id`, `size`
//!   and `error`, so lines can be filtered without parsing messages.
//! - **Configurable levels** via the `RUST_LOG` environment variable.
//! - **Compact format** with the module path hidden (`with_target(false)`); the
//!   `entity_type` field already says where a line comes from.
//!
//! ```bash
//! RUST_LOG=info cargo run    # lifecycle: Created, Updated, Deleted, Cleared
//! RUST_LOG=debug cargo run   # adds Get/List and full request payloads
//! ```
//!
//! A create followed by a status update looks like this at `info`:
//!
//! ```text
//! INFO Actor started entity_type="Order" backend="kv-rest"
//! INFO Created entity_type="Order" id=1760520600123
//! INFO Updated entity_type="Order" id=1760520600123
//! ```

/// Install a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
