//! # Observability & Tracing
//!
//! Structured logging for the whole synchronization core.
//!
//! ## What Gets Traced
//!
//! | Source | Level | Message | Fields |
//! |--------|-------|---------|--------|
//! | Registry | `debug` | `Started` | `operation`, `request_id`, `args` |
//! | Registry | `info` | `Succeeded` | `operation`, `request_id` |
//! | Registry | `warn` | `Failed` | `operation`, `request_id`, `error` |
//! | Module | `debug` | `Applied` | `module`, `operation`, `request_id`, `items` |
//! | Module | `debug` | `Superseded response dropped` / `Stale terminal ignored` | `module`, `request_id` |
//! | Module | `trace` | `Scope miss` | `module`, `operation` |
//! | Store | `info` | `Registered` / `Store reset` | `module`, `operations` / `modules` |
//! | Store actor | `info` | `Store actor started` / `Shutdown` | `modules` |
//!
//! ## Usage Examples
//!
//! ```bash
//! # Operation outcomes only
//! RUST_LOG=info cargo run
//!
//! # Every phase and every module reaction
//! RUST_LOG=debug cargo run
//!
//! # Include scope misses
//! RUST_LOG=resource_sync=trace cargo run
//! ```
//!
//! A list refresh at `debug` reads:
//!
//! ```text
//! DEBUG Started operation=developers/list request_id=req_3 args={"page":1}
//! INFO Succeeded operation=developers/list request_id=req_3
//! DEBUG Applied module=catalog/developers operation=developers/list request_id=req_3 items=10
//! ```

/// Installs the global subscriber. Verbosity comes from `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
