//! # Nom-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the selection hot path
//! └── src/integration/  # Cross-subsystem flows
//!     ├── production_flow.rs   # spork activation switches the momentum format
//!     ├── governance_flow.rs   # plasma variable updates reach the next round
//!     └── election_flow.rs     # elected producers drive consecutive rounds
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nc-tests
//!
//! # With logs
//! RUST_LOG=debug cargo test -p nc-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p nc-tests
//! ```

pub mod integration;
