//! # Transaction-Monitor Test Suite
//!
//! Unified test crate for cross-subsystem behavior:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── pipeline.rs    # feed -> buffer -> store under virtual time
//!     ├── resilience.rs  # disconnects, backoff, missed accounting
//!     └── views.rs       # filters, share links and the viewport on live data
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tm-tests
//! cargo test -p tm-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
