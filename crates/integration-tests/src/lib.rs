//! Integration tests for Seagrape.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p seagrape-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cross_selling_suggestions` - End-to-end suggestion runs over
//!   in-memory rule stores and catalogs
//! - `rule_wire_format` - Wire-format compatibility and load-time
//!   validation of persisted rule documents
//!
//! The engine has no transport of its own, so these tests exercise the
//! public crate APIs the way an HTTP handler would, not a network surface.
