//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ledger` - ledger properties across many cart shapes
//! - `catalog_stub` - stub latency and failure injection, caching
//! - `product_flow` - product page to cart view, end to end
//!
//! Everything runs against the in-process stub catalog; no network or
//! database is needed.
