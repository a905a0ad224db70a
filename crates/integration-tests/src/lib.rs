//! Integration tests for Qotore.
//!
//! The tests in `tests/` exercise the library crates' pure surfaces: message
//! building, order contracts, and cart arithmetic. Nothing here talks to
//! Supabase or Gmail; end-to-end checks against a live project run from a
//! deployed environment instead.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p qotore-integration-tests
//! ```
