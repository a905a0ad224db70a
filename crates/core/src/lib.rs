//! Qotore Core - Shared types library.
//!
//! This crate provides common types used across all Qotore components:
//! - `storefront` - Public-facing shop API
//! - `admin` - Back-office API (orders, catalog, notifications)
//! - `cli` - Command-line tools for seeding and operations
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   statuses, plus the Supabase row shapes for fragrances, orders, and
//!   user profiles
//! - [`cart`] - Pure cart arithmetic (quantity clamping, subtotal)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
