//! Core types for Qotore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod fragrance;
pub mod id;
pub mod order;
pub mod price;
pub mod profile;
pub mod status;

pub use email::{Email, EmailError};
pub use fragrance::{Fragrance, Variant};
pub use id::*;
pub use order::{Order, OrderItem};
pub use price::Price;
pub use profile::UserProfile;
pub use status::OrderStatus;
