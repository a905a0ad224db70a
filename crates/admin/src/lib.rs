//! Qotore Admin library.
//!
//! This crate provides the back-office API as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gmail;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod supabase;
