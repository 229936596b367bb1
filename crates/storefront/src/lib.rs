//! Storehaus storefront library.
//!
//! Exposes the storefront's JSON API as a library so the binary stays thin
//! and handlers can be driven directly from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_helpers;
