//! Vitrine storefront library.
//!
//! Catalog access, configuration and the view models behind each screen.
//! The pure cart ledger lives in `vitrine-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod screens;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
