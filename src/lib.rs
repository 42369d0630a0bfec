//! Library crate for uservault.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote data gateway for the users REST API (`api`)
//! - Application state controller (`controller`)
//! - Application state, routes, and the update loop (`app`)
//! - Error and result types (`error`)
//! - User record types (`model`)
//! - Form validation (`validate`)
//! - In-memory search helpers (`search`)
//! - PDF report export (`export`)
//! - UI rendering (`ui`)
//!
//! It is used by the `uservault` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod controller;
pub mod error;
pub mod export;
pub mod model;
pub mod search;
pub mod ui;
pub mod validate;

// Re-export commonly used items at the crate root for convenience
pub use error::{AppError, Result};
pub use model::{User, UserFields};
