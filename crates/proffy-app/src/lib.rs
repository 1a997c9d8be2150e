//! Proffy App Services
//!
//! Local storage, the classes API client, and the state behind the
//! teacher-list and favorites screens. Depends on the `proffy` core crate.

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod network;
