//! Network operations
//!
//! HTTP client shared by API implementations.

pub mod client;

pub use client::HttpClient;
