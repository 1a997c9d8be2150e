//! Backend API
//!
//! The classes search endpoint behind a trait so screens can be driven by a
//! stub in tests.

pub mod classes;
pub mod traits;

pub use classes::HttpClassesApi;
pub use traits::ClassesApi;
