//! Proffy: tutor browsing core
//!
//! Teacher records, search filters, and the shared error/config types used by
//! the app services and frontends.
//!
//! ## Quick start
//!
//! ```no_run
//! use proffy::model::{FilterCriteria, WeekDay};
//!
//! let criteria = FilterCriteria::default().with_week_day(WeekDay::Monday);
//! assert_eq!(criteria.week_day.number(), 2);
//! ```

pub mod config;
pub mod error;
pub mod model;
