//! Domain model
//!
//! Teacher records as served by the classes API and the search filter form.

pub mod filter;
pub mod teacher;

pub use filter::{format_time, parse_time, FilterCriteria, WeekDay};
pub use teacher::{FavoriteIds, ScheduleEntry, Teacher, TeacherId};
