//! costa-schedule: free-text schedule extraction for catalog items.

pub mod extract;
pub mod types;

pub use extract::ScheduleExtractor;
pub use types::ScheduleEntry;
