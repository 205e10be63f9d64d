pub mod attendance;
pub mod payload;
pub mod sort;

pub use attendance::{AttendanceEvent, RecordResult};
pub use payload::Payload;
pub use sort::{SortKey, SortOrder};
