pub mod config;
pub mod log;
pub mod recorder;
pub mod scan;

pub use recorder::Recorder;
pub use scan::{ScanLogic, ScanSummary};
