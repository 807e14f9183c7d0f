//! Service layer.
//!
//! One service: the detection probe, which performs the single POST a test
//! invocation consists of and normalizes every outcome into a report.

mod detection;

pub use detection::DetectionService;
