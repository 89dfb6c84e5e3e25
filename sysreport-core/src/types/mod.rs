pub mod fact;
pub mod probe;
pub mod report;
pub mod severity;

pub use fact::{CheckFact, FailedCheck};
pub use probe::*;
pub use report::*;
pub use severity::{DefectSeverity, Severity, Tier};
