pub mod attendance;
pub mod dashboard;
pub mod export;
pub mod submission;
