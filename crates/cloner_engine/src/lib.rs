//! Cloner engine: remote job-service client and polling driver.
mod client;
mod tracker;
mod types;

pub use client::{ClientSettings, HttpJobService, JobService};
pub use tracker::{run_tracking, TrackerHandle, TrackerSettings};
pub use types::{ClientError, JobHandle, JobSnapshot, JobStatus, SessionId, TrackerEvent};
