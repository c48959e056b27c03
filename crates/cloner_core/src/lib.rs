//! Cloner core: pure job-tracking state machine and view-model projection.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{ActiveJob, TrackerPhase, TrackerState};
pub use types::{JobHandle, JobId, JobSnapshot, JobStatus, SessionId};
pub use update::update;
pub use view_model::CloneViewModel;
