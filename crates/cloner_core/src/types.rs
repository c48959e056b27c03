use std::fmt;

/// Opaque job identifier assigned by the remote cloning service.
pub type JobId = String;

/// Monotonic identifier for one tracking session. Messages that arrive for a
/// session other than the active one are discarded by `update`.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Completed and Failed admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Identifier plus metadata returned by the service at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: JobId,
    pub initial_status: JobStatus,
    /// Human-readable acknowledgement from the service.
    pub message: String,
}

/// Latest known observation of a job.
///
/// `result_payload` is only meaningful when `status` is Completed and
/// `error_detail` only when it is Failed; the wire decoder upholds that a
/// snapshot never carries both for the same terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,
    pub original_url: String,
    pub result_payload: Option<String>,
    pub error_detail: Option<String>,
}
