use std::fmt;

use serde::Deserialize;

/// Identifier for one tracking session. Every event carries the session it
/// was issued for, so consumers can discard results that resolve after the
/// session was torn down.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
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

/// What the service hands back when it accepts a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: String,
    pub initial_status: JobStatus,
    pub message: String,
}

/// Point-in-time observation of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub job_id: String,
    pub status: JobStatus,
    pub original_url: String,
    pub result_payload: Option<String>,
    pub error_detail: Option<String>,
}

/// Failures of the communication layer, independent of the job's own
/// business outcome. A Failed job status is a valid snapshot, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The service does not know the job id. During tracking this is an
    /// anomaly: a job should never disappear mid-flight.
    #[error("clone job not found")]
    NotFound,
    /// Non-2xx response; carries the server-provided detail when available.
    #[error("service error: {0}")]
    Service(String),
    /// Connectivity or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Events emitted by the polling driver for one tracking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Submitted {
        session: SessionId,
        handle: JobHandle,
    },
    SubmitFailed {
        session: SessionId,
        error: ClientError,
    },
    Snapshot {
        session: SessionId,
        snapshot: JobSnapshot,
    },
    PollFailed {
        session: SessionId,
        error: ClientError,
    },
}
