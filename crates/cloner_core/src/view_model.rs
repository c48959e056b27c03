use crate::{JobId, JobStatus, TrackerPhase, TrackerState};

/// Renderable projection of the tracker state. Pure: no hidden history, and
/// re-derivable at any time from the state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneViewModel {
    ShowSubmissionForm {
        url_input: String,
        submitting: bool,
        validation_error: Option<String>,
    },
    /// A transport-level error ended the session (submit or poll failure).
    ShowLoadingWithError { message: String },
    ShowStatus {
        status: JobStatus,
        detail: Option<String>,
        original_url: String,
        job_id: JobId,
    },
    /// Completed job with its generated document.
    ShowStatusAndPreview {
        status: JobStatus,
        original_url: String,
        job_id: JobId,
        html: String,
    },
}

impl TrackerState {
    pub fn view(&self) -> CloneViewModel {
        if let Some(message) = self.transport_error() {
            return CloneViewModel::ShowLoadingWithError {
                message: message.to_string(),
            };
        }

        if let Some(job) = self.active_job() {
            if let Some(snapshot) = job.latest_snapshot.as_ref() {
                if snapshot.status == JobStatus::Completed {
                    if let Some(html) = snapshot.result_payload.as_ref() {
                        return CloneViewModel::ShowStatusAndPreview {
                            status: snapshot.status,
                            original_url: snapshot.original_url.clone(),
                            job_id: snapshot.job_id.clone(),
                            html: html.clone(),
                        };
                    }
                }
                return CloneViewModel::ShowStatus {
                    status: snapshot.status,
                    detail: snapshot.error_detail.clone(),
                    original_url: snapshot.original_url.clone(),
                    job_id: snapshot.job_id.clone(),
                };
            }
            // Tracking but no snapshot yet: show the handle's initial status
            // with the service's submission acknowledgement.
            if let Some(handle) = job.handle.as_ref() {
                let detail = if handle.message.is_empty() {
                    None
                } else {
                    Some(handle.message.clone())
                };
                return CloneViewModel::ShowStatus {
                    status: handle.initial_status,
                    detail,
                    original_url: job.url.clone(),
                    job_id: handle.job_id.clone(),
                };
            }
        }

        CloneViewModel::ShowSubmissionForm {
            url_input: self.url_input().to_string(),
            submitting: self.phase() == TrackerPhase::Submitting,
            validation_error: self.validation_error().map(ToOwned::to_owned),
        }
    }
}
