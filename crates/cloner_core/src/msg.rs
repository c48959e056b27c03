#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for cloning.
    SubmitClicked,
    /// Remote service accepted the submission and issued a handle.
    SubmitSucceeded {
        session: crate::SessionId,
        handle: crate::JobHandle,
    },
    /// Submission failed at the transport layer; no timer was armed.
    SubmitFailed {
        session: crate::SessionId,
        error: String,
    },
    /// A poll cycle observed the job.
    SnapshotReceived {
        session: crate::SessionId,
        snapshot: crate::JobSnapshot,
    },
    /// A poll cycle failed at the transport layer; polling has stopped.
    PollFailed {
        session: crate::SessionId,
        error: String,
    },
    /// User clicked Start Over, or the observing component tore down.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
