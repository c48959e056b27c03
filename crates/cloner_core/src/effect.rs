#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the URL to the remote service and start polling on success.
    StartJob {
        session: crate::SessionId,
        url: String,
    },
    /// Tear down any armed poll timer. Must tolerate no timer being armed.
    CancelTracking,
}
