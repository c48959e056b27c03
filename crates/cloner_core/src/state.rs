use crate::{JobHandle, JobSnapshot, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    #[default]
    Idle,
    Submitting,
    Tracking,
    Terminal,
}

/// Runtime record of the one job this tracker is following.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveJob {
    pub session: SessionId,
    pub url: String,
    pub handle: Option<JobHandle>,
    pub latest_snapshot: Option<JobSnapshot>,
    /// Last transport-level error; cleared on every successful fetch. Kept
    /// separate from `JobSnapshot::error_detail`, which is the service's own
    /// verdict on the job.
    pub transport_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackerState {
    url_input: String,
    validation_error: Option<String>,
    phase: TrackerPhase,
    active: Option<ActiveJob>,
    next_session: SessionId,
    dirty: bool,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn active_job(&self) -> Option<&ActiveJob> {
        self.active.as_ref()
    }

    /// Session id of the job currently being tracked, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        self.active.as_ref().map(|job| job.session)
    }

    /// Latest known snapshot; never suspends.
    pub fn latest_snapshot(&self) -> Option<&JobSnapshot> {
        self.active.as_ref().and_then(|job| job.latest_snapshot.as_ref())
    }

    pub fn transport_error(&self) -> Option<&str> {
        self.active.as_ref().and_then(|job| job.transport_error.as_deref())
    }

    /// Returns whether the state changed since the last call and clears the
    /// flag. The shell uses this to coalesce rendering.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.validation_error = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_validation_error(&mut self, reason: String) {
        self.validation_error = Some(reason);
        self.mark_dirty();
    }

    /// Allocates the next session and enters `Submitting`.
    pub(crate) fn begin_submission(&mut self, url: String) -> SessionId {
        self.next_session += 1;
        let session = self.next_session;
        self.validation_error = None;
        self.phase = TrackerPhase::Submitting;
        self.active = Some(ActiveJob {
            session,
            url,
            handle: None,
            latest_snapshot: None,
            transport_error: None,
        });
        self.mark_dirty();
        session
    }

    pub(crate) fn apply_submit_succeeded(&mut self, handle: JobHandle) {
        if let Some(job) = self.active.as_mut() {
            job.handle = Some(handle);
            self.phase = TrackerPhase::Tracking;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_snapshot(&mut self, snapshot: JobSnapshot) {
        let terminal = snapshot.status.is_terminal();
        if let Some(job) = self.active.as_mut() {
            job.latest_snapshot = Some(snapshot);
            job.transport_error = None;
            if terminal {
                self.phase = TrackerPhase::Terminal;
            }
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_transport_error(&mut self, error: String) {
        if let Some(job) = self.active.as_mut() {
            job.transport_error = Some(error);
            self.phase = TrackerPhase::Terminal;
            self.mark_dirty();
        }
    }

    /// Clears the session and returns to `Idle`. The submitted URL is kept in
    /// the input box so "try again" starts from what the user typed.
    pub(crate) fn reset(&mut self) {
        self.active = None;
        self.validation_error = None;
        self.phase = TrackerPhase::Idle;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
