use crate::{Effect, Msg, TrackerPhase, TrackerState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: TrackerState, msg: Msg) -> (TrackerState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One job per tracker: while a session exists the submission is
            // rejected and callers must reset first.
            if state.phase() != TrackerPhase::Idle {
                return (state, Vec::new());
            }
            match validate_url(state.url_input()) {
                Err(reason) => {
                    // ValidationError is handled entirely at this boundary;
                    // the tracker never sees the malformed input.
                    state.set_validation_error(reason);
                    Vec::new()
                }
                Ok(url) => {
                    let session = state.begin_submission(url.clone());
                    vec![Effect::StartJob { session, url }]
                }
            }
        }
        Msg::SubmitSucceeded { session, handle } => {
            if state.active_session() == Some(session) && state.phase() == TrackerPhase::Submitting
            {
                state.apply_submit_succeeded(handle);
            }
            Vec::new()
        }
        Msg::SubmitFailed { session, error } => {
            if state.active_session() == Some(session) && state.phase() == TrackerPhase::Submitting
            {
                state.apply_transport_error(error);
            }
            Vec::new()
        }
        Msg::SnapshotReceived { session, snapshot } => {
            // A result that resolves after reset carries a stale session id
            // and is discarded, so it cannot resurrect a stopped session.
            if state.active_session() == Some(session) && state.phase() == TrackerPhase::Tracking {
                state.apply_snapshot(snapshot);
            }
            Vec::new()
        }
        Msg::PollFailed { session, error } => {
            if state.active_session() == Some(session) && state.phase() == TrackerPhase::Tracking {
                state.apply_transport_error(error);
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            // Valid from every phase; on Idle it is a pure no-op.
            if state.phase() == TrackerPhase::Idle {
                Vec::new()
            } else {
                state.reset();
                vec![Effect::CancelTracking]
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Submission-boundary validation: the remote client receives only absolute
/// http(s) URLs and does not re-validate.
fn validate_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Enter a URL to clone".to_string());
    }
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(parsed.to_string()),
        Ok(parsed) => Err(format!("Unsupported URL scheme: {}", parsed.scheme())),
        Err(err) => Err(format!("Invalid URL: {err}")),
    }
}
