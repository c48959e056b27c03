//! Bridges core effects to the tracker handle and tracker events back into
//! core messages. The core and engine own separate job types so the core
//! crate stays pure; this module is where they meet.

use cloner_core::{Effect, Msg};
use cloner_engine::{TrackerEvent, TrackerHandle};
use cloner_logging::cloner_info;

pub struct EffectRunner {
    tracker: TrackerHandle,
}

impl EffectRunner {
    pub fn new(tracker: TrackerHandle) -> Self {
        Self { tracker }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob { session, url } => {
                    cloner_info!("StartJob session={session} url={url}");
                    self.tracker.start(session, url);
                }
                Effect::CancelTracking => {
                    self.tracker.cancel();
                }
            }
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.tracker.try_recv().map(map_event)
    }
}

fn map_event(event: TrackerEvent) -> Msg {
    match event {
        TrackerEvent::Submitted { session, handle } => Msg::SubmitSucceeded {
            session,
            handle: map_handle(handle),
        },
        TrackerEvent::SubmitFailed { session, error } => Msg::SubmitFailed {
            session,
            error: error.to_string(),
        },
        TrackerEvent::Snapshot { session, snapshot } => Msg::SnapshotReceived {
            session,
            snapshot: map_snapshot(snapshot),
        },
        TrackerEvent::PollFailed { session, error } => Msg::PollFailed {
            session,
            error: error.to_string(),
        },
    }
}

fn map_status(status: cloner_engine::JobStatus) -> cloner_core::JobStatus {
    match status {
        cloner_engine::JobStatus::Pending => cloner_core::JobStatus::Pending,
        cloner_engine::JobStatus::Processing => cloner_core::JobStatus::Processing,
        cloner_engine::JobStatus::Completed => cloner_core::JobStatus::Completed,
        cloner_engine::JobStatus::Failed => cloner_core::JobStatus::Failed,
    }
}

fn map_handle(handle: cloner_engine::JobHandle) -> cloner_core::JobHandle {
    cloner_core::JobHandle {
        job_id: handle.job_id,
        initial_status: map_status(handle.initial_status),
        message: handle.message,
    }
}

fn map_snapshot(snapshot: cloner_engine::JobSnapshot) -> cloner_core::JobSnapshot {
    cloner_core::JobSnapshot {
        job_id: snapshot.job_id,
        status: map_status(snapshot.status),
        original_url: snapshot.original_url,
        result_payload: snapshot.result_payload,
        error_detail: snapshot.error_detail,
    }
}
