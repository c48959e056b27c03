use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use cloner_logging::{cloner_debug, cloner_info, cloner_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{JobService, SessionId, TrackerEvent};

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    /// Fixed cadence between status fetches.
    pub poll_interval: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
        }
    }
}

enum TrackerCommand {
    Start {
        session: SessionId,
        url: String,
        token: CancellationToken,
    },
}

/// Owns the polling lifecycle for one job at a time: a command channel into
/// a dedicated runtime thread, an event channel out, and the cancellation
/// token of the active session. The token never leaves this handle.
pub struct TrackerHandle {
    cmd_tx: mpsc::Sender<TrackerCommand>,
    event_rx: mpsc::Receiver<TrackerEvent>,
    active: Mutex<Option<CancellationToken>>,
}

impl TrackerHandle {
    pub fn new(service: Arc<dyn JobService>, settings: TrackerSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<TrackerCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let TrackerCommand::Start {
                    session,
                    url,
                    token,
                } = command;
                let service = service.clone();
                let event_tx = event_tx.clone();
                let poll_interval = settings.poll_interval;
                runtime.spawn(async move {
                    run_tracking(
                        service.as_ref(),
                        session,
                        &url,
                        poll_interval,
                        token,
                        &event_tx,
                    )
                    .await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            active: Mutex::new(None),
        }
    }

    /// Begins one tracking session, tearing down any previous one first.
    /// The token is armed before the command is sent, so a `cancel` racing
    /// the start still stops the session.
    pub fn start(&self, session: SessionId, url: impl Into<String>) {
        let token = CancellationToken::new();
        {
            let mut slot = self.active.lock().expect("tracker token slot");
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
        }
        let _ = self.cmd_tx.send(TrackerCommand::Start {
            session,
            url: url.into(),
            token,
        });
    }

    /// Cancels the active session synchronously. Tolerates no session being
    /// armed and repeated calls.
    pub fn cancel(&self) {
        if let Some(token) = self.active.lock().expect("tracker token slot").take() {
            token.cancel();
        }
    }

    pub fn try_recv(&self) -> Option<TrackerEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Drives one tracking session: submit, then fetch status at the fixed
/// cadence until a terminal snapshot, a transport failure, or cancellation.
///
/// The interval's first tick completes immediately, so the first fetch does
/// not wait a full period. Each fetch is awaited before the next tick is
/// taken and missed ticks are delayed rather than burst, so poll cycles
/// never overlap even when a fetch outlasts the period. A cancelled session
/// emits nothing further.
pub async fn run_tracking(
    service: &dyn JobService,
    session: SessionId,
    url: &str,
    poll_interval: Duration,
    token: CancellationToken,
    events: &mpsc::Sender<TrackerEvent>,
) {
    let handle = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        submitted = service.submit(url) => match submitted {
            Ok(handle) => handle,
            Err(error) => {
                cloner_warn!("Session {session}: submission failed for {url}: {error}");
                let _ = events.send(TrackerEvent::SubmitFailed { session, error });
                return;
            }
        },
    };
    cloner_info!("Session {session}: job {} accepted for {url}", handle.job_id);
    let job_id = handle.job_id.clone();
    let _ = events.send(TrackerEvent::Submitted { session, handle });

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let snapshot = tokio::select! {
            biased;
            _ = token.cancelled() => return,
            fetched = service.fetch_status(&job_id) => match fetched {
                Ok(snapshot) => snapshot,
                Err(error) => {
                    // One failure ends the session; NotFound mid-tracking is
                    // an anomaly surfaced the same way, never retried.
                    cloner_warn!("Session {session}: poll failed for job {job_id}: {error}");
                    let _ = events.send(TrackerEvent::PollFailed { session, error });
                    return;
                }
            },
        };

        let terminal = snapshot.status.is_terminal();
        cloner_debug!("Session {session}: job {job_id} is {}", snapshot.status);
        let _ = events.send(TrackerEvent::Snapshot { session, snapshot });
        if terminal {
            return;
        }
    }
}
