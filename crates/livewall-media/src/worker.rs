// crates/livewall-media/src/worker.rs
//
// CommandWorker: runs backend calls off the UI thread.
// All public API that livewall-ui calls lives here.
//
// Each call gets its own short-lived thread (the backend is a separate process,
// so the thread just blocks on it). Results come back tagged with the identity
// the caller supplied; matching them against current state is the
// coordinator's job, not ours.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use livewall_core::coordinator::Backend;
use livewall_core::error::BackendError;
use livewall_core::media_types::{BackendResult, ExportRequest};

use crate::bridge::BridgeCommand;
use crate::protocol::{self, BridgeRequest};

/// Result channel depth. Calls are user-paced, so this never fills in practice.
const RESULT_CAPACITY: usize = 64;

pub struct CommandWorker {
    /// Completed calls, drained by the UI once per frame.
    pub rx:    Receiver<BackendResult>,
    tx:        Sender<BackendResult>,
    bridge:    Arc<BridgeCommand>,
    shutdown:  Arc<AtomicBool>,
    /// Call ids whose thread has not reported yet.
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl CommandWorker {
    pub fn new(bridge: BridgeCommand) -> Self {
        let (tx, rx) = bounded(RESULT_CAPACITY);
        info!("[bridge] backend program {}", bridge.program.display());
        Self {
            rx,
            tx,
            bridge:    Arc::new(bridge),
            shutdown:  Arc::new(AtomicBool::new(false)),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Calls issued but not yet answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Stop issuing new process calls. Threads already blocked on a backend
    /// process finish normally; any that have not started report ShuttingDown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let pending = self.in_flight();
        if pending > 0 {
            info!("[bridge] shutting down with {pending} call(s) in flight");
        }
    }

    fn dispatch<F>(&self, call_id: Uuid, req: BridgeRequest, finish: F)
    where
        F: FnOnce(Result<Value, BackendError>) -> BackendResult + Send + 'static,
    {
        let tx        = self.tx.clone();
        let sd        = Arc::clone(&self.shutdown);
        let bridge    = Arc::clone(&self.bridge);
        let in_flight = Arc::clone(&self.in_flight);

        // Register before spawning so in_flight() never under-counts.
        in_flight.lock().insert(call_id);

        thread::spawn(move || {
            let reply = if sd.load(Ordering::Relaxed) {
                Err(BackendError::ShuttingDown)
            } else {
                debug!("[bridge] → {} ({call_id})", req.name());
                bridge.call(&req)
            };
            let result = finish(reply);
            in_flight.lock().remove(&call_id);
            // Receiver gone means the app is closing; nothing left to tell.
            let _ = tx.send(result);
        });
    }
}

impl Backend for CommandWorker {
    fn probe_video(&self, session: Uuid, path: PathBuf) {
        let req = BridgeRequest::ProbeVideo { path: path.to_string_lossy().into_owned() };
        self.dispatch(session, req, move |reply| BackendResult::Probed {
            session,
            path,
            result: reply.and_then(protocol::decode_probe),
        });
    }

    fn detect_theme_targets(&self) {
        self.dispatch(Uuid::new_v4(), BridgeRequest::DetectThemeTargets, |reply| {
            BackendResult::TargetsDetected(reply.and_then(protocol::decode_targets))
        });
    }

    fn export_package(&self, job_id: Uuid, req: ExportRequest) {
        self.dispatch(job_id, BridgeRequest::ExportPackage { req }, move |reply| {
            BackendResult::Exported {
                job_id,
                result: reply.and_then(protocol::decode_export),
            }
        });
    }
}
