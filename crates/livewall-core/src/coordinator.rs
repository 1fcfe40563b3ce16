// crates/livewall-core/src/coordinator.rs
//
// ExportCoordinator: the session state machine and request builder.
//
//   Idle ──FileSelected──▶ Probing ──Probed ok──▶ Ready ──Submit──▶ Exporting
//                             │                     ▲                 │
//                             └──Probed err──▶ Failed ──Submit────────┤
//                                                                    ▼
//                                                          Done | Failed
//
// A FileSelected in any state replaces the session outright. Completions are
// matched against the identity captured when the call was issued (session id
// and path for probes, job id for exports); anything else is stale and
// dropped. There is no other cancellation.
//
// Single-threaded: handle() and ingest() are called from the UI thread only.
// The Backend starts calls and returns immediately; their results come back
// later through ingest().

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::commands::{SessionCommand, TrimField};
use crate::error::SubmitError;
use crate::helpers::badges::{self, Badge};
use crate::helpers::time::parse_field;
use crate::media_types::{BackendResult, ExportRequest};
use crate::state::{Lifecycle, Notice, Session, SizeSelection, TrimFields};
use crate::targets::{Detection, PreferenceStore, TargetRegistry};
use crate::trim;

/// Name used when the source path has no usable file stem.
const FALLBACK_NAME: &str = "wallpaper";

/// The three external commands. Each call must return without blocking and
/// deliver exactly one matching BackendResult later.
pub trait Backend {
    fn probe_video(&self, session: Uuid, path: PathBuf);
    fn detect_theme_targets(&self);
    fn export_package(&self, job_id: Uuid, req: ExportRequest);
}

/// Read-only snapshot handed to the UI panels each frame.
pub struct SessionView<'a> {
    pub session:    Option<&'a Session>,
    pub sizes:      &'a SizeSelection,
    pub targets:    &'a TargetRegistry,
    pub notice:     &'a Notice,
    pub badges:     Vec<Badge>,
    /// Install button enabled.
    pub can_submit: bool,
    /// An export call is in flight, possibly for a superseded session.
    pub exporting:  bool,
}

pub struct ExportCoordinator<B: Backend> {
    backend:          B,
    store:            Box<dyn PreferenceStore>,
    session:          Option<Session>,
    sizes:            SizeSelection,
    targets:          TargetRegistry,
    detect_requested: bool,
    /// The one export call allowed in flight, whichever session issued it.
    export_in_flight: Option<Uuid>,
    notice:           Notice,
}

impl<B: Backend> ExportCoordinator<B> {
    pub fn new(backend: B, store: Box<dyn PreferenceStore>) -> Self {
        Self {
            backend,
            store,
            session:          None,
            sizes:            SizeSelection::default(),
            targets:          TargetRegistry::default(),
            detect_requested: false,
            export_in_flight: None,
            notice:           Notice::default(),
        }
    }

    /// Kick off target detection. Only the first call per coordinator does anything.
    pub fn start(&mut self) {
        if self.detect_requested {
            return;
        }
        self.detect_requested = true;
        debug!("[targets] detection requested");
        self.backend.detect_theme_targets();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sizes(&self) -> &SizeSelection {
        &self.sizes
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Export is permitted once a path is set, except while its probe is in
    /// flight or any export call is still running. A failed probe does not
    /// block it.
    pub fn can_submit(&self) -> bool {
        self.export_in_flight.is_none()
            && self.session.as_ref()
                .is_some_and(|s| s.lifecycle != Lifecycle::Probing)
    }

    /// Some external call is outstanding; the UI keeps polling while true.
    pub fn is_busy(&self) -> bool {
        self.export_in_flight.is_some()
            || self.session.as_ref().is_some_and(|s| s.lifecycle == Lifecycle::Probing)
            || (self.detect_requested && self.targets.detection() == Detection::Pending)
    }

    pub fn view(&self) -> SessionView<'_> {
        let badges = match &self.session {
            Some(s) => match (&s.metadata, &s.probe_error) {
                (Some(meta), _)    => badges::summary(&s.path, meta),
                (None, Some(err))  => vec![badges::probe_failed(err)],
                (None, None)       => Vec::new(),
            },
            None => Vec::new(),
        };
        SessionView {
            session:    self.session.as_ref(),
            sizes:      &self.sizes,
            targets:    &self.targets,
            notice:     &self.notice,
            badges,
            can_submit: self.can_submit(),
            exporting:  self.export_in_flight.is_some(),
        }
    }

    pub fn handle(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::FileSelected(path) => self.intake(path),

            SessionCommand::TrimEdited { field, text } => {
                // No lifecycle change; values are parsed and clamped at submit.
                if let Some(s) = self.session.as_mut() {
                    match field {
                        TrimField::Start => s.trim.start = text,
                        TrimField::End   => s.trim.end   = text,
                    }
                }
            }

            SessionCommand::TargetToggled { target, selected } => {
                self.targets.toggle(target, selected);
            }

            SessionCommand::SizeSelected { size, checked } => {
                self.sizes.set(size, checked);
            }

            SessionCommand::SubmitRequested => {
                if let Err(e) = self.submit() {
                    match e {
                        SubmitError::NoFile | SubmitError::Busy => {
                            debug!("[export] submit ignored: {e}");
                        }
                        SubmitError::EmptyTrimWindow { .. } => {
                            info!("[export] submit rejected: {e}");
                            self.notice = Notice::Rejected(e.to_string());
                        }
                    }
                }
            }
        }
    }

    fn intake(&mut self, path: PathBuf) {
        if path.as_os_str().is_empty() {
            warn!("[intake] ignoring empty path");
            return;
        }

        // Supersede whatever came before, regardless of its state.
        let mut session = Session::new(path.clone());
        session.lifecycle = Lifecycle::Probing;
        let id = session.id;
        self.notice = Notice::Selected(session.file_name());
        self.session = Some(session);

        info!("[probe] session {id} ← {}", path.display());
        self.backend.probe_video(id, path);
    }

    /// Validate, build and dispatch one export request. Returns the job id.
    pub fn submit(&mut self) -> Result<Uuid, SubmitError> {
        let req = self.build_request()?;
        let job_id = Uuid::new_v4();

        if let Some(s) = self.session.as_mut() {
            s.lifecycle  = Lifecycle::Exporting;
            s.export_job = Some(job_id);
        }
        self.export_in_flight = Some(job_id);
        self.notice = Notice::Exporting;

        info!(
            "[export] job {job_id}: {} [{}s, {}s] sizes={:?} targets={}",
            req.path, req.start, req.end, req.sizes, req.targets.len(),
        );
        self.backend.export_package(job_id, req);
        Ok(job_id)
    }

    /// Build the request for the current session. Persists the target
    /// selection as a side effect once validation has passed.
    pub fn build_request(&mut self) -> Result<ExportRequest, SubmitError> {
        let session = self.session.as_ref().ok_or(SubmitError::NoFile)?;
        if self.export_in_flight.is_some() || session.lifecycle == Lifecycle::Probing {
            return Err(SubmitError::Busy);
        }

        let (start, end) = trim_window(session)?;
        let targets = self.targets.collect(&mut *self.store);

        Ok(ExportRequest {
            path:  session.path.to_string_lossy().into_owned(),
            start,
            end,
            sizes: self.sizes.heights(),
            name:  package_name(&session.path),
            targets,
        })
    }

    pub fn ingest(&mut self, result: BackendResult) {
        match result {
            BackendResult::Probed { session: id, path, result } => {
                let Some(session) = self.session.as_mut()
                    .filter(|s| s.id == id && s.path == path && s.lifecycle == Lifecycle::Probing)
                else {
                    debug!("[probe] dropping stale result for {}", path.display());
                    return;
                };

                match result.and_then(|meta| meta.validate().map(|()| meta)) {
                    Ok(meta) => {
                        let plan = trim::plan(meta.duration);
                        info!(
                            "[probe] {:.2}s {}x{} @ {:.2} fps vfr={} → trim {}..{} visible={}",
                            meta.duration, meta.width, meta.height, meta.fps, meta.vfr,
                            plan.start, plan.end, plan.visible,
                        );
                        session.trim        = TrimFields::from_plan(plan);
                        session.metadata    = Some(meta);
                        session.probe_error = None;
                        session.lifecycle   = Lifecycle::Ready;
                    }
                    Err(e) => {
                        warn!("[probe] {} failed: {e}", path.display());
                        session.metadata    = None;
                        session.probe_error = Some(e.to_string());
                        session.lifecycle   = Lifecycle::Failed;
                    }
                }
            }

            BackendResult::TargetsDetected(Ok(paths)) => {
                info!("[targets] detected {} theme dir(s)", paths.len());
                self.targets.apply_detection(&paths, &*self.store);
            }
            BackendResult::TargetsDetected(Err(e)) => {
                warn!("[targets] detection failed: {e}");
                self.targets.mark_failed();
            }

            BackendResult::Exported { job_id, result } => {
                if self.export_in_flight != Some(job_id) {
                    debug!("[export] dropping stale result for job {job_id}");
                    return;
                }
                self.export_in_flight = None;

                // The issuing session may have been superseded by a newer intake;
                // the outcome is still reported but only its owner changes state.
                let owner = self.session.as_mut().filter(|s| s.export_job == Some(job_id));
                match result {
                    Ok(resp) => {
                        info!("[export] job {job_id} done → {}", resp.zip_path);
                        if let Some(s) = owner {
                            s.lifecycle = Lifecycle::Done;
                        }
                        self.notice = Notice::Done(resp.zip_path);
                    }
                    Err(e) => {
                        warn!("[export] job {job_id} failed: {e}");
                        if let Some(s) = owner {
                            s.lifecycle = Lifecycle::Failed;
                        }
                        self.notice = Notice::ExportFailed(e.to_string());
                    }
                }
            }
        }
    }
}

/// Parsed and clamped trim window for dispatch.
///
/// With a known positive duration both ends are clamped into [0, duration] and
/// an empty window is rejected, but only while the trim fields are editable.
/// Without one (probe failed or reported 0) the values are only floored at 0;
/// the backend reads end == 0 as "to the end".
fn trim_window(session: &Session) -> Result<(f64, f64), SubmitError> {
    let start = non_negative(parse_field(&session.trim.start));
    let end   = non_negative(parse_field(&session.trim.end));

    match session.metadata.as_ref().map(|m| m.duration).filter(|d| *d > 0.0) {
        Some(duration) => {
            let start = start.min(duration);
            let end   = end.min(duration);
            // Hidden fields carry the planned whole-clip window, which truncates
            // to 0 for clips under a tenth of a second.
            if session.trim.visible && end <= start {
                return Err(SubmitError::EmptyTrimWindow { start, end });
            }
            Ok((start, end))
        }
        None => Ok((start, end)),
    }
}

fn non_negative(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

/// Source file name with its last extension stripped.
///
/// A dot-only name such as `.mp4` is all extension and gets the fallback.
fn package_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .filter(|s| !(s.starts_with('.') && !s[1..].contains('.')))
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}
