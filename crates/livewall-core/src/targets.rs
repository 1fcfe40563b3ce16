// crates/livewall-core/src/targets.rs
//
// Target Registry: which browser theme directories an export installs into.
//
// Discovery comes from one `detect_theme_targets` call per app session. Each
// returned path is matched by substring against the two fixed vendor theme
// directories. The user's last explicit choice (persisted under PREFS_KEY)
// overrides the discovery default on every detection.
//
// `selected` is user intent only. A target that is selected but has no
// discovered path keeps its flag and is still left out of every request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Durable storage key for the selection flags.
pub const PREFS_KEY: &str = "operaLW.targets";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetId {
    Opera,
    OperaGx,
}

impl TargetId {
    /// Registry order; also the order of `ExportRequest::targets`.
    pub const ALL: [TargetId; 2] = [TargetId::Opera, TargetId::OperaGx];

    pub fn id(self) -> &'static str {
        match self {
            TargetId::Opera   => "opera",
            TargetId::OperaGx => "opera-gx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetId::Opera   => "Opera",
            TargetId::OperaGx => "Opera GX",
        }
    }

    /// Substring identifying this target's theme directory in a discovered path.
    pub fn pattern(self) -> &'static str {
        match self {
            TargetId::Opera   => "com.operasoftware.Opera/themes",
            TargetId::OperaGx => "com.operasoftware.OperaGX/themes",
        }
    }

    fn index(self) -> usize {
        match self {
            TargetId::Opera   => 0,
            TargetId::OperaGx => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id:              TargetId,
    /// None = not installed locally.
    pub discovered_path: Option<String>,
    pub selected:        bool,
}

impl Target {
    fn empty(id: TargetId) -> Self {
        Self { id, discovered_path: None, selected: false }
    }

    /// Selected and installed: the only targets that reach a request.
    pub fn is_active(&self) -> bool {
        self.selected && self.discovered_path.is_some()
    }
}

/// Persisted selection flags. Missing keys mean "no explicit choice".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opera: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gx:    Option<bool>,
}

impl TargetPrefs {
    fn get(&self, id: TargetId) -> Option<bool> {
        match id {
            TargetId::Opera   => self.opera,
            TargetId::OperaGx => self.gx,
        }
    }
}

/// Durable string key/value storage, read on detection and written on every
/// target-set construction. Last write wins.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: String);
}

/// In-memory store for headless use and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.map.insert(key.to_string(), value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detection {
    /// Not requested yet, or still in flight. Targets read as empty/unselected.
    Pending,
    Complete,
    /// Logged only; targets stay empty/unselected.
    Failed,
}

#[derive(Clone, Debug)]
pub struct TargetRegistry {
    targets:   [Target; 2],
    detection: Detection,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self {
            targets:   TargetId::ALL.map(Target::empty),
            detection: Detection::Pending,
        }
    }
}

impl TargetRegistry {
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> &Target {
        &self.targets[id.index()]
    }

    pub fn detection(&self) -> Detection {
        self.detection
    }

    /// Merge a detection reply with persisted preference.
    pub fn apply_detection(&mut self, paths: &[String], store: &dyn PreferenceStore) {
        let saved = load_prefs(store);
        for target in &mut self.targets {
            let found = paths.iter()
                .find(|p| p.replace('\\', "/").contains(target.id.pattern()))
                .cloned();
            target.selected        = found.is_some();
            target.discovered_path = found;
            if let Some(flag) = saved.and_then(|s| s.get(target.id)) {
                target.selected = flag;
            }
            debug!(
                "[targets] {} path={:?} selected={}",
                target.id.id(), target.discovered_path, target.selected,
            );
        }
        self.detection = Detection::Complete;
    }

    /// Detection failed: keep the empty/unselected state.
    pub fn mark_failed(&mut self) {
        self.detection = Detection::Failed;
    }

    /// Apply a user checkbox change. Allowed before detection completes; the
    /// detection reply then overwrites it.
    pub fn toggle(&mut self, id: TargetId, selected: bool) {
        self.targets[id.index()].selected = selected;
    }

    /// Discovered paths of the selected, installed targets, in registry order.
    ///
    /// Persists the current selection flags as a side effect.
    pub fn collect(&self, store: &mut dyn PreferenceStore) -> Vec<String> {
        self.save(store);
        self.targets.iter()
            .filter(|t| t.is_active())
            .filter_map(|t| t.discovered_path.clone())
            .collect()
    }

    fn save(&self, store: &mut dyn PreferenceStore) {
        let prefs = TargetPrefs {
            opera: Some(self.get(TargetId::Opera).selected),
            gx:    Some(self.get(TargetId::OperaGx).selected),
        };
        match serde_json::to_string(&prefs) {
            Ok(text) => store.set_string(PREFS_KEY, text),
            Err(e)   => warn!("[targets] could not encode preferences: {e}"),
        }
    }
}

/// Unreadable or malformed stored text counts as no saved choice.
fn load_prefs(store: &dyn PreferenceStore) -> Option<TargetPrefs> {
    let text = store.get_string(PREFS_KEY)?;
    match serde_json::from_str(&text) {
        Ok(p)  => Some(p),
        Err(e) => {
            warn!("[targets] ignoring malformed {PREFS_KEY}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERA: &str = "/Users/me/Library/Application Support/com.operasoftware.Opera/themes";
    const GX:    &str = "/Users/me/Library/Application Support/com.operasoftware.OperaGX/themes";

    fn both() -> Vec<String> {
        vec![OPERA.to_string(), GX.to_string()]
    }

    #[test]
    fn starts_empty_and_pending() {
        let r = TargetRegistry::default();
        assert_eq!(r.detection(), Detection::Pending);
        assert!(r.targets().iter().all(|t| !t.selected && t.discovered_path.is_none()));
    }

    #[test]
    fn discovery_selects_found_targets_by_default() {
        let mut r = TargetRegistry::default();
        r.apply_detection(&[GX.to_string()], &MemoryStore::default());
        assert!(!r.get(TargetId::Opera).selected);
        assert!(r.get(TargetId::Opera).discovered_path.is_none());
        assert!(r.get(TargetId::OperaGx).selected);
        assert_eq!(r.get(TargetId::OperaGx).discovered_path.as_deref(), Some(GX));
    }

    #[test]
    fn opera_pattern_does_not_match_gx_dir() {
        let mut r = TargetRegistry::default();
        r.apply_detection(&[GX.to_string()], &MemoryStore::default());
        assert!(r.get(TargetId::Opera).discovered_path.is_none());
    }

    #[test]
    fn windows_separators_still_match() {
        let mut r = TargetRegistry::default();
        let p = r"C:\Users\me\AppData\Roaming\com.operasoftware.Opera\themes".to_string();
        r.apply_detection(&[p.clone()], &MemoryStore::default());
        assert_eq!(r.get(TargetId::Opera).discovered_path, Some(p));
    }

    #[test]
    fn persistence_round_trip_restores_gx_only() {
        let mut store = MemoryStore::default();
        let mut r = TargetRegistry::default();
        r.apply_detection(&both(), &store);
        r.toggle(TargetId::Opera, false);
        r.toggle(TargetId::OperaGx, true);
        let targets = r.collect(&mut store);
        assert_eq!(targets, vec![GX.to_string()]);

        let mut reloaded = TargetRegistry::default();
        reloaded.apply_detection(&both(), &store);
        assert!(!reloaded.get(TargetId::Opera).selected);
        assert!(reloaded.get(TargetId::OperaGx).selected);

        let saved: TargetPrefs =
            serde_json::from_str(&store.get_string(PREFS_KEY).unwrap()).unwrap();
        assert_eq!(saved, TargetPrefs { opera: Some(false), gx: Some(true) });
    }

    #[test]
    fn selected_but_undiscovered_is_excluded() {
        let mut store = MemoryStore::default();
        let mut r = TargetRegistry::default();
        r.apply_detection(&[], &store);
        r.toggle(TargetId::Opera, true);
        assert!(r.get(TargetId::Opera).selected);
        assert!(r.collect(&mut store).is_empty());
    }

    #[test]
    fn persisted_true_survives_for_missing_target_but_never_exports() {
        let mut store = MemoryStore::default();
        store.set_string(PREFS_KEY, r#"{"opera":true,"gx":false}"#.into());
        let mut r = TargetRegistry::default();
        r.apply_detection(&[GX.to_string()], &store);
        assert!(r.get(TargetId::Opera).selected);
        assert!(!r.get(TargetId::OperaGx).selected);
        assert!(r.collect(&mut store).is_empty());
    }

    #[test]
    fn partial_prefs_only_override_named_target() {
        let mut store = MemoryStore::default();
        store.set_string(PREFS_KEY, r#"{"gx":false}"#.into());
        let mut r = TargetRegistry::default();
        r.apply_detection(&both(), &store);
        assert!(r.get(TargetId::Opera).selected);
        assert!(!r.get(TargetId::OperaGx).selected);
    }

    #[test]
    fn malformed_prefs_fall_back_to_discovery() {
        let mut store = MemoryStore::default();
        store.set_string(PREFS_KEY, "not json".into());
        let mut r = TargetRegistry::default();
        r.apply_detection(&both(), &store);
        assert!(r.get(TargetId::Opera).selected);
        assert!(r.get(TargetId::OperaGx).selected);
    }

    #[test]
    fn both_may_be_selected() {
        let mut store = MemoryStore::default();
        let mut r = TargetRegistry::default();
        r.apply_detection(&both(), &store);
        assert_eq!(r.collect(&mut store), both());
    }

    #[test]
    fn failure_keeps_empty_state() {
        let mut r = TargetRegistry::default();
        r.mark_failed();
        assert_eq!(r.detection(), Detection::Failed);
        assert!(r.targets().iter().all(|t| !t.is_active()));
    }
}
