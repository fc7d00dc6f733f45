use serde::Deserialize;
use serde_json::Value;

use crate::cycle::{CycleState, Position, ThemeCycle};
use crate::discover::{SkippedEntry, ThemeSource};
use crate::name::status_label;
use crate::preset::Preset;
use crate::reconcile::{Action, Drift, reconcile};
use crate::store::{SettingsStore, StoreError};

pub const DEFAULTS_KEY: &str = "quick_themes_defaults";
pub const GROUP_SELECTION_KEY: &str = "quick_themes_group_selection";
pub const SELECTION_KEY: &str = "quick_themes_selection";
pub const CYCLE_KEY: &str = "quick_themes";

/// Persisted plugin state that had to be replaced with a safe value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MissingDefaults,
    InvalidDefaults,
    InvalidIndex { key: &'static str },
    InvalidCycle { message: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDefaults => write!(f, "'{DEFAULTS_KEY}' is not set; no settings are managed"),
            Self::InvalidDefaults => write!(f, "'{DEFAULTS_KEY}' must be an object; ignoring it"),
            Self::InvalidIndex { key } => {
                write!(f, "'{key}' must be a non-negative integer; using 0")
            }
            Self::InvalidCycle { message } => {
                write!(f, "'{CYCLE_KEY}' is malformed ({message}); starting from an empty cycle")
            }
        }
    }
}

/// Everything one invocation decided, for the host to report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub position: Position,
    pub settings: Preset,
    pub drift: Drift,
    /// `"<name> (<family>)"` for the resolved theme, if there is one.
    pub status: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug)]
struct LoadedState {
    defaults: Preset,
    state: CycleState,
    diagnostics: Vec<Diagnostic>,
}

fn load_defaults(plugin: &dyn SettingsStore, diagnostics: &mut Vec<Diagnostic>) -> Preset {
    match plugin.get(DEFAULTS_KEY) {
        Some(Value::Object(map)) => Preset::from_map(map.clone()),
        Some(_) => {
            diagnostics.push(Diagnostic::InvalidDefaults);
            Preset::new()
        }
        None => {
            diagnostics.push(Diagnostic::MissingDefaults);
            Preset::new()
        }
    }
}

fn load_index(
    plugin: &dyn SettingsStore,
    key: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    let Some(value) = plugin.get(key) else {
        return 0;
    };
    match value.as_u64().and_then(|raw| usize::try_from(raw).ok()) {
        Some(index) => index,
        None => {
            diagnostics.push(Diagnostic::InvalidIndex { key });
            0
        }
    }
}

fn load_cycle(plugin: &dyn SettingsStore, diagnostics: &mut Vec<Diagnostic>) -> ThemeCycle {
    let Some(value) = plugin.get(CYCLE_KEY) else {
        return ThemeCycle::default();
    };
    match ThemeCycle::deserialize(value) {
        Ok(cycle) => cycle,
        Err(err) => {
            diagnostics.push(Diagnostic::InvalidCycle {
                message: err.to_string(),
            });
            ThemeCycle::default()
        }
    }
}

fn load_state(plugin: &dyn SettingsStore) -> LoadedState {
    let mut diagnostics = Vec::new();
    let defaults = load_defaults(plugin, &mut diagnostics);
    let group = load_index(plugin, GROUP_SELECTION_KEY, &mut diagnostics);
    let selection = load_index(plugin, SELECTION_KEY, &mut diagnostics);
    let cycle = load_cycle(plugin, &mut diagnostics);
    LoadedState {
        defaults,
        state: CycleState::new(cycle, Position::new(group, selection)),
        diagnostics,
    }
}

/// Live value of every managed setting; unset settings read as `null`.
pub fn snapshot(defaults: &Preset, base: &dyn SettingsStore) -> Preset {
    defaults
        .keys()
        .map(|key| (key.to_string(), base.get(key).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Status line for the resolved settings; `None` without a theme path.
pub fn status_message(settings: &Preset, extension: &str) -> Option<String> {
    settings
        .color_scheme_path()
        .map(|path| status_label(path, extension))
}

/// One full command: load, reconcile, write both stores back.
///
/// The plugin store receives cycle and position in a single save, before
/// the base store is saved.
pub fn run(
    action: &Action,
    plugin: &mut dyn SettingsStore,
    base: &mut dyn SettingsStore,
    source: &dyn ThemeSource,
    extension: &str,
) -> Result<RunReport, StoreError> {
    let LoadedState {
        defaults,
        state,
        diagnostics,
    } = load_state(plugin);
    let live = snapshot(&defaults, base);

    let result = reconcile(action, state, &defaults, &live, source);

    for (key, value) in result.settings.iter() {
        base.set(key, value.clone());
    }
    let position = result.state.position;
    let cycle = serde_json::to_value(&result.state.cycle).map_err(StoreError::EncodeCycle)?;
    plugin.set(CYCLE_KEY, cycle);
    plugin.set(GROUP_SELECTION_KEY, Value::from(position.group));
    plugin.set(SELECTION_KEY, Value::from(position.selection));

    plugin.save()?;
    base.save()?;

    Ok(RunReport {
        position,
        status: status_message(&result.settings, extension),
        settings: result.settings,
        drift: result.drift,
        diagnostics,
        skipped: result.skipped,
    })
}
