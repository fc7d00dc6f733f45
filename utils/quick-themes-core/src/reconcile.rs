use nvimrs_support::cycle::{next_index, prev_index};

use crate::cycle::CycleState;
use crate::discover::{SkippedEntry, ThemeSource};
use crate::preset::Preset;

/// Requested cycle movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Inc,
    Dec,
    Group,
    Reload,
    /// Unknown actions still reconcile drift and write settings back.
    Other(String),
}

impl Action {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "inc" => Self::Inc,
            "dec" => Self::Dec,
            "group" => Self::Group,
            "reload" => Self::Reload,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Group => "group",
            Self::Reload => "reload",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What drift handling did before the action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    /// The selected preset agrees with the live settings.
    InSync,
    /// Another preset of the group matched; selection moved to it.
    Matched(usize),
    /// Nothing matched; the live settings were appended at this index.
    Synthesized(usize),
    /// The cycle is empty, so there was nothing to compare against.
    NoSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub state: CycleState,
    /// Defaults with the selected preset laid over them.
    pub settings: Preset,
    pub drift: Drift,
    /// Entries a `reload` scan could not use.
    pub skipped: Vec<SkippedEntry>,
}

/// Runs one invocation of the cycle policy.
///
/// Order matters: the stale position is reset first, drift is reconciled
/// against the current group, then `action` moves the (possibly corrected)
/// position, and finally the settings to write are resolved.
pub fn reconcile(
    action: &Action,
    state: CycleState,
    defaults: &Preset,
    snapshot: &Preset,
    source: &dyn ThemeSource,
) -> Reconciliation {
    let mut state = state;
    state.normalize();
    let drift = reconcile_drift(&mut state, defaults, snapshot);
    let skipped = apply_action(action, &mut state, source);
    let settings = resolve(&state, defaults);
    Reconciliation {
        state,
        settings,
        drift,
        skipped,
    }
}

/// Matches the live settings to a preset of the current group.
///
/// Detection compares the selected preset as stored, without defaults, so a
/// preset that omits a key never drifts on it. The scan for a replacement
/// compares each preset merged over `defaults`.
fn reconcile_drift(state: &mut CycleState, defaults: &Preset, snapshot: &Preset) -> Drift {
    let Some(selected) = state.selected() else {
        return Drift::NoSelection;
    };
    if selected.mismatch(snapshot).is_empty() {
        return Drift::InSync;
    }

    let Some(group) = state.cycle.get_mut(state.position.group) else {
        return Drift::NoSelection;
    };
    let matched = group
        .iter()
        .position(|preset| preset.merged_over(defaults).mismatch(snapshot).is_empty());
    let drift = match matched {
        Some(index) => Drift::Matched(index),
        None => Drift::Synthesized(group.push(snapshot.clone())),
    };
    state.position.selection = match drift {
        Drift::Matched(index) | Drift::Synthesized(index) => index,
        Drift::InSync | Drift::NoSelection => state.position.selection,
    };
    drift
}

fn apply_action(
    action: &Action,
    state: &mut CycleState,
    source: &dyn ThemeSource,
) -> Vec<SkippedEntry> {
    match action {
        Action::Inc => {
            if let Some(group) = state.current_group()
                && let Some(next) = next_index(state.position.selection, group.len())
            {
                state.position.selection = next;
            }
        }
        Action::Dec => {
            if let Some(group) = state.current_group()
                && let Some(prev) = prev_index(state.position.selection, group.len())
            {
                state.position.selection = prev;
            }
        }
        Action::Group => {
            if let Some(next) = next_index(state.position.group, state.cycle.len()) {
                state.position.group = next;
                state.position.selection = 0;
            }
        }
        Action::Reload => {
            let discovery = source.discover();
            state.cycle = discovery.cycle;
            state.normalize();
            return discovery.skipped;
        }
        Action::Other(_) => {}
    }
    Vec::new()
}

/// Settings for the current position: defaults overlaid with the selection.
///
/// An empty cycle resolves to the defaults alone.
pub fn resolve(state: &CycleState, defaults: &Preset) -> Preset {
    state
        .selected()
        .map_or_else(|| defaults.clone(), |preset| preset.merged_over(defaults))
}
