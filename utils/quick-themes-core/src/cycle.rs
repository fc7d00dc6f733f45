use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::preset::Preset;

/// Why a preset list could not become a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyGroupError;

impl std::fmt::Display for EmptyGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "theme group must contain at least one preset")
    }
}

impl std::error::Error for EmptyGroupError {}

/// Presets of one theme family, cycled with `inc`/`dec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Preset>", into = "Vec<Preset>")]
pub struct Group {
    presets: NonEmpty<Preset>,
}

impl Group {
    /// Family presets followed by the trailing defaults-only entry.
    pub fn with_default_entry(presets: Vec<Preset>) -> Self {
        let presets = match NonEmpty::from_vec(presets) {
            Some(mut presets) => {
                presets.push(Preset::new());
                presets
            }
            None => NonEmpty::new(Preset::new()),
        };
        Self { presets }
    }

    pub fn try_from_vec(presets: Vec<Preset>) -> Result<Self, EmptyGroupError> {
        NonEmpty::from_vec(presets)
            .map(|presets| Self { presets })
            .ok_or(EmptyGroupError)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Appends `preset` and returns its index.
    pub fn push(&mut self, preset: Preset) -> usize {
        self.presets.push(preset);
        self.last_index()
    }
}

impl TryFrom<Vec<Preset>> for Group {
    type Error = EmptyGroupError;

    fn try_from(value: Vec<Preset>) -> Result<Self, Self::Error> {
        Self::try_from_vec(value)
    }
}

impl From<Group> for Vec<Preset> {
    fn from(value: Group) -> Self {
        value.presets.into_iter().collect()
    }
}

/// Ordered theme groups, switched with `group`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCycle(Vec<Group>);

impl ThemeCycle {
    pub const fn new(groups: Vec<Group>) -> Self {
        Self(groups)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.0.get_mut(index)
    }

    pub fn preset(&self, position: Position) -> Option<&Preset> {
        self.get(position.group)?.get(position.selection)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.preset(position).is_some()
    }
}

/// Current group and the selected preset inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub group: usize,
    pub selection: usize,
}

impl Position {
    pub const fn new(group: usize, selection: usize) -> Self {
        Self { group, selection }
    }
}

/// Persisted cycle together with the position inside it.
///
/// Invariant once normalized: `position` addresses a preset of `cycle`, or
/// is `(0, 0)` when `cycle` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleState {
    pub cycle: ThemeCycle,
    pub position: Position,
}

impl CycleState {
    pub const fn new(cycle: ThemeCycle, position: Position) -> Self {
        Self { cycle, position }
    }

    /// Resets the position to `(0, 0)` unless it addresses a preset.
    ///
    /// Returns whether a reset happened.
    pub fn normalize(&mut self) -> bool {
        if self.cycle.contains(self.position) || self.position == Position::default() {
            return false;
        }
        self.position = Position::default();
        true
    }

    pub fn selected(&self) -> Option<&Preset> {
        self.cycle.preset(self.position)
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.cycle.get(self.position.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_entry_closes_every_group() {
        let group = Group::with_default_entry(vec![Preset::color_scheme("a.tmTheme")]);
        assert_eq!(group.len(), 2);
        assert_eq!(group.get(1), Some(&Preset::new()));
        assert_eq!(Group::with_default_entry(Vec::new()).len(), 1);
    }

    #[test]
    fn cycle_round_trips_as_nested_arrays() -> Result<(), serde_json::Error> {
        let value = json!([[{ "color_scheme": "a.tmTheme" }, {}], [{}]]);
        let cycle: ThemeCycle = serde_json::from_value(value.clone())?;
        assert_eq!(cycle.len(), 2);
        assert_eq!(serde_json::to_value(&cycle)?, value);
        Ok(())
    }

    #[test]
    fn empty_group_is_rejected() {
        let parsed = serde_json::from_value::<ThemeCycle>(json!([[]]));
        assert!(parsed.is_err());
    }

    #[test]
    fn normalize_resets_stale_position() {
        let cycle = ThemeCycle::new(vec![Group::with_default_entry(Vec::new())]);
        let mut state = CycleState::new(cycle, Position::new(3, 1));
        assert!(state.normalize());
        assert_eq!(state.position, Position::default());
        assert!(!state.normalize());
    }

    #[test]
    fn normalize_keeps_origin_on_empty_cycle() {
        let mut state = CycleState::default();
        assert!(!state.normalize());
        assert_eq!(state.selected(), None);
    }
}
