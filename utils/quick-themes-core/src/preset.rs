use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Setting key holding the theme file path.
pub const COLOR_SCHEME_KEY: &str = "color_scheme";

/// One selectable bundle of setting overrides.
///
/// Also used for the defaults table and for the snapshot of live settings,
/// since all three are plain setting-name to value mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset(Map<String, Value>);

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Preset pointing the color scheme at `path`.
    pub fn color_scheme(path: impl Into<String>) -> Self {
        let mut preset = Self::new();
        preset.insert(COLOR_SCHEME_KEY, Value::String(path.into()));
        preset
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The theme path this preset selects, when it is a string.
    pub fn color_scheme_path(&self) -> Option<&str> {
        self.get(COLOR_SCHEME_KEY).and_then(Value::as_str)
    }

    /// Copy of `base` with every entry of `self` laid over it.
    pub fn merged_over(&self, base: &Self) -> Self {
        let mut merged = base.clone();
        for (key, value) in &self.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Keys of `self` whose value disagrees with `snapshot`.
    ///
    /// Only keys present in `snapshot` are compared; everything else is an
    /// unmanaged setting and never counts as drift.
    pub fn mismatch(&self, snapshot: &Self) -> Mismatch {
        let keys = self
            .0
            .iter()
            .filter(|(key, value)| {
                snapshot
                    .0
                    .get(key.as_str())
                    .is_some_and(|current| current != *value)
            })
            .map(|(key, _)| key.clone())
            .collect();
        Mismatch(keys)
    }
}

impl FromIterator<(String, Value)> for Preset {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Setting keys that drifted away from a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mismatch(BTreeSet<String>);

impl Mismatch {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_prefers_preset_values() {
        let defaults = Preset::new()
            .with("color_scheme", "Default.tmTheme")
            .with("font_size", 10);
        let preset = Preset::color_scheme("X.tmTheme");
        let merged = preset.merged_over(&defaults);
        assert_eq!(
            merged,
            Preset::new()
                .with("color_scheme", "X.tmTheme")
                .with("font_size", 10)
        );
    }

    #[test]
    fn merge_leaves_base_untouched() {
        let defaults = Preset::new().with("font_size", 10);
        let _ = Preset::new().with("font_size", 12).merged_over(&defaults);
        assert_eq!(defaults.get("font_size"), Some(&json!(10)));
    }

    #[test]
    fn mismatch_reports_changed_values() {
        let snapshot = Preset::new()
            .with("color_scheme", "Y.tmTheme")
            .with("font_size", 10);
        let preset = Preset::new()
            .with("color_scheme", "X.tmTheme")
            .with("font_size", 10);
        let mismatch = preset.mismatch(&snapshot);
        assert_eq!(mismatch.keys().collect::<Vec<_>>(), vec!["color_scheme"]);
    }

    #[test]
    fn mismatch_ignores_unmanaged_keys() {
        let snapshot = Preset::new().with("color_scheme", "X.tmTheme");
        let preset = Preset::color_scheme("X.tmTheme").with("line_padding_top", 2);
        assert!(preset.mismatch(&snapshot).is_empty());
    }

    #[test]
    fn empty_preset_never_mismatches() {
        let snapshot = Preset::new().with("color_scheme", "X.tmTheme");
        assert!(Preset::new().mismatch(&snapshot).is_empty());
    }

    #[test]
    fn serializes_as_plain_object() -> Result<(), serde_json::Error> {
        let preset = Preset::color_scheme("X.tmTheme");
        assert_eq!(
            serde_json::to_value(&preset)?,
            json!({ "color_scheme": "X.tmTheme" })
        );
        Ok(())
    }
}
