//! Quick theme cycling: discover theme files, keep a two-level
//! (group, selection) position, and reconcile it with the live settings.

pub mod config;
pub mod cycle;
pub mod discover;
pub mod name;
pub mod preset;
pub mod reconcile;
pub mod session;
pub mod store;

pub use config::QuickThemesConfig;
pub use cycle::{CycleState, EmptyGroupError, Group, Position, ThemeCycle};
pub use discover::{
    DirectoryThemeSource, Discovery, SkipReason, SkippedEntry, ThemeSource, discover,
};
pub use name::{DEFAULT_THEME_EXTENSION, ThemeName, status_label, theme_name};
pub use preset::{COLOR_SCHEME_KEY, Mismatch, Preset};
pub use reconcile::{Action, Drift, Reconciliation, reconcile, resolve};
pub use session::{Diagnostic, RunReport, run};
pub use store::{JsonSettingsStore, SettingsStore, StoreError};
