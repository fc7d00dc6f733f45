use std::path::{Path, PathBuf};

use crate::discover::DirectoryThemeSource;
use crate::name::DEFAULT_THEME_EXTENSION;

pub const USER_DIR: &str = "User";
pub const PLUGIN_SETTINGS_FILE: &str = "QuickThemes.sublime-settings";
pub const BASE_SETTINGS_FILE: &str = "Base File.sublime-settings";

/// Where themes are scanned and where both settings files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickThemesConfig {
    packages_path: PathBuf,
    plugin_settings_path: PathBuf,
    base_settings_path: PathBuf,
    theme_extension: String,
}

impl QuickThemesConfig {
    /// Editor layout: settings files sit in `<packages>/User`.
    pub fn new(packages_path: impl Into<PathBuf>) -> Self {
        let packages_path = packages_path.into();
        let settings_dir = packages_path.join(USER_DIR);
        Self {
            plugin_settings_path: settings_dir.join(PLUGIN_SETTINGS_FILE),
            base_settings_path: settings_dir.join(BASE_SETTINGS_FILE),
            packages_path,
            theme_extension: DEFAULT_THEME_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_settings_dir(mut self, settings_dir: &Path) -> Self {
        self.plugin_settings_path = settings_dir.join(PLUGIN_SETTINGS_FILE);
        self.base_settings_path = settings_dir.join(BASE_SETTINGS_FILE);
        self
    }

    #[must_use]
    pub fn with_theme_extension(mut self, extension: impl Into<String>) -> Self {
        self.theme_extension = extension.into();
        self
    }

    pub fn packages_path(&self) -> &Path {
        &self.packages_path
    }

    pub fn plugin_settings_path(&self) -> &Path {
        &self.plugin_settings_path
    }

    pub fn base_settings_path(&self) -> &Path {
        &self.base_settings_path
    }

    pub fn theme_extension(&self) -> &str {
        &self.theme_extension
    }

    pub fn theme_source(&self) -> DirectoryThemeSource {
        DirectoryThemeSource::new(&self.packages_path, &self.theme_extension)
    }
}
