use std::path::{Path, PathBuf};

use nvim_oxi::Dictionary;
use nvimrs_nvim_oxi_utils::{Error as DecodeError, decode};
use nvimrs_quick_themes_core::{Action, QuickThemesConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawRunArgs {
    action: Option<String>,
    packages_path: Option<String>,
    settings_dir: Option<String>,
    extension: Option<String>,
}

/// Decoded `opts` table of one command call.
#[derive(Debug)]
pub struct RunArgs {
    pub action: Action,
    pub config: QuickThemesConfig,
}

impl RunArgs {
    /// `fixed_action` comes from the entry point (`inc`, `dec`, ...); the
    /// generic `run` entry reads `opts.action` instead.
    pub fn parse(dict: &Dictionary, fixed_action: Option<Action>) -> Result<Self, DecodeError> {
        let raw: RawRunArgs = decode::deserialize(dict)?;

        let action = match fixed_action {
            Some(action) => action,
            None => Action::parse(&decode::require_non_empty(raw.action, "action")?),
        };
        let packages_path = decode::require_non_empty(raw.packages_path, "packages_path")?;

        let mut config = QuickThemesConfig::new(PathBuf::from(packages_path));
        if let Some(settings_dir) = decode::non_empty(raw.settings_dir, "settings_dir")? {
            config = config.with_settings_dir(Path::new(&settings_dir));
        }
        if let Some(extension) = decode::non_empty(raw.extension, "extension")? {
            config = config.with_theme_extension(extension);
        }
        Ok(Self { action, config })
    }
}
