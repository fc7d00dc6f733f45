use nvim_oxi::serde::Serializer;
use nvim_oxi::{Dictionary, Object};
use nvimrs_nvim_oxi_utils::notify;
use nvimrs_quick_themes_core::{
    Action, JsonSettingsStore, Preset, QuickThemesConfig, RunReport, StoreError, run,
};
use serde::Serialize;

use crate::args::RunArgs;

const LOG_CONTEXT: &str = "rs_quick_themes";

fn run_with_config(action: &Action, config: &QuickThemesConfig) -> Result<RunReport, StoreError> {
    let mut plugin = JsonSettingsStore::load(config.plugin_settings_path())?;
    let mut base = JsonSettingsStore::load(config.base_settings_path())?;
    run(
        action,
        &mut plugin,
        &mut base,
        &config.theme_source(),
        config.theme_extension(),
    )
}

fn report_outcome(report: &RunReport) {
    for diagnostic in &report.diagnostics {
        notify::warn(LOG_CONTEXT, &diagnostic.to_string());
    }
    if let Some(first) = report.skipped.first() {
        let message = format!(
            "skipped {} theme entries; first '{}': {}",
            report.skipped.len(),
            first.path.display(),
            first.reason
        );
        notify::warn(LOG_CONTEXT, &message);
    }
    if let Some(status) = report.status.as_deref() {
        notify::info("", status);
    }
}

fn settings_object(settings: &Preset) -> Object {
    match settings.serialize(Serializer::new()) {
        Ok(object) => object,
        Err(err) => {
            notify::warn(
                LOG_CONTEXT,
                &format!("failed to convert settings for lua: {err}"),
            );
            Object::nil()
        }
    }
}

/// Runs one command and hands the written settings back to lua.
///
/// Returns `nil` when the arguments are invalid or a settings file could
/// not be read or written.
pub fn execute(args: &Dictionary, fixed_action: Option<Action>) -> Object {
    let parsed = match RunArgs::parse(args, fixed_action) {
        Ok(value) => value,
        Err(err) => {
            notify::error(LOG_CONTEXT, &format!("invalid args: {err}"));
            return Object::nil();
        }
    };

    match run_with_config(&parsed.action, &parsed.config) {
        Ok(report) => {
            report_outcome(&report);
            settings_object(&report.settings)
        }
        Err(err) => {
            notify::error(LOG_CONTEXT, &format!("'{}' failed: {err}", parsed.action));
            Object::nil()
        }
    }
}
