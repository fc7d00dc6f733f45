use std::ffi::OsStr;
use std::path::Path;

use derive_more::Display;
use nvimrs_support::NonEmptyString;

/// Extension of the theme files the discoverer collects by default.
pub const DEFAULT_THEME_EXTENSION: &str = "tmTheme";

/// Family and leaf name of a theme file, as shown in status messages.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{name} ({family})")]
pub struct ThemeName {
    family: NonEmptyString,
    name: NonEmptyString,
}

impl ThemeName {
    pub const fn family(&self) -> &NonEmptyString {
        &self.family
    }

    pub const fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// Derives `(family, name)` from `.../<family>/<name>.<extension>`.
///
/// Returns `None` when the extension differs, the file has no parent
/// directory segment, or a segment is empty or not UTF-8.
pub fn theme_name(path: &Path, extension: &str) -> Option<ThemeName> {
    if path.extension()?.to_str()? != extension {
        return None;
    }
    let name = path.file_stem()?.to_str()?;
    let family = path.parent()?.file_name()?.to_str()?;
    Some(ThemeName {
        family: NonEmptyString::try_from(family).ok()?,
        name: NonEmptyString::try_from(name).ok()?,
    })
}

/// Status line for a theme path.
///
/// Falls back to the final path segment, then to the raw value, when the
/// path does not look like a theme file.
pub fn status_label(path: &str, extension: &str) -> String {
    let path_ref = Path::new(path);
    if let Some(name) = theme_name(path_ref, extension) {
        return name.to_string();
    }
    path_ref
        .file_name()
        .and_then(OsStr::to_str)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
