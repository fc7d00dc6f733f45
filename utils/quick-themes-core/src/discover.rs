use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cycle::{Group, ThemeCycle};
use crate::name::theme_name;
use crate::preset::Preset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Matching extension, but no `<family>/<name>` could be derived.
    UnrecognizedPath,
    /// The walker could not read this entry.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedPath => write!(f, "no theme family in path"),
            Self::Unreadable(message) => write!(f, "unreadable: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of one scan: the rebuilt cycle plus whatever had to be left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovery {
    pub cycle: ThemeCycle,
    pub skipped: Vec<SkippedEntry>,
}

/// Where a `reload` gets its fresh cycle from.
pub trait ThemeSource {
    fn discover(&self) -> Discovery;
}

/// Scans a directory tree for theme files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryThemeSource {
    root: PathBuf,
    extension: String,
}

impl DirectoryThemeSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }
}

impl ThemeSource for DirectoryThemeSource {
    fn discover(&self) -> Discovery {
        discover(&self.root, &self.extension)
    }
}

/// Walks `root` and groups every `*.<extension>` file by its parent directory.
///
/// Symlinked theme files are collected under the link's own path; symlinked
/// directories are not descended into.
///
/// Families are ordered case-insensitively; inside a family presets keep the
/// order the walk met them in. Every group ends with an empty preset.
pub fn discover(root: &Path, extension: &str) -> Discovery {
    let mut families: BTreeMap<String, Vec<Preset>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                skipped.push(SkippedEntry {
                    path,
                    reason: SkipReason::Unreadable(err.to_string()),
                });
                continue;
            }
        };
        let path = entry.path();
        let is_file = if entry.path_is_symlink() {
            path.is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }
        if path.extension().and_then(OsStr::to_str) != Some(extension) {
            continue;
        }
        let (Some(name), Some(full_path)) = (theme_name(path, extension), path.to_str()) else {
            skipped.push(SkippedEntry {
                path: path.to_path_buf(),
                reason: SkipReason::UnrecognizedPath,
            });
            continue;
        };
        families
            .entry(name.family().as_str().to_string())
            .or_default()
            .push(Preset::color_scheme(full_path));
    }

    let mut families: Vec<(String, Vec<Preset>)> = families.into_iter().collect();
    families.sort_by_cached_key(|(family, _)| family.to_lowercase());
    let groups = families
        .into_iter()
        .map(|(_, presets)| Group::with_default_entry(presets))
        .collect();

    Discovery {
        cycle: ThemeCycle::new(groups),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::DEFAULT_THEME_EXTENSION;
    use pretty_assertions::assert_eq;
    use std::error::Error;
    use std::fs;

    fn touch(root: &Path, relative: &str) -> Result<PathBuf, Box<dyn Error>> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, "<plist/>")?;
        Ok(path)
    }

    fn scheme(path: &Path) -> Result<Preset, Box<dyn Error>> {
        let path = path.to_str().ok_or("non-utf8 temp path")?;
        Ok(Preset::color_scheme(path))
    }

    #[test]
    fn groups_by_family_sorted_case_insensitively() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let dark = touch(dir.path(), "Packages/Solarized/Solarized-Dark.tmTheme")?;
        let light = touch(dir.path(), "Packages/Solarized/Solarized-Light.tmTheme")?;
        let mariana = touch(dir.path(), "Packages/Mariana/Mariana.tmTheme")?;
        let bright = touch(dir.path(), "Packages/bright/Bright.tmTheme")?;
        touch(dir.path(), "Packages/Mariana/README.md")?;

        let discovery = discover(dir.path(), DEFAULT_THEME_EXTENSION);

        let expected = ThemeCycle::new(vec![
            Group::with_default_entry(vec![scheme(&bright)?]),
            Group::with_default_entry(vec![scheme(&mariana)?]),
            Group::with_default_entry(vec![scheme(&dark)?, scheme(&light)?]),
        ]);
        assert_eq!(discovery.cycle, expected);
        assert!(discovery.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn empty_tree_yields_empty_cycle() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "Packages/Notes/readme.txt")?;
        let discovery = discover(dir.path(), DEFAULT_THEME_EXTENSION);
        assert!(discovery.cycle.is_empty());
        Ok(())
    }

    #[test]
    fn missing_root_is_reported_not_fatal() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("missing");
        let discovery = discover(&root, DEFAULT_THEME_EXTENSION);
        assert!(discovery.cycle.is_empty());
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].path, root);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_theme_file_is_collected() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let target = touch(dir.path(), "store/nord-theme/Nord.tmTheme")?;
        let packages = dir.path().join("Packages");
        fs::create_dir_all(packages.join("Nord"))?;
        let link = packages.join("Nord").join("Nord.tmTheme");
        std::os::unix::fs::symlink(&target, &link)?;

        let discovery = discover(&packages, DEFAULT_THEME_EXTENSION);

        assert_eq!(
            discovery.cycle,
            ThemeCycle::new(vec![Group::with_default_entry(vec![scheme(&link)?])])
        );
        assert!(discovery.skipped.is_empty());
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn undecodable_theme_path_is_skipped_not_fatal() -> Result<(), Box<dyn Error>> {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir()?;
        let mariana = touch(dir.path(), "Packages/Mariana/Mariana.tmTheme")?;
        let dark = touch(dir.path(), "Packages/Solarized/Solarized-Dark.tmTheme")?;
        let broken = dir
            .path()
            .join("Packages/Solarized")
            .join(OsStr::from_bytes(b"Solarized-\xff.tmTheme"));
        fs::write(&broken, "<plist/>")?;

        let discovery = discover(&dir.path().join("Packages"), DEFAULT_THEME_EXTENSION);

        assert_eq!(
            discovery.cycle,
            ThemeCycle::new(vec![
                Group::with_default_entry(vec![scheme(&mariana)?]),
                Group::with_default_entry(vec![scheme(&dark)?]),
            ])
        );
        assert_eq!(
            discovery.skipped,
            vec![SkippedEntry {
                path: broken,
                reason: SkipReason::UnrecognizedPath,
            }]
        );
        Ok(())
    }

    #[test]
    fn honours_custom_extension() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let scheme_path = touch(dir.path(), "Mono/Mono.sublime-color-scheme")?;
        touch(dir.path(), "Mono/Mono.tmTheme")?;
        let source = DirectoryThemeSource::new(dir.path(), "sublime-color-scheme");
        let discovery = source.discover();
        assert_eq!(
            discovery.cycle,
            ThemeCycle::new(vec![Group::with_default_entry(vec![scheme(&scheme_path)?])])
        );
        Ok(())
    }
}
