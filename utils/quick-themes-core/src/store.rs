use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize settings for '{}': {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode theme cycle: {0}")]
    EncodeCycle(#[source] serde_json::Error),
    #[error("settings file '{}' must hold a JSON object", path.display())]
    NotAnObject { path: PathBuf },
    #[error("failed to create settings directory '{}': {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write settings file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to replace settings file '{}': {source}", path.display())]
    Replace {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Key-value settings owned by the host editor.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&Value>;

    fn set(&mut self, key: &str, value: Value);

    fn save(&self) -> Result<(), StoreError>;
}

/// Removes comments and trailing commas outside of string literals.
fn strip_relaxed_syntax(content: &str) -> String {
    let mut without_comments = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if in_string {
            without_comments.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        without_comments.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        let next = chars.peek().copied();
        match (ch, next) {
            ('"', _) => {
                in_string = true;
                without_comments.push(ch);
            }
            ('/', Some('/')) => {
                while chars.next_if(|next| *next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => without_comments.push(ch),
        }
    }

    let chars: Vec<char> = without_comments.chars().collect();
    let mut stripped = String::with_capacity(chars.len());
    let mut in_string = false;
    let mut escaped = false;
    for (index, &ch) in chars.iter().enumerate() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let closes = chars[index + 1..]
                .iter()
                .find(|next| !next.is_whitespace())
                .is_some_and(|next| matches!(next, '}' | ']'));
            if closes {
                continue;
            }
        }
        stripped.push(ch);
    }
    stripped
}

/// Settings file holding a single JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Loads `path`; a missing file starts out empty.
    ///
    /// `//` and `/* */` comments and trailing commas are accepted on read.
    /// `save` always writes strict JSON, so comments do not survive a save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    values: Map::new(),
                });
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        let content = strip_relaxed_syntax(&content);
        if content.trim().is_empty() {
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }
        let values = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(values)) => values,
            Ok(_) => return Err(StoreError::NotAnObject { path }),
            Err(source) => return Err(StoreError::Parse { path, source }),
        };
        Ok(Self { path, values })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Writes through a sibling temp file so readers never see a torn file.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut content = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        content.push('\n');

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Replace {
            path: self.path.clone(),
            source,
        })
    }
}
