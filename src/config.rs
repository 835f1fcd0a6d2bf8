//! Repository configuration (`.git/config`)
//!
//! Only the `[core]` section is understood. The file is rendered in the
//! INI layout git itself reads:
//!
//! ```text
//! [core]
//! repositoryformatversion = 0
//! filemode = false
//! bare = false
//! ```

use crate::{Error, Result};
use std::path::Path;

/// The only repository format this crate reads and writes
pub const REPOSITORY_FORMAT_VERSION: u32 = 0;

/// Settings from the `[core]` section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoConfig {
    pub repository_format_version: u32,
    pub filemode: bool,
    pub bare: bool,
}

impl Default for RepoConfig {
    fn default() -> Self {
        RepoConfig {
            repository_format_version: REPOSITORY_FORMAT_VERSION,
            filemode: false,
            bare: false,
        }
    }
}

impl RepoConfig {
    pub fn render(&self) -> String {
        format!(
            "[core]\nrepositoryformatversion = {}\nfilemode = {}\nbare = {}\n\n",
            self.repository_format_version, self.filemode, self.bare
        )
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut config = RepoConfig::default();
        let mut section = String::new();
        let mut seen_version = false;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[') {
                let name = name.strip_suffix(']').ok_or_else(|| {
                    Error::Config(format!("line {}: unterminated section header", lineno + 1))
                })?;
                section = name.trim().to_ascii_lowercase();
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim()))
                .ok_or_else(|| {
                    Error::Config(format!("line {}: expected `key = value`", lineno + 1))
                })?;

            if section != "core" {
                continue;
            }

            match key.as_str() {
                "repositoryformatversion" => {
                    config.repository_format_version = value.parse().map_err(|_| {
                        Error::Config(format!(
                            "line {}: invalid repositoryformatversion {:?}",
                            lineno + 1,
                            value
                        ))
                    })?;
                    seen_version = true;
                }
                "filemode" => config.filemode = parse_bool(value, lineno)?,
                "bare" => config.bare = parse_bool(value, lineno)?,
                _ => {}
            }
        }

        if !seen_version {
            return Err(Error::Config(
                "core.repositoryformatversion is not set".into(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

fn parse_bool(value: &str, lineno: usize) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::Config(format!(
            "line {}: invalid boolean {:?}",
            lineno + 1,
            value
        ))),
    }
}
