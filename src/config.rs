//! Export configuration.
//!
//! Rendering options that make sense to persist can come from a
//! `velum.toml` (or `.velum.toml`) file; command-line flags override
//! whatever the file says.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk render configuration. Everything is optional in the file;
/// missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Omit dialect-specific wrappers and classes.
    pub vanilla_html: bool,
    /// Emit a full document shell with head and body tags.
    pub include_head: bool,
    /// Page title; defaults to the input file name at the CLI boundary.
    pub title: Option<String>,
    /// Raw markup appended to the head tag.
    pub extra_head_tags: Option<String>,
    /// Ask the code renderer for line numbers.
    pub code_line_numbers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vanilla_html: false,
            include_head: true,
            title: None,
            extra_head_tags: None,
            code_line_numbers: false,
        }
    }
}

const CONFIG_FILE_NAMES: [&str; 2] = ["velum.toml", ".velum.toml"];

/// Load configuration: an explicit path wins, otherwise the first
/// `velum.toml`/`.velum.toml` found walking up from `start_dir`, otherwise
/// defaults. Returns the config and the path it came from, if any.
pub fn load(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> io::Result<(RenderConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let config = read_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    for dir in start_dir.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                let config = read_config_file(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
    }

    Ok((RenderConfig::default(), None))
}

fn read_config_file(path: &Path) -> io::Result<RenderConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}
