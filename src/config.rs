use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// File extensions accepted by the scanner, without dots.
    pub extensions: Vec<String>,
    /// Directory names skipped anywhere in a path.
    pub exclude_dirs: Vec<String>,
    /// Module-specifier prefix → physical path prefix, e.g. `@/` → `src/`.
    /// Checked in insertion order.
    pub aliases: Vec<(String, String)>,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Combined in+out degree above which a node is a god object.
    pub god_object_degree: usize,
    /// Lines searched above and below a mismatched patch line.
    pub patch_fuzz_window: usize,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    extensions: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
    aliases: Option<HashMap<String, String>>,
    thresholds: Option<RawThresholds>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    god_object_degree: Option<usize>,
    patch_fuzz_window: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
            aliases: vec![("@/".to_string(), "src/".to_string())],
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            god_object_degree: 15,
            patch_fuzz_window: 5,
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].iter().map(|s| s.to_string()).collect()
}

fn default_exclude_dirs() -> Vec<String> {
    [
        "node_modules",
        "dist",
        "build",
        "out",
        ".next",
        ".turbo",
        ".git",
        "coverage",
        "__tests__",
        "__fixtures__",
        "__mocks__",
        "__snapshots__",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    /// Load `.depmap.toml` from the project root, falling back to defaults
    /// when the file is absent. Unset fields keep their default values.
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        let config_path = project_path.join(".depmap.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let raw: RawConfig = toml::from_str(&content)?;
        let defaults = Thresholds::default();

        let thresholds = match raw.thresholds {
            Some(t) => Thresholds {
                god_object_degree: t.god_object_degree.unwrap_or(defaults.god_object_degree),
                patch_fuzz_window: t.patch_fuzz_window.unwrap_or(defaults.patch_fuzz_window),
            },
            None => defaults,
        };

        let aliases = match raw.aliases {
            Some(map) => {
                let mut pairs: Vec<_> = map.into_iter().collect();
                // HashMap order is unstable; keep longest prefixes first so
                // `@components/` wins over `@/`.
                pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));
                pairs
            }
            None => vec![("@/".to_string(), "src/".to_string())],
        };

        Ok(Self {
            extensions: raw.extensions.unwrap_or_else(default_extensions),
            exclude_dirs: raw.exclude_dirs.unwrap_or_else(default_exclude_dirs),
            aliases,
            thresholds,
        })
    }
}

/// Starter `.depmap.toml` with every default spelled out.
pub fn generate_config_template() -> String {
    r#"# depmap configuration

# File extensions to analyze (without dots)
extensions = ["ts", "tsx", "js", "jsx"]

# Directory names skipped anywhere in a path
exclude_dirs = [
    "node_modules",
    "dist",
    "build",
    "out",
    ".next",
    ".turbo",
    ".git",
    "coverage",
    "__tests__",
    "__fixtures__",
    "__mocks__",
    "__snapshots__",
]

# Module-specifier prefix -> physical path prefix
[aliases]
"@/" = "src/"

[thresholds]
# Combined in+out degree above which a file is flagged as a god object
god_object_degree = 15
# Lines searched above and below a mismatched patch line
patch_fuzz_window = 5
"#
    .to_string()
}
