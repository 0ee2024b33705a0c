use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".codeauthrc.json";

/// One import alias, e.g. `@` → `src`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AliasConfig {
    /// Specifier prefix, matched when followed by `/`.
    pub prefix: String,
    /// Target directory. Relative targets are resolved against the source root.
    pub target: String,
}

impl AliasConfig {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_output_file", alias = "codeFilePath")]
    pub output_file: String,
    #[serde(default = "default_aliases")]
    pub aliases: Vec<AliasConfig>,
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
    #[serde(default = "default_messages_file")]
    pub messages_file: String,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_output_file() -> String {
    "projectCodePermissions.json".to_string()
}

fn default_aliases() -> Vec<AliasConfig> {
    vec![AliasConfig::new("@", "src"), AliasConfig::new("~", "src")]
}

fn default_ignore_files() -> Vec<String> {
    ["node_modules", "assets"].map(String::from).to_vec()
}

fn default_messages_file() -> String {
    "src/i18n/locale/zh-CN.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            output_file: default_output_file(),
            aliases: default_aliases(),
            ignore_files: default_ignore_files(),
            messages_file: default_messages_file(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns in `ignores`/`includes` and malformed alias prefixes.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for alias in &self.aliases {
            if alias.prefix.is_empty() {
                bail!("Alias prefix in 'aliases' must not be empty");
            }
            if alias.prefix.ends_with('/') {
                bail!(
                    "Alias prefix in 'aliases' must not end with '/': \"{}\"",
                    alias.prefix
                );
            }
        }

        Ok(())
    }

    /// Resolve the output file against the project root.
    pub fn output_path(&self, root_dir: &Path) -> PathBuf {
        crate::utils::absolutize(root_dir, Path::new(&self.output_file))
    }

    /// Resolve the translation table file against the project root.
    pub fn messages_path(&self, root_dir: &Path) -> PathBuf {
        crate::utils::absolutize(root_dir, Path::new(&self.messages_file))
    }
}

/// Check if a pattern contains glob wildcards (`*` or `?`).
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
