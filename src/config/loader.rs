//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StackError, StackResult};
use crate::infrastructure::fs::user_config_dir;

use super::types::{AppSection, Config, ConfigFile};

pub const ENV_OUTDIR: &str = "TERRASTACK_OUTDIR";
pub const ENV_LOG: &str = "TERRASTACK_LOG";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Turn `serde_ignored` paths into warnings for `file`.
pub fn unknown_key_warnings(
    file: &Path,
    content: &str,
    unknown_paths: Vec<String>,
) -> Vec<ConfigWarning> {
    unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: file.to_path_buf(),
            }
        })
        .collect()
}

/// Load a user config file and collect unknown-key warnings.
pub fn load_with_warnings(path: &Path) -> StackResult<(ConfigFile, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let config: ConfigFile = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StackError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_key_warnings(path, &content, unknown_paths);
    Ok((config, warnings))
}

/// Read only the `[app]` table of a project stack file.
///
/// Returns `None` when the file does not exist. Other tables are skipped
/// without warnings; they belong to the stack file loader.
pub fn project_section(path: &Path) -> StackResult<Option<AppSection>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content).map_err(|e| StackError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(file.app))
}

/// Resolve configuration from defaults, user config, the project's `[app]`
/// table and environment variables.
///
/// CLI flags are applied by the caller on top of the result.
pub fn load(project: Option<&AppSection>) -> StackResult<(Config, Vec<ConfigWarning>)> {
    let mut config = Config::default();
    let mut warnings = Vec::new();

    if let Some(dir) = user_config_dir() {
        let user_config = dir.join("config.toml");
        if user_config.is_file() {
            let (file, mut user_warnings) = load_with_warnings(&user_config)?;
            config.apply(&file.app);
            warnings.append(&mut user_warnings);
        }
    }

    if let Some(project) = project {
        config.apply(project);
    }

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (`TERRASTACK_*`)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Some(outdir) = std::env::var_os(ENV_OUTDIR).filter(|v| !v.is_empty()) {
        config.outdir = PathBuf::from(outdir);
    }

    if let Ok(log) = std::env::var(ENV_LOG) {
        if !log.trim().is_empty() {
            config.log = log;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "app",
        "outdir",
        "log",
        "stack",
        "name",
        "providers",
        "source",
        "version",
        "alias",
        "assets",
        "id",
        "path",
        "type",
        "resources",
        "outputs",
        "value",
        "description",
        "sensitive",
        "modules",
        "inputs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist > 0 && dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
