//! Saved command-line defaults.
//!
//! Config files hold ordinary flag tokens (`--standalone`,
//! `--article-dir site/article`, `--perf`), any number per line, with `#`
//! comments. The global file and a local `.marksmithrc` are merged, then
//! the command line is applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "marksmith";
const LOCAL_FILE: &str = ".marksmithrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub standalone: bool,
    pub perf: bool,
    pub article_dir: Option<PathBuf>,
    pub file_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Booleans are OR-ed; for paths `other` wins when set.
    pub fn union(&self, other: &Self) -> Self {
        let pick = |a: &Option<PathBuf>, b: &Option<PathBuf>| b.clone().or_else(|| a.clone());
        Self {
            watch: self.watch || other.watch,
            standalone: self.standalone || other.standalone,
            perf: self.perf || other.perf,
            article_dir: pick(&self.article_dir, &other.article_dir),
            file_dir: pick(&self.file_dir, &other.file_dir),
            manifest: pick(&self.manifest, &other.manifest),
            render_debug_log: pick(&self.render_debug_log, &other.render_debug_log),
        }
    }

    pub fn article_dir(&self) -> PathBuf {
        self.article_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("article"))
    }

    pub fn file_dir(&self) -> PathBuf {
        self.file_dir.clone().unwrap_or_else(|| PathBuf::from("file"))
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Load flags from a config file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# marksmith defaults (saved with --save)".to_string()];
    let switches = [
        (flags.watch, "--watch"),
        (flags.standalone, "--standalone"),
        (flags.perf, "--perf"),
    ];
    lines.extend(
        switches
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, flag)| (*flag).to_string()),
    );
    let options = [
        (&flags.article_dir, "--article-dir"),
        (&flags.file_dir, "--file-dir"),
        (&flags.manifest, "--manifest"),
        (&flags.render_debug_log, "--render-debug-log"),
    ];
    for (value, flag) in options {
        if let Some(value) = value {
            lines.push(format!("{flag} {}", value.display()));
        }
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list. Unknown tokens are skipped, so raw
/// process arguments (program name, subcommand, file) can be passed as is.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" => flags.watch = true,
            "--standalone" => flags.standalone = true,
            "--perf" => flags.perf = true,
            _ => {
                let (name, inline) = match token.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (token, None),
                };
                let slot = match name {
                    "--article-dir" => &mut flags.article_dir,
                    "--file-dir" => &mut flags.file_dir,
                    "--manifest" => &mut flags.manifest,
                    "--render-debug-log" => &mut flags.render_debug_log,
                    _ => {
                        i += 1;
                        continue;
                    }
                };
                let value = match inline {
                    Some(value) => Some(value),
                    None => tokens.get(i + 1).map(|next| {
                        i += 1;
                        next.as_str()
                    }),
                };
                if let Some(value) = value {
                    *slot = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}
