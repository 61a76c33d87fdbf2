use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAME: &str = ".loggatorrc";

/// Configuration file handler for loggator
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Worker count, 0 meaning "use all CPUs"
    pub threads: Option<usize>,
    /// Program and leading arguments for non-file sources
    pub log_command: Option<String>,
}

impl ConfigFile {
    /// Find project-level .loggatorrc by walking up from the working directory
    pub fn find_project_config() -> Option<PathBuf> {
        Self::find_project_config_from(env::current_dir().ok()?)
    }

    fn find_project_config_from(mut dir: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = dir.join(PROJECT_CONFIG_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// User config locations, most preferred first
    pub fn get_user_config_paths() -> Vec<PathBuf> {
        Self::user_config_paths_for(
            env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            env::var_os("HOME").map(PathBuf::from),
        )
    }

    /// `$XDG_CONFIG_HOME/loggator/config.ini` (defaulting to `~/.config`),
    /// then `~/.loggatorrc`
    fn user_config_paths_for(xdg_config: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let config_dir = xdg_config
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(|| home.as_ref().map(|h| h.join(".config")));

        config_dir
            .map(|dir| dir.join("loggator").join("config.ini"))
            .into_iter()
            .chain(home.map(|h| h.join(PROJECT_CONFIG_NAME)))
            .collect()
    }

    /// Load configuration with precedence: project > user > defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // User config is the lowest precedence; only the first one found counts
        if let Some(path) = Self::get_user_config_paths()
            .into_iter()
            .find(|p| p.is_file())
        {
            config = Self::merge_configs(config, Self::load_from_path(&path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = Self::merge_configs(config, Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Load configuration with optional custom config file path
    pub fn load_with_custom_path(custom_path: Option<&Path>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse_ini_content(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse INI content from string
    fn parse_ini_content(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(anyhow!("line {}: expected 'key = value'", idx + 1));
            };
            let (key, value) = (key.trim(), value.trim());

            // Only root-level keys are known; other sections are ignored
            if !current_section.is_empty() {
                continue;
            }

            match key {
                "threads" => {
                    let threads = value.parse::<usize>().with_context(|| {
                        format!("line {}: threads must be a non-negative integer", idx + 1)
                    })?;
                    config.threads = Some(threads);
                }
                "log_command" => {
                    if value.is_empty() {
                        return Err(anyhow!("line {}: log_command must not be empty", idx + 1));
                    }
                    config.log_command = Some(value.to_string());
                }
                _ => {
                    // Ignore unknown root-level keys
                }
            }
        }

        Ok(config)
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        Self {
            threads: overlay.threads.or(base.threads),
            log_command: overlay.log_command.or(base.log_command),
        }
    }

    /// Show configuration information with precedence details
    pub fn show_config<W: Write>(out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "Configuration precedence: CLI > project .loggatorrc > user config > defaults\n"
        )?;

        let project_config_path = Self::find_project_config();
        let user_config_paths = Self::get_user_config_paths();
        let user_config_path = user_config_paths.iter().find(|p| p.is_file());

        match Self::load() {
            Ok(merged) => {
                let mut loaded_from = Vec::new();
                if let Some(project_path) = &project_config_path {
                    loaded_from.push(format!("Project: {}", project_path.display()));
                }
                if let Some(user_path) = user_config_path {
                    loaded_from.push(format!("User: {}", user_path.display()));
                }

                if loaded_from.is_empty() {
                    writeln!(out, "No configuration files found. Using defaults.")?;
                } else {
                    writeln!(out, "Configuration loaded from:")?;
                    for source in loaded_from {
                        writeln!(out, "  {}", source)?;
                    }
                }

                if merged.threads.is_some() || merged.log_command.is_some() {
                    writeln!(out, "\nActive settings:")?;
                    if let Some(threads) = merged.threads {
                        writeln!(out, "  threads = {}", threads)?;
                    }
                    if let Some(log_command) = &merged.log_command {
                        writeln!(out, "  log_command = {}", log_command)?;
                    }
                }
            }
            Err(e) => {
                writeln!(out, "Error loading configuration: {:#}", e)?;
            }
        }

        writeln!(out, "\nConfiguration search locations (in precedence order):")?;
        match &project_config_path {
            Some(path) => writeln!(out, "  1. Project: {} (found)", path.display())?,
            None => writeln!(
                out,
                "  1. Project: {} (searched up directory tree, not found)",
                PROJECT_CONFIG_NAME
            )?,
        }
        for (i, path) in user_config_paths.iter().enumerate() {
            let status = if path.is_file() {
                "(found)"
            } else {
                "(not found)"
            };
            writeln!(out, "  {}. User: {} {}", i + 2, path.display(), status)?;
        }

        if project_config_path.is_none() && user_config_path.is_none() {
            writeln!(out, "\nExample configuration file ({}):", PROJECT_CONFIG_NAME)?;
            writeln!(out)?;
            writeln!(out, "# Worker threads, 0 = one per CPU")?;
            writeln!(out, "threads = 4")?;
            writeln!(out, "# Program used when the source is not a .log file")?;
            writeln!(out, "log_command = journalctl --no-pager -o short-iso")?;
        }

        Ok(())
    }
}
