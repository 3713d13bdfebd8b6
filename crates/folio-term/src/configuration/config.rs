#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiBaseUrl,
    ConfigFile,
    LogLevel,
    ResumeDownload,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default_config_path() -> path::PathBuf {
        #[allow(unused_assignments, unused_mut)]
        let mut config_dir = dirs::config_dir();

        #[cfg(target_os = "macos")]
        {
            config_dir = dirs::home_dir().map(|home| home.join(".config"));
        }

        return config_dir
            .unwrap_or_else(|| path::PathBuf::from("."))
            .join("folio/config.toml");
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::ApiBaseUrl => DEFAULT_API_BASE_URL.to_string(),
            ConfigKey::LogLevel => "info".to_string(),
            ConfigKey::ResumeDownload => "".to_string(),

            // Special
            ConfigKey::ConfigFile => Config::default_config_path()
                .to_string_lossy()
                .to_string(),
        };

        return res;
    }

    fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&clap::Arg> {
        return cmd
            .get_arguments()
            .find(|e| e.get_long() == Some(key.to_string().as_str()));
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        return Config::find_arg(cmd, key)
            .map(|arg| {
                arg.get_possible_values()
                    .iter()
                    .map(|value| value.get_name().to_string())
                    .collect()
            })
            .unwrap_or_default();
    }

    /// `--config-file` wins over the default location.
    fn config_file(arg_matches: &[&ArgMatches]) -> path::PathBuf {
        let from_args = arg_matches.iter().rev().find_map(|matches| {
            matches
                .try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
                .ok()
                .flatten()
                .filter(|file| !file.is_empty())
                .cloned()
        });

        return path::PathBuf::from(
            from_args.unwrap_or_else(|| Config::default(ConfigKey::ConfigFile)),
        );
    }

    /// Applies string and integer values from `config.toml`, validated
    /// against the matching flag's possible values.
    fn apply_file(cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter().filter(|key| *key != ConfigKey::ConfigFile) {
            let Some(item) = doc.get(&key.to_string()) else {
                continue;
            };

            if let Some(number) = item.as_integer() {
                Config::set(key, &number.to_string());
                continue;
            }

            let Some(value) = item.as_str().filter(|value| !value.is_empty()) else {
                continue;
            };

            let allowed = Config::possible_values(cmd, key);
            if !allowed.is_empty() && !allowed.iter().any(|e| e == value) {
                bail!(
                    "config.toml has an invalid value for key '{key}': {value}\nPossible values are: {}",
                    allowed.join(", ")
                );
            }
            Config::set(key, value);
        }

        return Ok(());
    }

    fn apply_args(arg_matches: &[&ArgMatches]) {
        for matches in arg_matches {
            for key in ConfigKey::iter() {
                if let Ok(Some(value)) = matches.try_get_one::<String>(&key.to_string()) {
                    if !value.is_empty() {
                        Config::set(key, value);
                    }
                }
            }
        }
    }

    /// Resolves every key: defaults, then `config.toml`, then flags and
    /// environment variables.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        let config_path = Config::config_file(&clap_arg_matches);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            Config::apply_file(&cmd, &toml_str)?;
        }

        Config::apply_args(&clap_arg_matches);

        return Ok(());
    }

    /// Loading happens before the subscriber exists, so the resolved values
    /// are logged once logging is up.
    pub fn log_resolved() {
        tracing::info!(
            api_base_url = Config::get(ConfigKey::ApiBaseUrl),
            config_file = Config::get(ConfigKey::ConfigFile),
            log_level = Config::get(ConfigKey::LogLevel),
            resume_download = Config::get(ConfigKey::ResumeDownload),
            "config"
        );
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = Config::find_arg(&cmd, key)?;

                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let allowed = Config::possible_values(&cmd, key);
                if !allowed.is_empty() {
                    description = format!("{description} [possible values: {}]", allowed.join(", "));
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
