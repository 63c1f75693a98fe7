// Configuration loading and validation (config/dynasty.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "DYNASTY_API_BASE_URL";

const CONFIG_FILE: &str = "dynasty.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Additional attempts after a transport failure or 5xx response.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
}

impl CacheConfig {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    #[serde(default = "default_player_records_limit")]
    pub player_records_limit: u32,
    /// `chrono` strftime pattern for transaction dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            player_records_limit: default_player_records_limit(),
            date_format: default_date_format(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}

fn default_stale_secs() -> u64 {
    300
}

fn default_recent_limit() -> u32 {
    20
}

fn default_player_records_limit() -> u32 {
    10
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/dynasty.toml` relative to `base_dir`, then apply
/// the `DYNASTY_API_BASE_URL` override when `base_url_override` is set.
///
/// This does not copy defaults; see [`init_config_file`].
pub fn load_config_from(
    base_dir: &Path,
    base_url_override: Option<String>,
) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    if let Some(url) = base_url_override.filter(|url| !url.trim().is_empty()) {
        debug!("api.base_url overridden by {BASE_URL_ENV}");
        config.api.base_url = url;
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();

    validate(&config)?;
    Ok(config)
}

/// Create `config/dynasty.toml` from `defaults/dynasty.toml` when it is
/// missing. Returns the path written, or `None` when nothing was copied.
pub fn init_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if target.exists() || !source.exists() {
        return Ok(None);
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{} -> {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(base_dir.join("config")).map_err(copy_error)?;
    std::fs::copy(&source, &target).map_err(copy_error)?;
    Ok(Some(target))
}

/// Load config relative to the current working directory, falling back to
/// the platform config directory (e.g. `~/.config/dynasty`) when the working
/// directory has neither `config/` nor `defaults/`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let base_dir = resolve_base_dir(&cwd);
    if let Some(path) = init_config_file(&base_dir)? {
        info!("Initialized {} from defaults", path.display());
    }
    load_config_from(&base_dir, std::env::var(BASE_URL_ENV).ok())
}

/// Pick the directory that holds `config/` (or `defaults/`).
fn resolve_base_dir(cwd: &Path) -> PathBuf {
    if cwd.join("config").exists() || cwd.join("defaults").exists() {
        return cwd.to_path_buf();
    }
    match directories::ProjectDirs::from("", "", "dynasty") {
        Some(dirs) if dirs.config_dir().join("config").exists() => {
            debug!("Using config from {}", dirs.config_dir().display());
            dirs.config_dir().to_path_buf()
        }
        _ => cwd.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.api.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got `{url}`"),
        });
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.api.retries > 3 {
        return Err(ConfigError::ValidationError {
            field: "api.retries".into(),
            message: format!("must be at most 3, got {}", config.api.retries),
        });
    }

    let limits: &[(&str, u32)] = &[
        ("display.recent_limit", config.display.recent_limit),
        ("display.player_records_limit", config.display.player_records_limit),
    ];
    for (name, val) in limits {
        if !(1..=100).contains(val) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be between 1 and 100, got {val}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Repository `defaults/` directory, independent of the test CWD.
    fn defaults_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../defaults")
    }

    /// Fresh temp dir containing `config/dynasty.toml` with `contents`.
    fn temp_with_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), contents).unwrap();
        tmp
    }

    #[test]
    fn load_shipped_defaults() {
        let tmp = std::env::temp_dir().join("dynasty_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            defaults_dir().join(CONFIG_FILE),
            tmp.join("config").join(CONFIG_FILE),
        )
        .unwrap();

        let config = load_config_from(&tmp, None).expect("defaults should load");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.retries, 1);
        assert_eq!(config.cache.stale_time(), Duration::from_secs(300));
        assert_eq!(config.display.recent_limit, 20);
        assert_eq!(config.display.player_records_limit, 10);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let tmp = temp_with_config(
            "dynasty_config_minimal",
            "[api]\nbase_url = \"https://stats.example.com/\"\n",
        );
        let config = load_config_from(&tmp, None).unwrap();
        // Trailing slash is trimmed so paths join cleanly.
        assert_eq!(config.api.base_url, "https://stats.example.com");
        assert_eq!(config.api.retries, 1);
        assert_eq!(config.cache.stale_secs, 300);
        assert_eq!(config.display.date_format, "%b %-d, %Y");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_override_replaces_base_url() {
        let tmp = temp_with_config(
            "dynasty_config_override",
            "[api]\nbase_url = \"http://localhost:8000\"\n",
        );
        let config =
            load_config_from(&tmp, Some("http://league.internal:9000".into())).unwrap();
        assert_eq!(config.api.base_url, "http://league.internal:9000");

        // Blank override is ignored.
        let config = load_config_from(&tmp, Some("  ".into())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = temp_with_config(
            "dynasty_config_bad_url",
            "[api]\nbase_url = \"localhost:8000\"\n",
        );
        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = temp_with_config(
            "dynasty_config_zero_timeout",
            "[api]\nbase_url = \"http://localhost:8000\"\ntimeout_secs = 0\n",
        );
        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.timeout_secs"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_too_many_retries() {
        let tmp = temp_with_config(
            "dynasty_config_retries",
            "[api]\nbase_url = \"http://localhost:8000\"\nretries = 5\n",
        );
        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.retries"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_out_of_range_limit() {
        let tmp = temp_with_config(
            "dynasty_config_limit",
            "[api]\nbase_url = \"http://localhost:8000\"\n\n[display]\nrecent_limit = 0\n",
        );
        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "display.recent_limit")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_with_config("dynasty_config_invalid", "this is not valid [[[ toml");
        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("dynasty_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp, None).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn init_copies_only_the_config_file() {
        let tmp = std::env::temp_dir().join("dynasty_config_init_copies");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            defaults_dir().join(CONFIG_FILE),
            tmp.join("defaults").join(CONFIG_FILE),
        )
        .unwrap();
        fs::write(tmp.join("defaults/notes.txt"), "scratch\n").unwrap();

        let copied = init_config_file(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE)));
        assert!(!tmp.join("config/notes.txt").exists());
        assert!(load_config_from(&tmp, None).is_ok());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn init_keeps_an_edited_config() {
        let tmp = temp_with_config("dynasty_config_init_keeps", "# custom\n");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            defaults_dir().join(CONFIG_FILE),
            tmp.join("defaults").join(CONFIG_FILE),
        )
        .unwrap();

        assert_eq!(init_config_file(&tmp).unwrap(), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn init_without_defaults_leaves_load_to_report_the_missing_file() {
        let tmp = std::env::temp_dir().join("dynasty_config_init_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        assert_eq!(init_config_file(&tmp).unwrap(), None);
        assert!(!tmp.join("config").exists());
        assert!(matches!(
            load_config_from(&tmp, None),
            Err(ConfigError::FileNotFound { .. })
        ));

        let _ = fs::remove_dir_all(&tmp);
    }
}
