//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `contacts.toml` configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the configuration file is expanded from the
//! environment before parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::contact::DEFAULT_PAGE_SIZE;
use crate::Error;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "contacts.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Directory engine configuration
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Contacts per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Preload the demo contacts at startup
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            seed_demo: default_seed_demo(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "./ui/static".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_seed_demo() -> bool {
    true
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment
    ///
    /// Unset variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Parse TOML content (after `${VAR}` expansion) without env overrides
    fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);

        let toml: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        Ok(Self::from_toml_config(toml))
    }

    /// Load configuration from the default location
    ///
    /// Uses `./contacts.toml` when present, otherwise environment variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Load configuration from defaults and environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_toml_config(toml: TomlConfig) -> Self {
        let server = toml.server.unwrap_or_default();
        let directory = toml.directory.unwrap_or_default();

        Config {
            server: ServerConfig {
                host: server.host.unwrap_or_else(default_host),
                port: server.port.unwrap_or_else(default_port),
                static_dir: server.static_dir.unwrap_or_else(default_static_dir),
            },
            directory: DirectoryConfig {
                page_size: directory.page_size.unwrap_or_else(default_page_size),
                seed_demo: directory.seed_demo.unwrap_or_else(default_seed_demo),
            },
        }
    }

    /// Override settings from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CONTACTS_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("CONTACTS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(dir) = std::env::var("CONTACTS_STATIC_DIR") {
            if !dir.is_empty() {
                self.server.static_dir = dir;
            }
        }
        if let Ok(size) = std::env::var("CONTACTS_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.directory.page_size = n;
            }
        }
        if let Ok(seed) = std::env::var("CONTACTS_SEED_DEMO") {
            self.directory.seed_demo = seed.to_lowercase() != "false";
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.directory.page_size == 0 {
            return Err(Error::Config("directory.page_size must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Address string for binding, `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ============================================================================
// TOML file layout
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    server: Option<TomlServerConfig>,
    directory: Option<TomlDirectoryConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlServerConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDirectoryConfig {
    #[serde(default)]
    page_size: Option<usize>,
    #[serde(default)]
    seed_demo: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // CONTACTS_* are process-wide; tests that read or set them take this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets environment variables for one test and clears them on drop
    struct EnvVars {
        names: Vec<&'static str>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvVars {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            for (name, value) in vars {
                unsafe {
                    std::env::set_var(name, value);
                }
            }
            Self {
                names: vars.iter().map(|(name, _)| *name).collect(),
                _lock: lock,
            }
        }
    }

    impl Drop for EnvVars {
        fn drop(&mut self) {
            for name in &self.names {
                unsafe {
                    std::env::remove_var(name);
                }
            }
        }
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "./ui/static");
        assert_eq!(config.directory.page_size, 10);
        assert!(config.directory.seed_demo);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("CD_CORE_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${CD_CORE_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${CD_CORE_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("CD_CORE_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("cost: $5"), "cost: $5");
    }

    #[test]
    fn test_expand_env_vars_empty_name() {
        assert_eq!(Config::expand_env_vars("${}_content"), "_content");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 8080
static_dir = "/srv/static"

[directory]
page_size = 25
seed_demo = false
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, "/srv/static");
        assert_eq!(config.directory.page_size, 25);
        assert!(!config.directory.seed_demo);
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.directory.page_size, 10);

        let empty = Config::from_toml_str("").unwrap();
        assert_eq!(empty.server.port, 3000);
    }

    #[test]
    fn test_toml_invalid() {
        let err = Config::from_toml_str("[server]\nport = \"high\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_page_size() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.directory.page_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let _env = EnvVars::set(&[]);
        let file = toml_file("[directory]\npage_size = 5\n");

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.directory.page_size, 5);
    }

    #[test]
    fn test_from_toml_file_rejects_zero_page_size() {
        let _env = EnvVars::set(&[]);
        let file = toml_file("[directory]\npage_size = 0\n");

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides_toml_values() {
        let file = toml_file(
            r#"
[server]
host = "0.0.0.0"
port = 8080

[directory]
page_size = 25
seed_demo = true
"#,
        );
        let _env = EnvVars::set(&[
            ("CONTACTS_PORT", "9090"),
            ("CONTACTS_PAGE_SIZE", "7"),
            ("CONTACTS_SEED_DEMO", "false"),
        ]);

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.directory.page_size, 7);
        assert!(!config.directory.seed_demo);
        // not overridden: TOML value, then default
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir, "./ui/static");
    }

    #[test]
    fn test_unparseable_env_values_ignored() {
        let file = toml_file("[server]\nport = 8080\n\n[directory]\npage_size = 25\n");
        let _env = EnvVars::set(&[
            ("CONTACTS_PORT", "high"),
            ("CONTACTS_PAGE_SIZE", "-1"),
            ("CONTACTS_HOST", ""),
        ]);

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.directory.page_size, 25);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_from_env_overrides_defaults() {
        let _env = EnvVars::set(&[
            ("CONTACTS_HOST", "0.0.0.0"),
            ("CONTACTS_STATIC_DIR", "/srv/static"),
            ("CONTACTS_SEED_DEMO", "FALSE"),
        ]);

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.server.static_dir, "/srv/static");
        assert!(!config.directory.seed_demo);
    }

    #[test]
    fn test_env_zero_page_size_rejected() {
        let _env = EnvVars::set(&[("CONTACTS_PAGE_SIZE", "0")]);
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file("/nonexistent/contacts.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
