use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "database.sqlite";
pub const DEFAULT_BANNER: &str = "Track catalog API";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub database: Database,
    pub http: HttpConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Message returned by `GET /`
    #[serde(default = "default_banner")]
    pub banner: String,
    /// Exposes the destructive `/seed_db` route
    #[serde(default = "default_true")]
    pub enable_seed_route: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct Database {
    pub in_memory: bool,
    pub path: Option<PathBuf>,
}

impl Database {
    pub fn file_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }
}

fn default_banner() -> String {
    DEFAULT_BANNER.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
in_memory = true

[http]
bind_addr = "127.0.0.1"
port = 3000
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert!(cfg.database.in_memory);

        // omitted http keys fall back to defaults
        assert_eq!(cfg.http.port, 3000);
        assert_eq!(cfg.http.banner, DEFAULT_BANNER);
        assert!(cfg.http.enable_seed_route);

        Ok(())
    }

    #[test]
    fn test_parse_file_database_config() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
in_memory = false
path = "/tmp/tracks.sqlite"

[http]
bind_addr = "0.0.0.0"
port = 8080
banner = "BD5.3 - CW"
enable_seed_route = false
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert!(!cfg.database.in_memory);
        assert_eq!(cfg.database.file_path(), PathBuf::from("/tmp/tracks.sqlite"));
        assert_eq!(cfg.http.banner, "BD5.3 - CW");
        assert!(!cfg.http.enable_seed_route);

        Ok(())
    }

    #[test]
    fn test_database_path_defaults() {
        let db = Database::default();
        assert_eq!(db.file_path(), PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Config::load("/definitely/not/here/config.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
