use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::VersionPolicy;

/// Top-level configuration from `.manifestguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Store discovery and version selection knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Explicit store path, bypassing platform candidates.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub version_policy: VersionPolicy,
}

/// Exit-code policy for CI-style use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Scores at or above this value make the `scan` command exit nonzero.
    #[serde(default)]
    pub fail_score: Option<u8>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# ManifestGuard configuration

[scan]
# Explicit extension store path, bypassing platform detection.
# store_path = "/home/user/.config/google-chrome/Default/Extensions"

# How the newest installed version is picked: "mtime" or "version".
version_policy = "mtime"

[report]
# Exit nonzero when any extension scores at or above this threshold (0-100).
# fail_score = 70
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(&tmp.path().join(".manifestguard.toml")).unwrap();
        assert!(config.scan.store_path.is_none());
        assert_eq!(config.scan.version_policy, VersionPolicy::Mtime);
        assert!(config.report.fail_score.is_none());
    }

    #[test]
    fn loads_all_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".manifestguard.toml");
        std::fs::write(
            &path,
            r#"
[scan]
store_path = "/tmp/store"
version_policy = "version"

[report]
fail_score = 70
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scan.store_path, Some(PathBuf::from("/tmp/store")));
        assert_eq!(config.scan.version_policy, VersionPolicy::Version);
        assert_eq!(config.report.fail_score, Some(70));
    }

    #[test]
    fn starter_config_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config.scan.version_policy, VersionPolicy::Mtime);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".manifestguard.toml");
        std::fs::write(&path, "[scan\nbroken").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
