use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::Argon2Params;
use crate::errors::{PassVaultError, Result};
use crate::generator::CharClass;

/// User configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the vault.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the vault inside `vault_dir`.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Shortest password `generate` produces when no range is given.
    #[serde(default = "default_generator_low")]
    pub generator_low: usize,

    /// Longest password `generate` produces when no range is given.
    #[serde(default = "default_generator_high")]
    pub generator_high: usize,

    /// Classes `generate` uses when none are given: any of
    /// `upper`, `lower`, `digit`, `punct`.
    #[serde(default = "default_generator_classes")]
    pub generator_classes: Vec<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".passvault".to_string()
}

fn default_vault_file() -> String {
    "vault.bin".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_generator_low() -> usize {
    12
}

fn default_generator_high() -> usize {
    20
}

fn default_generator_classes() -> Vec<String> {
    CharClass::ALL.iter().map(ToString::to_string).collect()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            vault_file: default_vault_file(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            generator_low: default_generator_low(),
            generator_high: default_generator_high(),
            generator_classes: default_generator_classes(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault file, e.g. `<dir>/.passvault/vault.bin`.
    ///
    /// `vault_dir` overrides the configured directory (the `--vault-dir` flag).
    pub fn vault_path(&self, dir: &Path, vault_dir: Option<&str>) -> PathBuf {
        dir.join(vault_dir.unwrap_or(&self.vault_dir))
            .join(&self.vault_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Parse `generator_classes` into `CharClass` values.
    pub fn generator_classes(&self) -> Result<Vec<CharClass>> {
        use clap::ValueEnum;

        self.generator_classes
            .iter()
            .map(|name| {
                CharClass::from_str(name, true).map_err(|_| {
                    PassVaultError::ConfigError(format!(
                        "unknown character class '{name}', expected upper, lower, digit or punct"
                    ))
                })
            })
            .collect()
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".passvault");
        assert_eq!(s.vault_file, "vault.bin");
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert_eq!(s.generator_low, 12);
        assert_eq!(s.generator_high, 20);
        assert_eq!(s.generator_classes().unwrap(), CharClass::ALL.to_vec());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, ".passvault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
vault_file = "mine.bin"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
generator_low = 16
generator_high = 16
generator_classes = ["upper", "digit"]
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.vault_file, "mine.bin");
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert_eq!(settings.generator_low, 16);
        assert_eq!(
            settings.generator_classes().unwrap(),
            vec![CharClass::Uppercase, CharClass::Digits]
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "generator_high = 32\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.generator_high, 32);
        assert_eq!(settings.vault_dir, ".passvault");
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn unknown_generator_class_is_config_error() {
        let s = Settings {
            generator_classes: vec!["emoji".into()],
            ..Settings::default()
        };
        assert!(matches!(
            s.generator_classes(),
            Err(PassVaultError::ConfigError(_))
        ));
    }

    #[test]
    fn vault_path_builds_correct_path() {
        let s = Settings::default();
        let path = s.vault_path(Path::new("/home/user"), None);
        assert_eq!(path, PathBuf::from("/home/user/.passvault/vault.bin"));
    }

    #[test]
    fn vault_path_respects_override_dir() {
        let s = Settings::default();
        let path = s.vault_path(Path::new("/home/user"), Some("elsewhere"));
        assert_eq!(path, PathBuf::from("/home/user/elsewhere/vault.bin"));
    }
}
