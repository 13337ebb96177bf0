use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// カタログパスを上書きする環境変数
pub const CATALOG_ENV: &str = "DETAIL_MATCHER_CATALOG";
/// 同義語ファイルパスを上書きする環境変数
pub const SYNONYMS_ENV: &str = "DETAIL_MATCHER_SYNONYMS";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// カタログJSON（未設定なら組み込みカタログ）
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// 同義語JSON（未設定なら組み込み同義語のみ）
    #[serde(default)]
    pub synonyms_path: Option<PathBuf>,
}

impl Config {
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            log::debug!("設定ファイルなし、既定値を使用: {}", config_path.display());
            Ok(Self::default())
        }
    }

    /// 読み込めない設定ファイルは警告して既定値で続行
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                log::warn!("{}、既定値を使用", e);
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            log::warn!(
                "設定ファイルを読み込めません、既定値を使用: {} ({})",
                config_path.display(),
                e
            );
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("detail-matcher").join("config.json"))
    }

    /// CLI引数 > 環境変数 > 設定ファイル の順で解決
    pub fn resolve_catalog_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        let env = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
        resolve_path(cli, env, self.catalog_path.as_deref())
    }

    pub fn resolve_synonyms_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        let env = std::env::var_os(SYNONYMS_ENV).map(PathBuf::from);
        resolve_path(cli, env, self.synonyms_path.as_deref())
    }
}

fn resolve_path(cli: Option<&Path>, env: Option<PathBuf>, stored: Option<&Path>) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or(env.filter(|p| !p.as_os_str().is_empty()))
        .or_else(|| stored.map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            catalog_path: Some(PathBuf::from("/data/catalog.json")),
            synonyms_path: None,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(MatcherError::JsonParse(_))));
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ broken").unwrap();

        let config = Config::load_or_default_from(&path);
        assert_eq!(config, Config::default());

        // 既定値で上書きすれば修復できる
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_or_default_keeps_valid_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        let config = Config {
            catalog_path: None,
            synonyms_path: Some(PathBuf::from("synonyms.json")),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_or_default_from(&path), config);
    }

    #[test]
    fn test_resolve_precedence() {
        let cli = PathBuf::from("cli.json");
        let env = PathBuf::from("env.json");
        let stored = PathBuf::from("stored.json");

        assert_eq!(
            resolve_path(Some(cli.as_path()), Some(env.clone()), Some(stored.as_path())),
            Some(cli)
        );
        assert_eq!(
            resolve_path(None, Some(env.clone()), Some(stored.as_path())),
            Some(env)
        );
        assert_eq!(resolve_path(None, None, Some(stored.as_path())), Some(stored.clone()));
        assert_eq!(
            resolve_path(None, Some(PathBuf::new()), Some(stored.as_path())),
            Some(stored)
        );
        assert_eq!(resolve_path(None, None, None), None);
    }
}
