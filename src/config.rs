use crate::error::{MsechoError, Result};
use msecho_common::AdminGate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "MSECHO_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// 投稿データの保存先（省略時は既定のデータディレクトリ）
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// 管理パスワードのダイジェスト（16進）
    #[serde(default)]
    pub admin_password_digest: Option<String>,
    #[serde(default)]
    pub admin_salt: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MsechoError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("msecho").join("config.json"))
    }

    /// 保存先ディレクトリ（引数 > 環境変数 > 設定ファイル > 既定）
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| MsechoError::Config("データディレクトリが見つかりません".into()))?;
        Ok(base.join("msecho"))
    }

    /// 管理ゲート（未設定なら `AdminNotConfigured`）
    pub fn admin_gate(&self) -> Result<AdminGate> {
        let digest = self
            .admin_password_digest
            .as_deref()
            .ok_or(MsechoError::AdminNotConfigured)?;
        let salt = self.admin_salt.as_deref().unwrap_or_default();
        AdminGate::from_digest(digest, salt)
            .ok_or_else(|| MsechoError::Config("管理パスワードのダイジェストが不正です".into()))
    }

    /// 管理パスワードを設定（ソルトは毎回作り直す）
    pub fn set_admin_password(&mut self, password: &str) {
        let salt = generate_salt();
        let gate = AdminGate::from_password(password, &salt);
        self.admin_password_digest = Some(gate.digest_hex());
        self.admin_salt = Some(salt);
    }
}

fn generate_salt() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hex::encode(&hasher.finalize()[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_not_configured() {
        let config = Config::default();
        assert!(matches!(config.admin_gate(), Err(MsechoError::AdminNotConfigured)));
    }

    #[test]
    fn test_set_admin_password() {
        let mut config = Config::default();
        config.set_admin_password("s3cret");
        let gate = config.admin_gate().unwrap();
        assert!(gate.verify("s3cret"));
        assert!(!gate.verify("msechoAdmin123"));
        assert_eq!(config.admin_salt.as_deref().map(str::len), Some(32));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let dir = config.resolve_data_dir(Some(Path::new("/from/cli"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));
    }
}
