//! 管理画面の合言葉チェック
//!
//! ローカル専用の簡易ゲート。平文のパスワードは保持せず、ソルト付きSHA-256の
//! ダイジェストのみを比較する。回数制限やロックアウトは無く、認証基盤ではない。

use sha2::{Digest, Sha256};

/// ソルト付きダイジェストを16進文字列で返す
pub fn password_digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 途中で打ち切らない比較
fn digests_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGate {
    digest: Vec<u8>,
    salt: String,
}

impl AdminGate {
    /// 保存済みのダイジェスト（16進）から作成
    pub fn from_digest(digest_hex: &str, salt: &str) -> Option<Self> {
        let digest = hex::decode(digest_hex.trim()).ok()?;
        if digest.len() != 32 {
            return None;
        }
        Some(Self {
            digest,
            salt: salt.to_string(),
        })
    }

    /// 新しいパスワードから作成
    pub fn from_password(password: &str, salt: &str) -> Self {
        let digest = password_digest(password, salt);
        Self {
            digest: hex::decode(digest).unwrap_or_default(),
            salt: salt.to_string(),
        }
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = password_digest(password, &self.salt);
        match hex::decode(candidate) {
            Ok(candidate) => digests_match(&candidate, &self.digest),
            Err(_) => false,
        }
    }
}
