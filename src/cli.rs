use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "msecho")]
#[command(about = "MSECHO 応募・問い合わせ管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 投稿データの保存先（設定ファイルより優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 求人に応募する
    Apply {
        /// 氏名
        #[arg(long, default_value = "")]
        full_name: String,

        /// メールアドレス
        #[arg(long, default_value = "")]
        email: String,

        /// 電話番号
        #[arg(long, default_value = "")]
        phone: String,

        /// 希望職種
        #[arg(long, default_value = "")]
        position: String,

        /// 経験年数
        #[arg(long, default_value = "")]
        experience: String,

        /// 勤務地
        #[arg(long, default_value = "")]
        location: String,

        /// 履歴書ファイル（ファイル名とサイズのみ記録）
        #[arg(long)]
        cv: Option<PathBuf>,

        /// 個人情報の取り扱いに同意する
        #[arg(long)]
        consent: bool,
    },

    /// 問い合わせを送る
    Contact {
        /// 名前
        #[arg(long, default_value = "")]
        name: String,

        /// メールアドレス
        #[arg(long, default_value = "")]
        email: String,

        /// 本文
        #[arg(long, default_value = "")]
        message: String,
    },

    /// 管理画面（パスワードが必要）
    Admin {
        /// 管理パスワード（省略時は対話入力）
        #[arg(long, env = "MSECHO_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(subcommand)]
        action: AdminAction,
    },

    /// 設定を表示/編集
    Config {
        /// 管理パスワードを設定（対話入力）
        #[arg(long)]
        set_admin_password: bool,

        /// 保存先ディレクトリを設定
        #[arg(long = "set-data-dir")]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AdminAction {
    /// 投稿一覧を表示
    List,

    /// 1件を表示
    Show {
        #[arg(required = true)]
        id: String,
    },

    /// 1件を削除
    Delete {
        #[arg(required = true)]
        id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 全件を削除
    Clear {
        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 全件をJSONに書き出し
    Export {
        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 1件をJSONに書き出し
    ExportOne {
        #[arg(required = true)]
        id: String,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 一覧をHTMLで出力
    Render {
        /// 出力ファイル（デフォルト: submissions.html）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
