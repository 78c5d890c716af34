use anyhow::Context;
use clap::Parser;
use dialoguer::Password;
use msecho_common::{ApplicationForm, ContactForm, NewSubmission};
use msecho_site::{admin, cli, config, open_store, submit};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Apply { full_name, email, phone, position, experience, location, cv, consent } => {
            println!("📝 msecho - 応募受付\n");

            let cv = match cv {
                Some(path) => Some(submit::attached_file(&path)?),
                None => None,
            };
            let form = ApplicationForm {
                full_name,
                email,
                phone,
                position,
                experience,
                location,
                consent,
                cv,
            };

            let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
            let mut store = open_store(&data_dir)?;
            let record = submit::submit(&mut store, NewSubmission::Application(form))?;

            println!("✔ 応募を受け付けました (ID: {})", record.id());
            if record_has_cv(&record) {
                println!("  ※ 履歴書はファイル名とサイズのみ記録しています");
            }
        }

        Commands::Contact { name, email, message } => {
            println!("✉ msecho - 問い合わせ受付\n");

            let form = ContactForm { name, email, message };
            let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
            let mut store = open_store(&data_dir)?;
            let record = submit::submit(&mut store, NewSubmission::Contact(form))?;

            println!("✔ メッセージを送信しました (ID: {})", record.id());
        }

        Commands::Admin { password, action } => {
            let gate = config.admin_gate()?;
            admin::login(&gate, password)?;

            let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
            let mut store = open_store(&data_dir)
                .with_context(|| format!("データディレクトリを開けません: {}", data_dir.display()))?;
            admin::run(&mut store, action)?;
        }

        Commands::Config { set_admin_password, set_data_dir, show } => {
            let mut config = config;
            let mut changed = false;

            if set_admin_password {
                let password = Password::new()
                    .with_prompt("新しい管理パスワード")
                    .with_confirmation("もう一度入力", "パスワードが一致しません")
                    .interact()
                    .context("パスワード入力に失敗しました")?;
                config.set_admin_password(&password);
                changed = true;
                println!("✔ 管理パスワードを設定しました");
            }

            if let Some(dir) = set_data_dir {
                println!("✔ 保存先を設定しました: {}", dir.display());
                config.data_dir = Some(dir);
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  保存先: {}",
                    config.resolve_data_dir(cli.data_dir.as_deref())?.display()
                );
                println!(
                    "  管理パスワード: {}",
                    if config.admin_password_digest.is_some() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

fn record_has_cv(record: &msecho_common::Submission) -> bool {
    matches!(record, msecho_common::Submission::Application(app) if app.cv_file.is_some())
}
