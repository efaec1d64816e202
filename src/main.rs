use clap::Parser;
use dialoguer::Password;
use fetal_care::error::{ClientError, Result};
use fetal_care::{analyze, api, cli, config, predict, render, report, scanner, session, storage};
use api::ApiClient;
use cli::{Cli, Commands};
use config::Config;
use fetal_care_common::display::{AfiReport, PredictionView};
use fetal_care_common::preference::{load_theme, save_theme};
use fetal_care_common::{Credentials, HistoryStore, Registration, Theme};
use render::Renderer;
use storage::FileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "fetal_care=debug,fetal_care_common=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        tracing::debug!("{:?}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = FileStore::new(config.data_dir()?);
    let renderer = Renderer::new(load_theme(&store)?);
    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => Password::new().with_prompt("Password").interact()?,
            };
            session::login(&client, &store, &Credentials { email, password }).await?;
            println!("✔ ログインしました");
        }

        Commands::Register { full_name, email, password, role } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?,
            };
            let registration = Registration { email, password, full_name, role };
            session::register(&client, &registration).await?;
            println!("✔ 登録しました。`fetal-care login` でログインしてください");
        }

        Commands::Logout => {
            session::logout(&store)?;
            println!("✔ ログアウトしました");
        }

        Commands::Me => {
            let (_, profile) = session::verify(&client, &store).await?;
            renderer.profile(&profile);
        }

        Commands::Predict { mode, values, input, interactive, show_advanced } => {
            let (session, profile) = session::verify(&client, &store).await?;
            tracing::debug!("ユーザー: {} ({})", profile.email, profile.role);

            let mut form = predict::new_form(mode, show_advanced)?;
            let file_entries = input.as_deref().map(predict::load_form_file).transpose()?;
            predict::fill_form(&mut form, file_entries, &values)?;

            println!("📋 Fetal Health Prediction ({} mode)", form.mode());
            renderer.disclosure(&form.disclosure());
            if interactive {
                predict::prompt_fields(&mut form)?;
            }

            predict::submit(&client, &mut form, &session.access_token).await?;

            if let Some(message) = form.error() {
                return Err(ClientError::Prediction(message.to_string()));
            }
            if let Some(result) = form.result() {
                renderer.prediction(&PredictionView::from(result));
            }
        }

        Commands::Analyze { paths, report: save_report, output } => {
            println!("🩺 AFI Analyzer\n");

            let candidates = scanner::scan_paths(&paths)?;
            let mut analyzer = analyze::run_analysis(&client, &store, candidates, !cli.quiet).await?;

            for message in analyzer.take_notifications() {
                renderer.notification(&message);
            }
            if analyzer.error().is_some() {
                return Err(ClientError::AnalysisFailed);
            }

            if let Some(result) = analyzer.last_response() {
                println!("✔ {}枚を解析\n", result.results.len());
                renderer.afi_report(&AfiReport::from(result));

                if save_report || output.is_some() {
                    let now = chrono::Utc::now().timestamp_millis();
                    let path = report::write_report(result, output.as_deref(), now)?;
                    println!("\n✔ レポートを保存: {}", path.display());
                }
            }
        }

        Commands::History { clear } => {
            let history = HistoryStore::new(&store);
            if clear {
                history.clear()?;
                println!("✔ History cleared");
            } else {
                renderer.history(&history.list()?);
            }
        }

        Commands::Theme { dark, light } => {
            if dark || light {
                let theme = if dark { Theme::Dark } else { Theme::Light };
                save_theme(&store, theme)?;
            }
            let current = load_theme(&store)?;
            println!("テーマ: {}", if current.is_dark() { "dark" } else { "light" });
        }

        Commands::Config { set_prediction_url, set_image_url, set_timeout, show } => {
            let mut config = config;
            let changed = set_prediction_url.is_some() || set_image_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_prediction_url {
                config.prediction_url = url;
            }
            if let Some(url) = set_image_url {
                config.image_url = url;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = (seconds > 0).then_some(seconds);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  予測API: {}", config.prediction_url());
                println!("  画像解析: {}", config.image_url());
                match config.timeout_seconds {
                    Some(s) => println!("  タイムアウト: {}秒", s),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  データ: {}", store.dir().display());
            }
        }
    }

    Ok(())
}
