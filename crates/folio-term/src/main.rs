use anyhow::Result;
use folio_term::application::cli;
use folio_term::application::cli::RunMode;
use folio_term::application::ui;
use folio_term::configuration::Config;
use folio_term::configuration::ConfigKey;
use folio_term::infrastructure::clients::BackendManager;
use folio_term::infrastructure::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let run_mode = cli::parse().await?;
    let _log_guard = logging::setup_logging()?;

    match run_mode {
        RunMode::Tui => {
            let actions_backend = BackendManager::get()?;
            let ui_backend = BackendManager::get()?;
            ui::run(
                actions_backend,
                ui_backend,
                Config::get(ConfigKey::ResumeDownload),
            )
            .await?;
        }
        RunMode::Ask(question) => {
            let backend = BackendManager::get()?;
            println!("{}", cli::ask(&backend, &question).await?);
        }
        RunMode::Upload(file) => {
            let backend = BackendManager::get()?;
            println!("{}", cli::upload(&backend, &file).await?);
        }
        RunMode::PrintDefaultConfig => {
            println!("{}", Config::serialize_default(cli::build()));
        }
        RunMode::Completions(shell) => {
            cli::print_completions(shell);
        }
    }

    return Ok(());
}
