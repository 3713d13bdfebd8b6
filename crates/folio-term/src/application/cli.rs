use std::io;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::Shell;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::UploadStatus;
use crate::domain::services::ConversationManager;
use crate::domain::services::UploadManager;

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Tui,
    Ask(String),
    Upload(PathBuf),
    PrintDefaultConfig,
    Completions(Shell),
}

fn arg_api_base_url() -> Arg {
    return Arg::new(ConfigKey::ApiBaseUrl.to_string())
        .long(ConfigKey::ApiBaseUrl.to_string())
        .env("FOLIO_API_BASE_URL")
        .num_args(1)
        .global(true)
        .help(format!(
            "Base URL of the portfolio API [default: {}]",
            Config::default(ConfigKey::ApiBaseUrl)
        ));
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("FOLIO_CONFIG_FILE")
        .num_args(1)
        .global(true)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ));
}

fn arg_log_level() -> Arg {
    return Arg::new(ConfigKey::LogLevel.to_string())
        .long(ConfigKey::LogLevel.to_string())
        .env("FOLIO_LOG_LEVEL")
        .num_args(1)
        .global(true)
        .value_parser(PossibleValuesParser::new(LOG_LEVELS))
        .help(format!(
            "Log level for the log file [default: {}]",
            Config::default(ConfigKey::LogLevel)
        ));
}

fn arg_resume_download() -> Arg {
    return Arg::new(ConfigKey::ResumeDownload.to_string())
        .long(ConfigKey::ResumeDownload.to_string())
        .env("FOLIO_RESUME_DOWNLOAD")
        .num_args(1)
        .global(true)
        .help("Where visitors can download the resume, shown in the resume panel");
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Ask the resume assistant a single question and print the answer")
        .arg(
            Arg::new("question")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        );
}

fn subcommand_upload() -> Command {
    return Command::new("upload")
        .about("Upload a PDF resume to the backend")
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options")
        .subcommand_required(true)
        .subcommand(Command::new("default").about("Print the default config.toml"));
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .required(true)
                .value_parser(value_parser!(Shell)),
        );
}

pub fn build() -> Command {
    return Command::new("folio")
        .about("Portfolio in your terminal: upload a resume and ask the AI resume assistant about it")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(arg_api_base_url())
        .arg(arg_config_file())
        .arg(arg_log_level())
        .arg(arg_resume_download())
        .subcommand(subcommand_ask())
        .subcommand(subcommand_upload())
        .subcommand(subcommand_config())
        .subcommand(subcommand_completions());
}

pub fn run_mode(matches: &ArgMatches) -> RunMode {
    match matches.subcommand() {
        Some(("ask", subcmd_matches)) => {
            let question = subcmd_matches
                .get_many::<String>("question")
                .map(|words| words.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();
            return RunMode::Ask(question);
        }
        Some(("upload", subcmd_matches)) => {
            let file = subcmd_matches
                .get_one::<PathBuf>("file")
                .cloned()
                .unwrap_or_default();
            return RunMode::Upload(file);
        }
        Some(("config", _)) => {
            return RunMode::PrintDefaultConfig;
        }
        Some(("completions", subcmd_matches)) => {
            let shell = subcmd_matches
                .get_one::<Shell>("shell")
                .copied()
                .unwrap_or(Shell::Bash);
            return RunMode::Completions(shell);
        }
        _ => {
            return RunMode::Tui;
        }
    }
}

/// Parses the command line and loads configuration.
pub async fn parse() -> Result<RunMode> {
    let matches = build().get_matches();

    let mut all_matches = vec![&matches];
    if let Some((_, subcmd_matches)) = matches.subcommand() {
        all_matches.push(subcmd_matches);
    }
    Config::load(build(), all_matches).await?;

    return Ok(run_mode(&matches));
}

pub fn print_completions(shell: Shell) {
    let mut cmd = build();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

/// One-shot question. Prints the answer or the fallback notice.
pub async fn ask(backend: &BackendBox, question: &str) -> Result<String> {
    let mut conversation = ConversationManager::new(backend.base_url());
    let reply = conversation.ask(&**backend, question).await;

    match reply {
        Some(message) => return Ok(message.content.to_string()),
        None => anyhow::bail!("Question must not be empty"),
    }
}

/// One-shot upload. Returns the status notice.
pub async fn upload(backend: &BackendBox, file: &Path) -> Result<String> {
    if !crate::domain::services::is_pdf(file) {
        anyhow::bail!("Only PDF files can be uploaded: {}", file.display());
    }

    let mut manager = UploadManager::default();
    let state = manager.upload(&**backend, file).await;

    match state.status {
        UploadStatus::Succeeded | UploadStatus::Failed => {
            return Ok(state.status_text().unwrap_or_default().to_string())
        }
        _ => anyhow::bail!("Upload did not complete"),
    }
}
