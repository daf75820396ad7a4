// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use archivist::app_config::{self, Config, TranslationProvider};
use archivist::app_controller::{self, Controller, Selection};
use archivist::document::Document;
use archivist::language_utils;
use archivist::translation::CancelHandle;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Yandex,
    Anthropic,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Yandex => TranslationProvider::Yandex,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate documents and store the translations
    Translate(TranslateArgs),

    /// List the months that have documents, newest first
    Months,

    /// List documents, optionally for one month
    List {
        /// Month key (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Import documents from a JSON array
    Import {
        /// JSON file with `id`, `title`, `content`, `created` objects
        #[arg(value_name = "JSON_FILE")]
        input_path: PathBuf,
    },

    /// Generate shell completions for archivist
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("selection").required(true).args(["ids", "month", "all"])))]
struct TranslateArgs {
    /// Document ids to translate
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    ids: Vec<i64>,

    /// Translate every document of this month (YYYY-MM)
    #[arg(long)]
    month: Option<String>,

    /// Translate the whole archive
    #[arg(long)]
    all: bool,

    /// Target language code (e.g., 'en', 'de', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for the provider
    #[arg(long, env = "ARCHIVIST_TRANSLATE_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl TranslateArgs {
    fn selection(&self) -> Selection {
        if self.all {
            Selection::All
        } else if let Some(month) = &self.month {
            Selection::Month(month.clone())
        } else {
            Selection::Ids(self.ids.clone())
        }
    }
}

/// Archivist - translate an archive of dated documents
#[derive(Parser, Debug)]
#[command(name = "archivist")]
#[command(version)]
#[command(about = "Document archive translation tool")]
#[command(long_about = "Archivist keeps dated documents in a local archive and translates them with
external machine-translation providers.

EXAMPLES:
    archivist import documents.json             # Load documents into the archive
    archivist months                            # Show months with documents
    archivist list --month 2024-03              # Show documents of March 2024
    archivist translate --ids 4,7 -t de         # Translate two documents to German
    archivist translate --month 2024-03         # Translate a whole month
    archivist translate --all -p mock           # Dry run with the mock provider
    archivist completions bash > archivist.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    yandex    - Yandex Translate API (requires API key)
    anthropic - Anthropic API (requires API key)
    mock      - Returns the input unchanged")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with trace so the level can be lowered later
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "archivist", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Translate(args) => run_translate(config, args).await,
        Commands::Months => run_months(config).await,
        Commands::List { month } => run_list(config, month.as_deref()).await,
        Commands::Import { input_path } => run_import(config, &input_path).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load configuration, creating a default file when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();

    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;

    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

async fn run_translate(mut config: Config, args: TranslateArgs) -> Result<()> {
    // Override config with CLI options if provided
    if let Some(provider) = &args.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(api_key) = &args.api_key {
        config.translation.active_provider_config_mut().api_key = api_key.clone();
    }

    let controller = Controller::open(config)?;
    controller.batch_runner()
        .map_err(|e| anyhow!("Translation is not available: {}", e))?;

    let target = args.target_language.as_deref()
        .unwrap_or(controller.config().translation.target_language.as_str())
        .to_string();
    language_utils::validate_language_code(&target)?;
    info!(
        "Target language: {} ({})",
        language_utils::get_language_name(&target).unwrap_or_else(|_| target.clone()),
        target
    );

    // Ctrl-C stops the batch; finished documents keep their translation
    let cancel = CancelHandle::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancelling translation");
            on_interrupt.cancel();
        }
    });

    let progress_bar = ProgressBar::new(0);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let outcomes = controller
        .translate_with_progress(&args.selection(), Some(&target), &cancel, |done, total| {
            progress_bar.set_length(total as u64);
            progress_bar.set_position(done as u64);
        })
        .await?;
    progress_bar.finish_and_clear();

    for outcome in &outcomes {
        println!("{}", outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        warn!("{} of {} document(s) failed", failed, outcomes.len());
    }

    Ok(())
}

async fn run_months(config: Config) -> Result<()> {
    let controller = Controller::open(config)?;
    for facet in controller.month_facets().await? {
        println!("{}  {}", facet.key, facet.label);
    }
    Ok(())
}

async fn run_list(config: Config, month: Option<&str>) -> Result<()> {
    let controller = Controller::open(config)?;
    for document in controller.list_documents(month).await? {
        let marker = if document.is_translated() { "*" } else { " " };
        println!(
            "{:>6} {} {}  {}",
            document.id,
            marker,
            document.created.format("%Y-%m-%d"),
            document.title
        );
    }
    Ok(())
}

async fn run_import(config: Config, input_path: &Path) -> Result<()> {
    let file = File::open(input_path)
        .context(format!("Failed to open import file: {:?}", input_path))?;
    let documents: Vec<Document> = serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse import file: {:?}", input_path))?;

    let repository = app_controller::open_repository(&config)?;
    let count = repository.import_documents(documents).await?;
    info!("Imported {} document(s)", count);

    Ok(())
}
