// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod glossary;
mod key_registry;
mod template;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Substitute template markers using the glossary and data file (default command)
    #[command(alias = "substitute")]
    Run(RunArgs),

    /// Generate shell completions for texsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Template document containing {{...}} markers
    #[arg(long)]
    template: Option<String>,

    /// Structured JSON data file
    #[arg(long)]
    data: Option<String>,

    /// Glossary workbook (xlsx)
    #[arg(long)]
    glossary: Option<String>,

    /// Output document path
    #[arg(short, long)]
    output: Option<String>,

    /// Worksheet name holding the keyword table
    #[arg(long)]
    sheet: Option<String>,

    /// Column letter of the source-language keywords
    #[arg(long)]
    source_column: Option<String>,

    /// Column letter of the canonical keywords
    #[arg(long)]
    canonical_column: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Skip the interactive confirmation prompts
    #[arg(short = 'y', long)]
    yes: bool,
}

/// texsub - Template Keyword Substitution
///
/// Replaces {{keyword}} markers in a text template with [(${path})]
/// references, resolving each keyword through an xlsx glossary and a
/// flattened JSON data file.
#[derive(Parser, Debug)]
#[command(name = "texsub")]
#[command(version = "1.0.0")]
#[command(about = "Template keyword substitution tool")]
#[command(long_about = "texsub reads a template document, an xlsx keyword glossary and a JSON
data file, and writes a new document with every resolvable {{keyword}}
marker replaced by a flattened-path reference.

EXAMPLES:
    texsub                                      # Use input.tex/input.xlsx/input.json
    texsub -y                                   # Run without confirmation prompts
    texsub --template report.tex -o report.out.tex
    texsub --sheet Glossary --source-column B --canonical-column A
    texsub --log-level debug                    # Verbose diagnostics
    texsub completions bash > texsub.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically. Command-line
    flags override values from the config file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
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

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "texsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_substitution(args),
        // Default behavior - use top-level args
        None => run_substitution(cli.run),
    }
}

fn run_substitution(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    apply_overrides(&mut config, &options);

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    print_usage(&config);

    if config.interactive {
        wait_for_enter("Press ENTER key to continue, ... ...")?;
    }

    // Create controller and run the pipeline
    let controller = Controller::with_config(config.clone())?;
    controller.run()?;

    if config.interactive {
        wait_for_enter("Press ENTER key to exit, ... ...")?;
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, options: &RunArgs) {
    if let Some(template) = &options.template {
        config.template = template.clone();
    }
    if let Some(data) = &options.data {
        config.data = data.clone();
    }
    if let Some(glossary) = &options.glossary {
        config.glossary = glossary.clone();
    }
    if let Some(output) = &options.output {
        config.output = output.clone();
    }
    if let Some(sheet) = &options.sheet {
        config.glossary_layout.sheet = sheet.clone();
    }
    if let Some(source_column) = &options.source_column {
        config.glossary_layout.source_column = source_column.clone();
    }
    if let Some(canonical_column) = &options.canonical_column {
        config.glossary_layout.canonical_column = canonical_column.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.yes {
        config.interactive = false;
    }
}

// Usage banner printed before processing starts
fn print_usage(config: &Config) {
    let rule = "-".repeat(80);
    println!("{}", rule);
    println!("The program deals with three files as input:");
    println!(
        "'{}', '{}', '{}'.",
        config.template, config.glossary, config.data
    );
    println!();
    println!("The markers inside '{}' are substituted by flattened keyword", config.template);
    println!(
        "paths from '{}' according to the glossary in '{}'.",
        config.data, config.glossary
    );
    println!(
        "The glossary sheet is '{}', source keywords in column '{}',",
        config.glossary_layout.sheet, config.glossary_layout.source_column
    );
    println!(
        "canonical keywords in column '{}'. Output goes to '{}'.",
        config.glossary_layout.canonical_column, config.output
    );
    println!("{}", rule);
}

// Blocking confirmation prompt; reads one line from stdin
fn wait_for_enter(message: &str) -> Result<()> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}
