pub mod commands;
pub mod logging;
pub mod session;
pub mod view;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use storefront_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog and cart CLI",
    long_about = "Browse the product catalog, search it, and run scripted shopping sessions against an in-memory cart.",
    after_help = "Examples:\n  storefront products\n  storefront search watch\n  printf 'add 1\\nadd 1\\nadd 2\\ncart\\n' | storefront shop"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file that must exist (defaults to an optional storefront.toml)"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List every product in catalog order")]
    Products {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Case-insensitive substring search over product names and descriptions")]
    Search {
        #[arg(help = "Text to look for; omit to list everything")]
        query: Option<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show one product by id")]
    Show { id: u32 },
    #[command(about = "Run a shopping session reading one action per line from stdin")]
    Shop,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    /// An explicitly named config file must exist; the default locations stay optional.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            ..LoadOptions::default()
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    if let Ok(config) = AppConfig::load(options.clone()) {
        logging::init(&config.logging);
    }

    let result = match cli.command {
        Command::Products { json } => commands::catalog::products(&options, json),
        Command::Search { query, json } => {
            commands::catalog::search(&options, query.as_deref(), json)
        }
        Command::Show { id } => commands::catalog::show(&options, id),
        Command::Shop => commands::shop::run(&options),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
