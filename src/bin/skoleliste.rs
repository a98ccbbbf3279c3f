use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use skoleliste::export::{CATEGORY_FILES, write_schools};
use skoleliste::scraper::SchoolScraper;
use skoleliste::types::SchoolType;

#[derive(Parser)]
#[command(name = "skoleliste")]
#[command(about = "A skoleliste.eu school directory scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the directory and write one text file per category
    Scrape {
        #[arg(
            long,
            value_parser = parse_school_type,
            help = "Only crawl this category (afdeling, hovedskole or institution)"
        )]
        school_type: Option<SchoolType>,

        #[arg(
            long,
            default_value = ".",
            help = "Directory the category files are written into"
        )]
        out_dir: PathBuf,
    },
    /// Crawl one category and print its records to stdout
    List {
        #[arg(
            value_parser = parse_school_type,
            help = "Category to crawl (afdeling, hovedskole or institution)"
        )]
        school_type: SchoolType,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn parse_school_type(s: &str) -> Result<SchoolType, String> {
    SchoolType::from_str(s)
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = SchoolScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    match cli.command {
        Commands::Scrape {
            school_type,
            out_dir,
        } => {
            for (category, filename) in CATEGORY_FILES {
                if school_type.is_some_and(|s| s != category) {
                    continue;
                }

                log::info!("Writing \"{}\"...", filename);

                let schools = scraper.list_schools(category).unwrap_or_else(|e| {
                    log::error!("Error crawling {}: {}", category.slug(), e);
                    process::exit(1);
                });

                let path = out_dir.join(filename);
                write_schools(&path, &schools).unwrap_or_else(|e| {
                    log::error!("Error writing {}: {}", path.display(), e);
                    process::exit(1);
                });

                log::info!("Finished writing \"{}\" ({} schools)", filename, schools.len());
            }
        }

        Commands::List {
            school_type,
            format,
        } => {
            log::info!("Fetching {} listings...", school_type.slug());

            let schools = scraper.list_schools(school_type).unwrap_or_else(|e| {
                log::error!("Error crawling {}: {}", school_type.slug(), e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&schools),
                OutputFormat::Text => {
                    if schools.is_empty() {
                        println!("No entries to display.");
                    } else {
                        for (i, school) in schools.iter().enumerate() {
                            println!("{:>4}. {}", i + 1, school);
                        }
                        println!("\nTotal: {}", schools.len());
                    }
                }
            }
        }
    }
}
