//! vibecraft CLI - Inspect a SQLite database and match it to visualizations
//!
//! Usage:
//!   vibecraft analyze <db> [--format summary|json|prompt|metrics]
//!   vibecraft recommend <db>
//!   vibecraft check <db> --archetype <id>
//!   vibecraft roles <db> --archetype <id>
//!   vibecraft archetypes
//!
//! Examples:
//!   vibecraft analyze data/sales.db
//!   vibecraft check data/sales.db --archetype time-series
//!   RUST_LOG=vibecraft=debug vibecraft recommend data/sales.db

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vibecraft::archetype::{check_compatibility, recommend, Archetype, ArchetypeCatalog};
use vibecraft::config::Settings;
use vibecraft::roles::map_columns;
use vibecraft::schema::{SchemaAnalyzer, SchemaDescription};
use vibecraft::summary;

#[derive(Parser)]
#[command(name = "vibecraft")]
#[command(about = "vibecraft - Schema intelligence for SQLite databases")]
#[command(version)]
struct Cli {
    /// Path to a vibecraft.toml settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log analysis details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a database's structure and column semantics
    Analyze {
        /// Path to the SQLite file
        database: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },

    /// Rank visualization archetypes for a database
    Recommend {
        /// Path to the SQLite file
        database: PathBuf,
    },

    /// Score a database against one archetype's requirements
    Check {
        /// Path to the SQLite file
        database: PathBuf,

        /// Archetype identifier (e.g. time-series)
        #[arg(short, long, value_parser = parse_archetype)]
        archetype: Archetype,
    },

    /// Show which columns fill an archetype's roles
    Roles {
        /// Path to the SQLite file
        database: PathBuf,

        /// Archetype identifier (e.g. geo-spatial)
        #[arg(short, long, value_parser = parse_archetype)]
        archetype: Archetype,
    },

    /// List the archetypes in the configured catalog
    Archetypes,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Markdown summary
    Summary,
    /// Full description as JSON
    Json,
    /// Compact JSON for prompt construction
    Prompt,
    /// Key metrics as JSON
    Metrics,
}

fn parse_archetype(s: &str) -> Result<Archetype, String> {
    s.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Analyze { database, format } => cmd_analyze(&settings, &database, format),
        Commands::Recommend { database } => cmd_recommend(&settings, &database),
        Commands::Check {
            database,
            archetype,
        } => cmd_check(&settings, &database, archetype),
        Commands::Roles {
            database,
            archetype,
        } => cmd_roles(&settings, &database, archetype),
        Commands::Archetypes => cmd_archetypes(&settings),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

fn init_tracing(verbose: bool) {
    let default = if verbose { "vibecraft=debug" } else { "vibecraft=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings, vibecraft::config::SettingsError> {
    match path {
        Some(p) => Settings::from_file(p),
        None => Settings::load(),
    }
}

fn analyze(settings: &Settings, database: &Path) -> Result<SchemaDescription, vibecraft::SchemaError> {
    SchemaAnalyzer::new(settings.analysis.clone()).analyze_non_empty(database)
}

fn cmd_analyze(settings: &Settings, database: &Path, format: OutputFormat) -> CliResult {
    let schema = analyze(settings, database)?;
    match format {
        OutputFormat::Summary => print!("{}", summary::render_markdown(&schema)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schema)?),
        OutputFormat::Prompt => println!("{}", summary::prompt_json(&schema)?),
        OutputFormat::Metrics => {
            println!("{}", serde_json::to_string_pretty(&summary::key_metrics(&schema))?)
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_recommend(settings: &Settings, database: &Path) -> CliResult {
    let catalog = ArchetypeCatalog::from_settings(&settings.archetypes)?;
    let schema = analyze(settings, database)?;

    println!("Recommended archetypes for {}:", database.display());
    for (rank, rec) in recommend(&schema, &catalog).iter().enumerate() {
        println!("  {}. {:<16} {:>3}", rank + 1, rec.archetype.as_str(), rec.score);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(settings: &Settings, database: &Path, archetype: Archetype) -> CliResult {
    let catalog = ArchetypeCatalog::from_settings(&settings.archetypes)?;
    let Some(requirement) = catalog.get(archetype) else {
        eprintln!("Archetype '{}' is not enabled", archetype);
        return Ok(ExitCode::FAILURE);
    };
    let schema = analyze(settings, database)?;

    let result = check_compatibility(requirement, &schema);
    let verdict = if result.compatible { "compatible" } else { "not compatible" };
    println!("{}: {} (score {})", requirement.name, verdict, result.score);
    for reason in &result.reasons {
        println!("  - {}", reason);
    }

    Ok(if result.compatible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_roles(settings: &Settings, database: &Path, archetype: Archetype) -> CliResult {
    let schema = analyze(settings, database)?;
    let mapping = map_columns(&schema.tables, archetype);
    if mapping.is_empty() {
        eprintln!("No table provides the roles {} needs", archetype);
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", serde_json::to_string_pretty(&mapping)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_archetypes(settings: &Settings) -> CliResult {
    let catalog = ArchetypeCatalog::from_settings(&settings.archetypes)?;
    for req in catalog.iter() {
        println!("{:<16} {}", req.archetype.as_str(), req.description);
        println!("{:<16} min tables: {}", "", req.min_tables);
        if !req.required_categories.is_empty() {
            let categories: Vec<_> = req.required_categories.iter().map(|c| c.as_str()).collect();
            println!("{:<16} requires: {}", "", categories.join(", "));
        }
    }
    Ok(ExitCode::SUCCESS)
}
