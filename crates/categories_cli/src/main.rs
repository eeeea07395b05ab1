//! Command-line driver for the categories store.
//!
//! # Responsibility
//! - Open a category database, run one operation, print the result as JSON.
//! - Keep all configuration in flags with environment fallbacks.

use anyhow::{bail, Context, Result};
use categories_core::{
    default_log_level, init_logging, open_db, seed_default_categories, CategoryService,
    CategoryToCreate, CategoryValidation, SqliteCategoryRepository,
};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "categories", version, about = "Manage the categories store")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "CATEGORIES_DB", default_value = "categories.sqlite3")]
    db: PathBuf,

    /// Directory for rotated log files. Logging is off when unset.
    #[arg(long, env = "CATEGORIES_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CATEGORIES_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every category.
    List,
    /// Show one category by slug.
    Get { slug: String },
    /// Create a category; the slug is derived from the title.
    Create { title: String },
    /// Retitle the category found by slug.
    Update { slug: String, title: String },
    /// Delete the category found by slug.
    Delete { slug: String },
    /// Check a JSON document against the category input shape.
    Validate { json: String },
    /// Insert the html/css/js fixture categories if missing.
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = absolute_dir(log_dir)?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} db={}",
        categories_core::core_version(),
        cli.db.display()
    );

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    let repo = SqliteCategoryRepository::try_new(&conn)?;
    let service = CategoryService::new(repo);

    match cli.command {
        Command::List => print_json(&service.list_all()?),
        Command::Get { slug } => match service.get_by_slug(&slug)? {
            Some(category) => print_json(&category),
            None => bail!("category not found: {slug}"),
        },
        Command::Create { title } => {
            let input = CategoryToCreate::new(title).context("invalid title")?;
            print_json(&service.create(&input)?)
        }
        Command::Update { slug, title } => {
            let input = CategoryToCreate::new(title).context("invalid title")?;
            print_json(&service.update(&slug, &input)?)
        }
        Command::Delete { slug } => print_json(&service.remove(&slug)?),
        Command::Validate { json } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("input is not valid JSON")?;
            match service.validate(&value) {
                CategoryValidation::Valid(input) => print_json(&input),
                CategoryValidation::Invalid(issues) => {
                    print_json(&issues)?;
                    bail!("{} validation issue(s)", issues.len())
                }
            }
        }
        Command::Seed => {
            let inserted = seed_default_categories(&conn).context("failed to seed categories")?;
            print_json(&serde_json::json!({ "inserted": inserted }))
        }
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(dir))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
