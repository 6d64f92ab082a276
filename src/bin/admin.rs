//! CLI administration tool for slug-shortener.
//!
//! Inspects and renames links, shows analytics and performs database checks
//! directly against PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links of an owner
//! cargo run --bin admin -- links list --owner user-1
//!
//! # Show a link with its analytics
//! cargo run --bin admin -- links show abc123
//!
//! # Rename a slug
//! cargo run --bin admin -- links rename abc123 launch-2025
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): prefix for printed short URLs

use slug_shortener::api::dto::update_link::UpdateLinkRequest;
use slug_shortener::application::services::{AnalyticsService, LinkService};
use slug_shortener::config::Config;
use slug_shortener::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

type PgLinkService = LinkService<PgLinkRepository, PgVisitRepository>;

/// CLI tool for managing slug-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and rename links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links created by an owner
    List {
        /// Owner id as forwarded in X-Owner-Id
        #[arg(short, long)]
        owner: String,
    },

    /// Show a link with its visit analytics
    Show { slug: String },

    /// Move a link to a new slug
    Rename {
        slug: String,
        new_slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let base_url = std::env::var("BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3001".to_string())
        .trim_end_matches('/')
        .to_string();

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool, &base_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let link_repository = Arc::new(PgLinkRepository::new(Arc::clone(&pool)));
    let visit_repository = Arc::new(PgVisitRepository::new(pool));
    let links = LinkService::new(link_repository, Arc::clone(&visit_repository));

    match action {
        LinksAction::List { owner } => list_links(&links, &owner, base_url).await?,
        LinksAction::Show { slug } => {
            show_link(&AnalyticsService::new(visit_repository), &slug, base_url).await?
        }
        LinksAction::Rename {
            slug,
            new_slug,
            yes,
        } => rename_link(&links, &slug, &new_slug, yes, base_url).await?,
    }

    Ok(())
}

/// Lists an owner's links, newest first.
///
/// # Output Format
///
/// ```text
/// Links of user-1
///
///   Slug         Created            Visits   Long URL
///   ───────────────────────────────────────────────────────────────
///   launch       2025-01-16 14:20   12       https://example.com/launch
///   abc123       2025-01-15 10:30   0        https://example.com
/// ```
async fn list_links(links: &PgLinkService, owner: &str, base_url: &str) -> Result<()> {
    println!("{} {}", "Links of".bright_blue().bold(), owner.cyan());
    println!();

    let items = links
        .list_by_owner(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if items.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<18} {:<8} {}",
        "Slug".bright_white().bold(),
        "Created".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for item in &items {
        let link = &item.link;
        println!(
            "  {:<12} {:<18} {:<8} {}",
            link.slug.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            item.visit_count.to_string().bright_green(),
            link.long_url
        );
    }

    println!();
    println!(
        "  Total: {}   Base: {}",
        items.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Prints a link and its analytics summary.
async fn show_link(
    analytics: &AnalyticsService<PgVisitRepository>,
    slug: &str,
    base_url: &str,
) -> Result<()> {
    let report = analytics
        .summarize(slug)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", slug, e))?;

    let link = &report.link;
    let totals = &report.totals;

    println!("{}", "Link".bright_blue().bold());
    println!("  Short URL: {}", link.short_url(base_url).bright_yellow());
    println!("  Long URL:  {}", link.long_url);
    println!("  Owner:     {}", link.owner_id.as_deref().unwrap_or("-").cyan());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();

    println!("{}", "Visits".bright_blue().bold());
    println!(
        "  Total:      {}",
        totals.total_visits.to_string().bright_green().bold()
    );
    println!(
        "  Last 24h:   {}",
        totals.last_day_visits.to_string().bright_green().bold()
    );

    for (browser, count) in &totals.browsers {
        println!("  {:<11} {}", format!("{browser}:"), count);
    }

    if !totals.recent_visits.is_empty() {
        println!();
        println!("{}", "Recent".bright_blue().bold());
        for visit in &totals.recent_visits {
            println!(
                "  {}  {}",
                visit.visited_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
                visit.ip_address.as_deref().unwrap_or("-")
            );
        }
    }
    println!();

    Ok(())
}

/// Renames a slug after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - The old short URL stops resolving immediately
async fn rename_link(
    links: &PgLinkService,
    slug: &str,
    new_slug: &str,
    skip_confirm: bool,
    base_url: &str,
) -> Result<()> {
    println!("{}", "Rename Link".bright_blue().bold());
    println!();

    check_new_slug(new_slug)?;

    let link = links
        .lookup_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", slug, e))?;

    println!("  From: {}", link.short_url(base_url).cyan());
    println!("  To:   {}/{}", base_url, new_slug.bright_yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Old short URL will stop working. Continue?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let renamed = links
        .rename(slug, new_slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to rename link: {}", e))?;

    println!();
    println!(
        "{} {}",
        "Renamed:".green().bold(),
        renamed.short_url(base_url).bright_yellow()
    );
    println!();

    Ok(())
}

/// Applies the API's slug rules, so a rename cannot produce a slug that
/// `/{slug}` never serves.
fn check_new_slug(new_slug: &str) -> Result<()> {
    UpdateLinkRequest {
        new_slug: new_slug.to_string(),
    }
    .validate()
    .map_err(|e| anyhow::anyhow!("Invalid slug '{}': {}", new_slug, e))
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of visits
/// - Number of distinct owners
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(pool)
        .await?;

    let owners_count: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT owner_id) FROM links WHERE owner_id IS NOT NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits:  {}",
        visits_count.to_string().bright_green().bold()
    );
    println!(
        "  Owners:  {}",
        owners_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
