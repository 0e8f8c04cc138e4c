use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::commands::list::{ListOptions, ListScope};
use crate::commands::{self, CommandReport};
use crate::content::cache::default_cache_with;
use crate::content::config::load_config;
use crate::logging;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Validate and inspect the portfolio project content tree")]
#[command(version)]
struct Cli {
    /// Print the command report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rescan the content tree and fail on any schema, slug or alias violation
    Validate,
    /// List projects in listing order
    List {
        /// List archived projects instead of published ones
        #[arg(long, conflicts_with = "drafts")]
        archived: bool,
        /// List draft projects (preview only)
        #[arg(long)]
        drafts: bool,
    },
    /// Resolve a requested slug the way the router does
    Resolve {
        slug: String,
    },
    /// Show effective configuration and environment
    Status,
}

fn emit(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    if !report.ok {
        bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg = load_config()?;
    logging::init(&cfg.logging);
    default_cache_with(&cfg);

    let report = match cli.command {
        Command::Validate => commands::validate::run()?,
        Command::List { archived, drafts } => {
            let scope = if archived {
                ListScope::Archived
            } else if drafts {
                ListScope::Drafts
            } else {
                ListScope::Published
            };
            commands::list::run(&ListOptions { scope })?
        }
        Command::Resolve { slug } => commands::resolve::run(&slug)?,
        Command::Status => commands::status::run(&cfg)?,
    };

    emit(&report, cli.json)
}
