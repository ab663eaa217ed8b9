//! Blanjan CLI - Command-line interface for a local shopping list
//!
//! Quick add from the terminal, plus commands to edit, check off, search, and
//! delete items.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::commands::session::run_session;
use crate::commands::theme::run_theme;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blanjan=warn".parse() {
        env_filter = env_filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Add { text }) => run_add(&text, &db_path)?,
        Some(Commands::List { search, json }) => run_list(search.as_deref(), json, &db_path)?,
        Some(Commands::Search { query, json }) => run_search(&query, json, &db_path)?,
        Some(Commands::Edit { id, text, force }) => run_edit(&id, &text, force, &db_path)?,
        Some(Commands::Toggle { ids }) => run_toggle(&ids, &db_path)?,
        Some(Commands::Delete { ids, all, force }) => run_delete(&ids, all, force, &db_path)?,
        Some(Commands::Theme { show }) => run_theme(show, &db_path)?,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &db_path)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Session) => run_session(&db_path)?,
        None => {
            // Quick add mode: blanjan "oat milk"
            if cli.item.is_empty() {
                Cli::command().print_help()?;
                println!();
            } else {
                run_add(&cli.item, &db_path)?;
            }
        }
    }

    Ok(())
}
