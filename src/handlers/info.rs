//! Read-only handlers: `categories` and `config`

use anyhow::{anyhow, Result};
use colored::Colorize;

use super::App;
use crate::catalog::FALLBACK_CATEGORY;
use crate::scm;

/// List the known categories, or the entries of one category
pub fn handle_categories(app: &App, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        println!("{}", "Categories:".bold());
        for category in app.catalog.categories() {
            let count = app.catalog.files_in_category(category).len();
            println!("  {} ({count})", category.cyan());
        }
        println!("  {} (unrecognized files)", FALLBACK_CATEGORY.cyan());
        return Ok(());
    };

    // Accept any capitalisation of a known category.
    let category = app
        .catalog
        .categories()
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("Unknown category: {name}"))?;

    println!("{}", category.bold());
    for info in app.catalog.files_in_category(category) {
        println!("  {} {}", format!("{:<32}", info.path).green(), info.name);
        println!("  {:<32} {}", "", info.description.dimmed());
    }
    Ok(())
}

/// Print the active configuration
pub fn handle_show_config(app: &App) -> Result<()> {
    let config = &app.config;

    println!("{}", "Current Configuration:".bold());
    println!("  {}: {}", "Config file".cyan(), config.path().display());

    let username = if config.github_username.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        config.github_username.clone()
    };
    println!("  {}: {}", "GitHub username".cyan(), username);
    println!("  {}: {}", "Repository".cyan(), config.dotfiles_repo);

    let state = if scm::is_repo(&config.local_path) {
        "repository".green()
    } else {
        "missing".yellow()
    };
    println!(
        "  {}: {} ({})",
        "Local path".cyan(),
        config.local_path.display(),
        state
    );
    println!("  {}: {}", "Multi-OS".cyan(), config.multi_os);

    if config.multi_os {
        println!("  {}: {}", "Current OS folder".cyan(), config.current_os_folder());
        for (platform, folder) in &config.os_separation {
            println!("    {platform} -> {folder}");
        }
    }

    Ok(())
}
