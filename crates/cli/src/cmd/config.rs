//! Configuration management command
//!
//! Provides CLI interface to view and edit the Quiesce configuration.

use crate::system_config;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use quiesce_core::config::WINDOW_MS_RANGE;
use quiesce_core::DispatchOrder;

/// List all configuration values
pub fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Quiesce Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[debounce]".yellow());
    println!(
        "  {} = {} {}",
        "window_ms".cyan(),
        config.debounce.window_ms,
        format!("({:?})", config.debounce.window()).dimmed()
    );
    println!(
        "  {} = {:?}",
        "initial_term".cyan(),
        config.debounce.initial_term
    );

    println!("\n{}", "[dismiss]".yellow());
    println!("  {} = {}", "order".cyan(), config.dismiss.order);

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  window_ms: {}-{}",
        WINDOW_MS_RANGE.start(),
        WINDOW_MS_RANGE.end()
    );
    println!("  order: local-first | ambient-first");

    Ok(())
}

/// Get a single configuration value
pub fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;

    let value = match key {
        "debounce.window_ms" => config.debounce.window_ms.to_string(),
        "debounce.initial_term" => config.debounce.initial_term,
        "dismiss.order" => config.dismiss.order.to_string(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'qz config --list' to see available keys.",
            key
        ),
    };

    println!("{}", value);
    Ok(())
}

/// Set a configuration value
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    match key {
        "debounce.window_ms" => {
            let val: u64 = value.parse()
                .context("Invalid value: must be a positive integer")?;
            config.debounce.window_ms = val;
        }
        "debounce.initial_term" => {
            config.debounce.initial_term = value.to_string();
        }
        "dismiss.order" => {
            let val: DispatchOrder = value.parse()
                .context("Invalid value: must be 'local-first' or 'ambient-first'")?;
            config.dismiss.order = val;
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'qz config --list' to see available keys.",
            key
        ),
    }

    // Validate before saving
    config.validate()
        .context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", system_config::example_config());
    Ok(())
}
