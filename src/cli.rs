// CLI module - command-line argument parsing and handlers
//
// Provides:
// - config --show: Display effective configuration
// - config --path: Print the config file location
// - config --reset: Regenerate config file with defaults
// - list <resource>: Print one page of a resource without the TUI

use crate::config::{Config, VERSION};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// catalog-admin - terminal admin console for the shop catalog
#[derive(Parser)]
#[command(name = "catalog-admin")]
#[command(version = VERSION)]
#[command(about = "Terminal admin console for the shop catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Print one page of a resource
    List(ListArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListArgs {
    /// Resource name, e.g. brands or orders
    pub resource: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Filter as key=value, repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

/// What the binary should run after argument handling
#[derive(Debug)]
pub enum Mode {
    Tui,
    List(ListArgs),
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{s}`")),
    }
}

/// Handle CLI commands. Returns `None` when a command was fully handled.
pub fn handle_cli() -> Option<Mode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                println!("Usage: catalog-admin config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            None
        }
        Some(Commands::List(args)) => Some(Mode::List(args)),
        None => Some(Mode::Tui),
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!(
        "token = {}",
        if config.token.is_some() { "\"(set)\"" } else { "# unset" }
    );
    println!("locale = {:?}", config.locale);
    println!("results_on_page = {}", config.results_on_page);
    println!("request_timeout_secs = {}", config.request_timeout_secs);
    println!("theme = {:?}", config.theme);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!();
    println!("# resources:");
    for resource in &config.resources {
        let ops: Vec<&str> = [
            ("update", resource.update_path.is_some()),
            ("remove", resource.remove_path.is_some()),
            ("add", resource.has_add()),
        ]
        .into_iter()
        .filter_map(|(op, enabled)| enabled.then_some(op))
        .collect();
        println!(
            "#   {:<14} {:<24} {}",
            resource.name,
            resource.list_path,
            ops.join(",")
        );
    }

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    if let Some(path) = Config::config_path().filter(|p| p.exists()) {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    match Config::reset_config() {
        Ok(path) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_arguments_parse() {
        let cli = Cli::try_parse_from([
            "catalog-admin",
            "list",
            "brands",
            "--page",
            "2",
            "--sort",
            "name",
            "--desc",
            "--filter",
            "name=red",
            "--filter",
            "country=",
        ])
        .unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.page, 2);
        assert_eq!(args.sort.as_deref(), Some("name"));
        assert!(args.desc);
        assert_eq!(
            args.filters,
            vec![
                ("name".to_string(), "red".to_string()),
                ("country".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn malformed_filter_is_rejected() {
        assert!(Cli::try_parse_from(["catalog-admin", "list", "brands", "--filter", "red"]).is_err());
        assert!(Cli::try_parse_from(["catalog-admin", "list", "brands", "--desc"]).is_err());
    }
}
