// FILE: crates/cli/src/main.rs

use anyhow::{Context as _, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use readtrack_config::{apply_env_overrides, Config, ConfigManager};
use std::path::PathBuf;

mod commands;

use commands::{AddArgs, Context};

fn build_cli() -> Command {
    Command::new("readtrack")
        .version(env!("CARGO_PKG_VERSION"))
        .author("DrTomLLC")
        .about("Track reading progress and page goals across your books")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("PATH")
                .help("Directory holding the reading list")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the configuration file")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("add")
                .about("Add a book, filling in details from the catalog")
                .arg(Arg::new("title").required(true).value_name("TITLE").help("Book title"))
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Book author"))
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .required(true)
                        .value_name("PAGE")
                        .help("Page you are currently on"),
                )
                .arg(
                    Arg::new("target-page")
                        .long("target-page")
                        .value_name("PAGE")
                        .help("Page you want to reach"),
                )
                .arg(
                    Arg::new("target-date")
                        .long("target-date")
                        .value_name("YYYY-MM-DD")
                        .help("Date to reach the target page by"),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .help("Skip the catalog lookup")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").about("List every book in the reading list"))
        .subcommand(
            Command::new("show")
                .about("Show detailed information about a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID or unique prefix")),
        )
        .subcommand(
            Command::new("progress")
                .about("Record the page you have reached")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID or unique prefix"))
                .arg(
                    Arg::new("page")
                        .required(true)
                        .value_name("PAGE")
                        .help("New current page")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from the reading list")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID or unique prefix"))
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Remove every book from the reading list")
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("stats").about("Show reading statistics"))
        .subcommand(
            Command::new("export")
                .about("Export the reading list")
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Export format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file path (defaults to the configured export path)")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

fn load_config(config_file: Option<&PathBuf>) -> (Option<ConfigManager>, Config) {
    let manager = match config_file {
        Some(path) => ConfigManager::with_file(path.clone()),
        None => ConfigManager::new(),
    };

    let manager = match manager {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("warning: no configuration directory available: {}", e);
            return (None, defaults_with_env());
        }
    };

    match manager.load_with_env_overrides() {
        Ok(config) => (Some(manager), config),
        Err(e) => {
            eprintln!(
                "warning: ignoring configuration at {}: {}",
                manager.config_path().display(),
                e
            );
            (Some(manager), defaults_with_env())
        }
    }
}

fn defaults_with_env() -> Config {
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

fn resolve_data_dir(
    flag: Option<&PathBuf>,
    manager: Option<&ConfigManager>,
    config: &Config,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.clone());
    }
    if let Some(dir) = &config.app.data_dir {
        return Ok(dir.clone());
    }
    manager
        .context("Could not determine a data directory; pass --data-dir")?
        .data_dir(config)
        .context("Could not determine a data directory; pass --data-dir")
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("{} is required", name))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let (manager, config) = load_config(matches.get_one::<PathBuf>("config"));

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.as_str()),
    )
    .init();

    let data_dir = resolve_data_dir(
        matches.get_one::<PathBuf>("data-dir"),
        manager.as_ref(),
        &config,
    )?;
    log::debug!("Using data directory {}", data_dir.display());

    let ctx = Context::new(data_dir, config);

    match matches.subcommand() {
        Some(("add", sub)) => {
            let args = AddArgs {
                title: required(sub, "title")?,
                author: required(sub, "author")?,
                page: required(sub, "page")?,
                target_page: sub.get_one::<String>("target-page").map(String::as_str),
                target_date: sub.get_one::<String>("target-date").map(String::as_str),
                offline: sub.get_flag("offline"),
            };
            commands::add_book(&ctx, args).map(|_| ())
        }
        Some(("list", _)) => commands::list_books(&ctx),
        Some(("show", sub)) => commands::show_book(&ctx, required(sub, "id")?),
        Some(("progress", sub)) => {
            let page = *sub
                .get_one::<u32>("page")
                .context("page is required")?;
            commands::update_progress(&ctx, required(sub, "id")?, page)
        }
        Some(("remove", sub)) => {
            commands::remove_book(&ctx, required(sub, "id")?, sub.get_flag("force"))
        }
        Some(("clear", sub)) => commands::clear_books(&ctx, sub.get_flag("yes")),
        Some(("stats", _)) => commands::show_stats(&ctx),
        Some(("export", sub)) => {
            let format = required(sub, "format")?;
            let output = sub.get_one::<PathBuf>("output").map(PathBuf::as_path);
            commands::export_books(&ctx, format, output).map(|_| ())
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
