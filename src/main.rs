//! sbsyntax - TextMate grammar generator for SBSS and SBML
//!
//! Builds the attribute/value highlighting rules of both languages from the
//! known-attribute table and splices them into JSON templates.
//!
//! Usage:
//!   sbsyntax [LANGUAGE]...          - Generate the named (or all configured) languages
//!   sbsyntax --list                 - List available languages

mod config;
mod driver;
mod error;
mod syntax;

use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use config::GeneratorConfig;
use driver::Driver;
use error::Result;
use syntax::{PairContext, Validation};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn cli() -> Command {
    let contexts = ["list", "group", "inline-list"];
    Command::new("sbsyntax")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate TextMate grammars for SBSS and SBML")
        .arg(
            Arg::new("languages")
                .help("Languages to generate (default: all configured)")
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file (default: ./sbsyntax.toml if present)"),
        )
        .arg(
            Arg::new("templates")
                .long("templates")
                .short('t')
                .value_name("DIR")
                .help("Directory holding the templates"),
        )
        .arg(
            Arg::new("syntaxes")
                .long("syntaxes")
                .short('o')
                .value_name("DIR")
                .help("Output directory for grammars"),
        )
        .arg(
            Arg::new("languages-dir")
                .long("languages-dir")
                .value_name("DIR")
                .help("Output directory for editor configurations"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .value_name("CONTEXT")
                .action(ArgAction::Append)
                .value_parser(contexts)
                .help("Flag unknown values of known attributes in a pair context"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .value_name("CONTEXT")
                .action(ArgAction::Append)
                .value_parser(contexts)
                .help("Accept any value in a pair context"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List available languages and exit"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("More output (-vv for debug)"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only report errors"),
        )
}

fn run() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(level_filter(&matches));

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = GeneratorConfig::load(config_path.as_deref())?;
    apply_overrides(&mut config, &matches);

    let driver = Driver::new(config)?;

    if matches.get_flag("list") {
        for name in driver.available_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let requested: Vec<String> = matches
        .get_many::<String>("languages")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    driver.run(&requested)?;

    Ok(())
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut GeneratorConfig, matches: &ArgMatches) {
    if let Some(dir) = matches.get_one::<String>("templates") {
        config.templates_dir = PathBuf::from(dir);
    }
    if let Some(dir) = matches.get_one::<String>("syntaxes") {
        config.syntaxes_dir = PathBuf::from(dir);
    }
    if let Some(dir) = matches.get_one::<String>("languages-dir") {
        config.languages_dir = PathBuf::from(dir);
    }

    for (flag, validation) in [("strict", Validation::Strict), ("lenient", Validation::Lenient)] {
        let contexts = matches
            .get_many::<String>(flag)
            .into_iter()
            .flatten()
            .filter_map(|name| PairContext::from_name(name));
        for context in contexts {
            config.validation.set(context, validation);
        }
    }
}

fn level_filter(matches: &ArgMatches) -> LevelFilter {
    if matches.get_flag("quiet") {
        return LevelFilter::Error;
    }
    match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
