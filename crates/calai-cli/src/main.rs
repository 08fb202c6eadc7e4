use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use calai_cli::matrix::compute::{run_compute, ComputeRequest};
use calai_cli::matrix::history::{clear_history, export_history, show_history};
use calai_cli::util::load_config_or_default;
use calai_matrix::radix::{convert_radix, Radix};
use calai_matrix::{EngineConfig, Operation};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CALAI_LOG", "error,calai=info"))
        .init();

    let operation_tags: Vec<&'static str> = Operation::ALL.iter().map(|op| op.tag()).collect();
    let bases = ["binary", "octal", "decimal", "hexadecimal", "2", "8", "10", "16"];

    let matches = Command::new("calai")
        .version(clap::crate_version!())
        .about("CalAI matrix calculator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute")
                .about("Run one matrix operation and print the result")
                .arg(
                    Arg::new("operation")
                        .help("Operation to perform")
                        .required(true)
                        .value_parser(operation_tags),
                )
                .arg(
                    Arg::new("lhs")
                        .short('a')
                        .long("lhs")
                        .help("First matrix as JSON rows, e.g. [[1,2],[3,4]]")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("rhs")
                        .short('b')
                        .long("rhs")
                        .help(
                            "Second matrix as JSON rows. Required by add, subtract, multiply, \
                             divide, cramer and power.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(dimension_arg("rows1", "Declared row count of the first matrix"))
                .arg(dimension_arg("cols1", "Declared column count of the first matrix"))
                .arg(dimension_arg("rows2", "Declared row count of the second matrix"))
                .arg(dimension_arg("cols2", "Declared column count of the second matrix"))
                .arg(
                    Arg::new("precision")
                        .short('p')
                        .long("precision")
                        .help("Decimal places shown for numeric results")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(config_arg())
                .arg(history_arg(false)),
        )
        .subcommand(
            Command::new("history")
                .about("Inspect or manage a calculation history file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("show")
                        .about("List entries, most recent first")
                        .arg(history_arg(true))
                        .arg(config_arg()),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Remove all entries")
                        .arg(history_arg(true))
                        .arg(config_arg()),
                )
                .subcommand(
                    Command::new("export")
                        .about("Write entries to a CSV file")
                        .arg(
                            Arg::new("output")
                                .help("Destination .csv file")
                                .required(true)
                                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                                .value_hint(ValueHint::FilePath),
                        )
                        .arg(history_arg(true))
                        .arg(config_arg()),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an integer between number bases")
                .arg(
                    Arg::new("value")
                        .help("Integer to convert, written in the --from base")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Base the value is written in")
                        .value_parser(bases)
                        .default_value("decimal"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Base to convert to")
                        .value_parser(bases)
                        .required(true),
                ),
        )
        .subcommand(Command::new("config").about("Print the default engine configuration as JSON"))
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("compute", sub_m)) => handle_compute(sub_m),
        Some(("history", sub_m)) => handle_history(sub_m),
        Some(("convert", sub_m)) => handle_convert(sub_m),
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&EngineConfig::default())?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1)
    }
    Ok(())
}

fn dimension_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .value_parser(clap::value_parser!(usize))
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to an engine configuration JSON file")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn history_arg(required: bool) -> Arg {
    Arg::new("history")
        .long("history")
        .help("History JSON file. Overrides history_file from the configuration.")
        .required(required)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn handle_compute(matches: &ArgMatches) -> Result<()> {
    let mut config = load_config_or_default(matches.get_one::<PathBuf>("config").map(|p| p.as_path()))?;
    if let Some(history) = matches.get_one::<PathBuf>("history") {
        config.history_file = Some(history.clone());
    }

    let request = ComputeRequest::from_arguments(matches)?;
    let outcome = run_compute(&request, &config)?;
    println!("{}", outcome.render(request.precision));
    Ok(())
}

fn handle_history(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", show_m)) => {
            let path: &PathBuf = show_m.get_one("history").unwrap();
            let capacity = history_capacity(show_m)?;
            let lines = show_history(path, capacity);
            if lines.is_empty() {
                println!("No calculations in history yet.");
            }
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Some(("clear", clear_m)) => {
            let path: &PathBuf = clear_m.get_one("history").unwrap();
            let dropped = clear_history(path, history_capacity(clear_m)?)?;
            eprintln!("[Calai::History] Cleared {} entries.", dropped);
            Ok(())
        }
        Some(("export", export_m)) => {
            let path: &PathBuf = export_m.get_one("history").unwrap();
            let output: &String = export_m.get_one("output").unwrap();
            let written = export_history(path, output, history_capacity(export_m)?)?;
            eprintln!("[Calai::History] Exported {} entries to {}.", written, output);
            Ok(())
        }
        _ => unreachable!(),
    }
}

/// Capacity the history file was written with, taken from `--config`.
fn history_capacity(matches: &ArgMatches) -> Result<usize> {
    let config = load_config_or_default(matches.get_one::<PathBuf>("config").map(|p| p.as_path()))?;
    Ok(config.history_capacity)
}

fn handle_convert(matches: &ArgMatches) -> Result<()> {
    let value: &String = matches.get_one("value").unwrap();
    let from: Radix = matches
        .get_one::<String>("from")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let to: Radix = matches
        .get_one::<String>("to")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    println!("{}", convert_radix(value, from, to)?);
    Ok(())
}
