use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};
use log::{error, LevelFilter};
use std::process;

use calsplit::utils::logger::Logger;
use calsplit::commands::{CalsplitCommandFactory, CommandFactory};

fn main() {
    let matches = ClapCommand::new("calsplit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Split a scanned weekly calendar PDF into per-day images")
        .arg(
            Arg::new("input")
                .help("Input PDF, one calendar week per page")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with [run] and [band] settings")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("month")
                .short('m')
                .long("month")
                .help("Month to extract (1-12), defaults to the current month")
                .value_name("MONTH")
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("anchor")
                .short('a')
                .long("anchor")
                .help("Date of the Monday on the first page (YYYY-MM-DD)")
                .value_name("DATE")
                .required(false),
        )
        .arg(
            Arg::new("band")
                .short('b')
                .long("band")
                .help("Week band in page pixels at the chosen DPI (x0,y0,x1,y1)")
                .value_name("BAND")
                .required(false),
        )
        .arg(
            Arg::new("dpi")
                .long("dpi")
                .help("Rendering resolution (72-300); the band must be measured at this DPI")
                .value_name("DPI")
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (archive, or overlay image with --preview)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("preview")
                .short('p')
                .long("preview")
                .help("Draw the band and day columns on this page (1-based) instead of splitting")
                .value_name("PAGE")
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("pdfium-lib")
                .long("pdfium-lib")
                .help("Directory containing the Pdfium shared library")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file as well as the console")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("journal")
                .long("journal")
                .help("Record the page, column and date of every emitted image")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
        }
    }

    let journal = match matches.get_one::<String>("journal") {
        Some(journal_file) => match Logger::new(journal_file) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error opening journal: {}", e);
                process::exit(1);
            }
        },
        None => Logger::disabled(),
    };

    let factory = CalsplitCommandFactory::new();

    let command_result = factory.create_command(&matches, &journal);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
