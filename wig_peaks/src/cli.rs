use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};

use utils::{init_log, log_args};
use wig_peaks::peak::validate_delta;

use crate::config::{Config, Report};

/// Set up definition of command options for clap
fn cli_model() -> Command {
    log_args(
        Command::new(crate_name!())
            .about(crate_description!())
            .version(crate_version!())
            .author(crate_authors!()),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Set output file [default: stdout]"),
    )
    .arg(
        Arg::new("marker")
            .short('M')
            .long("marker")
            .value_parser(value_parser!(String))
            .value_name("STRING")
            .default_value("variableStep")
            .help("Lines containing this string start a new segment"),
    )
    .arg(
        Arg::new("minima")
            .short('m')
            .long("minima")
            .action(ArgAction::SetTrue)
            .help("Report minima instead of maxima"),
    )
    .arg(
        Arg::new("input")
            .value_parser(value_parser!(PathBuf))
            .value_name("INPUT")
            .required(true)
            .help("Input wiggle file"),
    )
    .arg(
        Arg::new("delta")
            .value_parser(value_parser!(f64))
            .value_name("DELTA")
            .required(true)
            .allow_negative_numbers(true)
            .help("Minimum drop (or rise) from an extreme value for it to be reported"),
    )
}

/// Build Config from parsed matches
fn config_from_matches(m: &ArgMatches) -> anyhow::Result<Config> {
    let input = m
        .get_one::<PathBuf>("input")
        .expect("Missing input file")
        .clone();

    let delta = validate_delta(*m.get_one::<f64>("delta").expect("Missing delta"))?;

    let marker = m
        .get_one::<String>("marker")
        .expect("Missing default marker")
        .clone();
    if marker.is_empty() {
        return Err(anyhow!("Segment marker can not be empty"));
    }

    let mut cfg = Config::new(input, delta, marker);

    if let Some(p) = m.get_one::<PathBuf>("output") {
        cfg.set_output_file(p.to_owned())
    }
    if m.get_flag("minima") {
        cfg.set_report(Report::Minima)
    }

    Ok(cfg)
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    config_from_matches(&m)
}
