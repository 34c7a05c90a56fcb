use std::{num::NonZeroUsize, path::PathBuf};

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};

use utils::{init_log, log_args};

use crate::config::Config;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    log_args(
        Command::new(crate_name!())
            .about(crate_description!())
            .version(crate_version!())
            .author(crate_authors!()),
    )
    .arg(
        Arg::new("chrom")
            .short('c')
            .long("chrom")
            .value_parser(value_parser!(String))
            .value_name("STRING")
            .default_value("II")
            .help("Chromosome to summarize"),
    )
    .arg(
        Arg::new("length")
            .short('L')
            .long("length")
            .value_parser(value_parser!(NonZeroUsize))
            .value_name("INT")
            .default_value("4539804")
            .help("Length of chromosome"),
    )
    .arg(
        Arg::new("window")
            .short('w')
            .long("window")
            .value_parser(value_parser!(NonZeroUsize))
            .value_name("INT")
            .default_value("1000")
            .help("Window width in bases"),
    )
    .arg(
        Arg::new("smooth")
            .short('s')
            .long("smooth")
            .value_parser(value_parser!(NonZeroUsize))
            .value_name("INT")
            .default_value("10")
            .help("Width (in windows) of moving average"),
    )
    .arg(
        Arg::new("threshold")
            .short('t')
            .long("threshold")
            .value_parser(value_parser!(f64))
            .value_name("FLOAT")
            .default_value("0.7")
            .help("Scores above this value are counted as calls"),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Set output file [default: BrdU_data_chr<CHROM>.wig]"),
    )
    .arg(
        Arg::new("plot")
            .short('p')
            .long("plot")
            .value_parser(value_parser!(PathBuf))
            .value_name("PATH")
            .help("Set SVG plot file [default: BrdU_data_chr<CHROM>.svg]"),
    )
    .arg(
        Arg::new("no_plot")
            .long("no-plot")
            .action(ArgAction::SetTrue)
            .conflicts_with("plot")
            .help("Do not write a plot of window ratios"),
    )
    .arg(
        Arg::new("detect_file")
            .value_parser(value_parser!(PathBuf))
            .value_name("DETECT_FILE")
            .required(true)
            .help("Input file with per base scores"),
    )
}

/// Build Config from parsed matches
fn config_from_matches(m: &ArgMatches) -> anyhow::Result<Config> {
    let input = m
        .get_one::<PathBuf>("detect_file")
        .expect("Missing detect file")
        .clone();

    let target = m
        .get_one::<String>("chrom")
        .expect("Missing default chromosome")
        .clone();

    let get_size = |s: &str| {
        *m.get_one::<NonZeroUsize>(s)
            .unwrap_or_else(|| panic!("Missing default {}", s))
    };
    let seq_length = get_size("length");
    let window = get_size("window");
    let smooth = get_size("smooth");

    let output = m
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("BrdU_data_chr{}.wig", target)));

    let plot = (!m.get_flag("no_plot")).then(|| {
        m.get_one::<PathBuf>("plot")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(format!("BrdU_data_chr{}.svg", target)))
    });

    let mut cfg = Config::new(input, target, seq_length, window, smooth, output);

    if let Some(x) = m.get_one::<f64>("threshold") {
        cfg.set_threshold(*x)?
    }
    if let Some(p) = plot {
        cfg.set_plot_file(p)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let m = cli_model().try_get_matches_from(args)?;
        config_from_matches(&m)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["call_window", "detect.txt"]).unwrap();
        assert_eq!(cfg.input(), Path::new("detect.txt"));
        assert_eq!(cfg.target(), "II");
        assert_eq!(cfg.seq_length(), 4539804);
        assert_eq!(cfg.window().get(), 1000);
        assert_eq!(cfg.smooth().get(), 10);
        assert_eq!(cfg.threshold(), 0.7);
        assert_eq!(cfg.output_file(), Path::new("BrdU_data_chrII.wig"));
        assert_eq!(cfg.plot_file(), Some(Path::new("BrdU_data_chrII.svg")));
    }

    #[test]
    fn plot_can_be_disabled() {
        let cfg = parse(&["call_window", "-c", "I", "--no-plot", "detect.txt"]).unwrap();
        assert_eq!(cfg.output_file(), Path::new("BrdU_data_chrI.wig"));
        assert!(cfg.plot_file().is_none());
        assert!(parse(&["call_window", "--no-plot", "-p", "x.svg", "detect.txt"]).is_err());
    }

    #[test]
    fn options() {
        let cfg = parse(&[
            "call_window",
            "-c",
            "chrX",
            "-L",
            "5000",
            "-w",
            "100",
            "-s",
            "3",
            "-t",
            "0.5",
            "-p",
            "x.svg",
            "detect.txt.gz",
        ])
        .unwrap();
        assert_eq!(cfg.target(), "chrX");
        assert_eq!(cfg.seq_length(), 5000);
        assert_eq!(cfg.window().get(), 100);
        assert_eq!(cfg.smooth().get(), 3);
        assert_eq!(cfg.threshold(), 0.5);
        assert_eq!(cfg.output_file(), Path::new("BrdU_data_chrchrX.wig"));
        assert_eq!(cfg.plot_file(), Some(Path::new("x.svg")));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(parse(&["call_window", "-w", "0", "d.txt"]).is_err());
        assert!(parse(&["call_window", "-s", "0", "d.txt"]).is_err());
        assert!(parse(&["call_window", "-L", "0", "d.txt"]).is_err());
        assert!(parse(&["call_window", "-t", "nan", "d.txt"]).is_err());
        assert!(parse(&["call_window"]).is_err());
    }
}
