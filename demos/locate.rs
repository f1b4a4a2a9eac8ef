// Resolves one observation file against one or several precise ephemeris files,
// and prints the solutions as JSON.
// cargo run --example locate --features serde -- -o obs.txt -e eph.sp3
#[macro_use]
extern crate log;

use clap::{Arg, ArgAction, ColorChoice, Command};
use env_logger::{Builder, Target};
use std::fs::{read, read_to_string};

use gnss_locator::prelude::{Config, EphemerisFile, ObservationFile, Solver};

fn cli() -> Command {
    Command::new("locate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pseudo range positioning demo")
        .arg_required_else_help(true)
        .color(ColorChoice::Always)
        .arg(
            Arg::new("observation")
                .short('o')
                .long("obs")
                .action(ArgAction::Set)
                .required(true)
                .help("Observation file"),
        )
        .arg(
            Arg::new("ephemeris")
                .short('e')
                .long("eph")
                .action(ArgAction::Append)
                .required(true)
                .help("Precise ephemeris file. One per date covered by the observations."),
        )
        .arg(
            Arg::new("cfg")
                .short('c')
                .action(ArgAction::Set)
                .required(false)
                .help("Load JSON configuration preset (Optional)"),
        )
}

pub fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let matches = cli().get_matches();

    let cfg = match matches.get_one::<String>("cfg") {
        Some(path) => {
            let content = read_to_string(path)
                .unwrap_or_else(|e| panic!("failed to read configuration: {}", e));
            serde_json::from_str::<Config>(&content)
                .unwrap_or_else(|e| panic!("failed to parse configuration: {}", e))
        },
        None => Config::default(),
    };

    info!("{:#?}", cfg);

    let path = matches
        .get_one::<String>("observation")
        .expect("observation file is required");

    let bytes = read(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e));
    let observations = ObservationFile::from_bytes(&bytes, &cfg.parsing)
        .unwrap_or_else(|e| panic!("{}: {}", path, e));

    for diagnostic in observations.diagnostics.iter() {
        warn!("{}: {}", path, diagnostic);
    }

    let dates = observations.dates();
    info!(
        "{}: {} epochs, {} date(s)",
        path,
        observations.epochs.len(),
        dates.len()
    );

    let ephemeris = matches
        .get_many::<String>("ephemeris")
        .expect("ephemeris file is required")
        .map(|path| {
            let bytes = read(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e));
            let file = EphemerisFile::from_bytes(&bytes, &cfg.parsing)
                .unwrap_or_else(|e| panic!("{}: {}", path, e));
            for diagnostic in file.diagnostics.iter() {
                warn!("{}: {}", path, diagnostic);
            }
            file
        })
        .collect::<Vec<_>>();

    if ephemeris.len() < dates.len() {
        warn!(
            "{} ephemeris file(s) for {} date(s): some epochs cannot be resolved",
            ephemeris.len(),
            dates.len()
        );
    }

    let solver = Solver::new(&cfg);

    let solutions = solver
        .process(&observations, &ephemeris)
        .into_iter()
        .filter_map(|(_, solution)| solution.ok())
        .collect::<Vec<_>>();

    info!("{} solution(s)", solutions.len());

    let json = serde_json::to_string_pretty(&solutions)
        .unwrap_or_else(|e| panic!("failed to serialize solutions: {}", e));

    println!("{}", json);
}
