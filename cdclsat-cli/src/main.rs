use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::time::Duration;

use anyhow::{Context as _, Error};
use clap::{value_t, values_t, App, AppSettings, Arg, ArgMatches};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use cdclsat::config::{SolverConfig, SolverConfigUpdate};
use cdclsat::solver::Solver;

mod watchdog;

use watchdog::Watchdog;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{:#}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("CDCLSAT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is cdclsat {}", env!("CDCLSAT_VERSION"));
    info!(
        "  {} build - {}",
        env!("CDCLSAT_PROFILE"),
        env!("CDCLSAT_RUSTC_VERSION")
    );
}

fn cli_app() -> App<'static, 'static> {
    App::new("cdclsat")
        .version(env!("CDCLSAT_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'The input file to use (stdin if omitted)'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'cdclsat -C help' for a list of options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::from_usage("[timeout] --timeout=[SECONDS] 'Give up after this many seconds'")
                .default_value("20")
                .long_help("Give up after this many seconds, exiting with code 1. 0 disables."),
        )
        .arg_from_usage(
            "[seed] --seed=[N] 'Seed for random decision polarities, same as -C random_seed=N'",
        )
}

/// Collect configuration changes from a config file and command line options.
///
/// Later options take precedence over earlier ones and the config file.
fn config_update(matches: &ArgMatches) -> Result<SolverConfigUpdate, Error> {
    let mut config_update = SolverConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)
            .and_then(|mut file| file.read_to_string(&mut config_contents))
            .with_context(|| format!("reading config file '{}'", config_path))?;

        config_update.merge(
            toml::from_str(&config_contents)
                .with_context(|| format!("parsing config file '{}'", config_path))?,
        );
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or_default() {
        config_update.merge(
            toml::from_str(&config_option)
                .with_context(|| format!("parsing config option '{}'", config_option))?,
        );
    }

    if matches.is_present("seed") {
        config_update.merge(SolverConfigUpdate {
            random_seed: Some(value_t!(matches, "seed", u64)?),
            ..SolverConfigUpdate::new()
        });
    }

    Ok(config_update)
}

fn main_with_err() -> Result<i32, Error> {
    let matches = cli_app().get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or_default()
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", SolverConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let config_update = config_update(&matches)?;

    let mut solver = Solver::new();

    solver.config(&config_update)?;

    let timeout = value_t!(matches, "timeout", u64)?;
    let watchdog = if timeout > 0 {
        Some(Watchdog::start(Duration::from_secs(timeout)))
    } else {
        None
    };

    let stdin = io::stdin();

    let mut locked_stdin;
    let mut opened_file;

    let file = match matches.value_of("INPUT") {
        Some(path) => {
            info!("Reading file '{}'", path);
            opened_file =
                fs::File::open(path).with_context(|| format!("opening input '{}'", path))?;
            &mut opened_file as &mut dyn io::Read
        }
        None => {
            info!("Reading from stdin");
            locked_stdin = stdin.lock();
            &mut locked_stdin as &mut dyn io::Read
        }
    };

    solver.add_dimacs_cnf(file)?;

    let result = solver.solve();

    if let Some(watchdog) = watchdog {
        watchdog.finish();
    }

    for line in solver.stats().to_string().lines() {
        println!("c {}", line);
    }

    match result {
        Ok(true) => {
            println!("s SATISFIABLE");
            print!("v");
            for l in solver.model().unwrap_or_default() {
                print!(" {}", l);
            }
            println!(" 0");
            Ok(10)
        }
        Ok(false) => {
            println!("s UNSATISFIABLE");
            Ok(20)
        }
        Err(err) => {
            error!("{}", err);
            println!("s UNKNOWN");
            Ok(0)
        }
    }
}
