#[macro_use]
extern crate log;

use log::LevelFilter;
use simtest::app::print_test_type_list;
use simtest::configuration::command_line::Opt;
use simtest::configuration::settings::Settings;
use simtest::{suites, Error, ExitCode, Registry, SimulationEnvironment, TestRunner};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
use structopt::clap::ErrorKind;
use structopt::StructOpt;

fn main() {
    exit(run().code());
}

fn run() -> ExitCode {
    let mut options = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(options) => options,
        Err(err) => {
            // --help and unrecognized flags both just print usage
            match err.kind {
                ErrorKind::HelpDisplayed => println!("{}", err.message),
                _ => print_help(),
            }
            return ExitCode::Success;
        }
    };

    let level = options.logging.take().map_or(LevelFilter::Warn, Into::into);
    if let Err(e) = init_logging(level, &options.log_output_file) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let settings = match Settings::load(options.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => return report_error(Error::from(e)),
    };
    debug!("Loaded settings {:#?}", settings);
    let fixtures = settings.fixtures;

    let run_options = match options.into_options(settings) {
        Ok(run_options) => run_options,
        Err(e) => return report_error(e),
    };

    let mut registry = Registry::new();
    suites::register_all(&mut registry);
    if fixtures {
        suites::register_fixtures(&mut registry);
    }

    let runner = TestRunner::new(run_options);
    let stdout = io::stdout();
    let mut console = stdout.lock();
    let result = runner.run(registry, &mut SimulationEnvironment::new(), &mut console);
    let _ = console.flush();
    match result {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

fn report_error(e: Error) -> ExitCode {
    error!("{}", e);
    eprintln!("Error:  {}", e);
    match e {
        Error::UnknownFullness(_) => print_help(),
        Error::UnknownCategory(_) => {
            let _ = print_test_type_list(&mut io::stdout());
        }
        _ => {}
    }
    ExitCode::from(&e)
}

fn print_help() {
    let mut out = io::stdout();
    if Opt::clap().write_long_help(&mut out).is_ok() {
        let _ = writeln!(out);
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    debug!("Logging level {} enabled", level);
    Ok(())
}
