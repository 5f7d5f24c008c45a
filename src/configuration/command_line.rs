use crate::app::error::Error;
use crate::app::options::{Output, RunOptions};
use crate::app::selector::SelectionFilter;
use crate::app::suite::{Category, DurationClass};
use crate::configuration::constants::common::RUNNER_NAME;
use crate::configuration::settings::Settings;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = RUNNER_NAME, global_settings = &[AppSettings::DisableVersion])]
pub struct Opt {
    /// Print the list of names of tests available
    #[structopt(long = "print-test-name-list", alias = "list")]
    pub print_test_name_list: bool,

    /// Print the type of tests along with their names
    #[structopt(long = "print-test-types")]
    pub print_test_types: bool,

    /// Print the list of types of tests available
    #[structopt(long = "print-test-type-list")]
    pub print_test_type_list: bool,

    /// Print name of temporary directory before running the tests
    #[structopt(long = "print-temp-dir")]
    pub print_temp_dir: bool,

    /// Process only tests of type TYPE: core, example, unit, system or performance
    #[structopt(long = "test-type", value_name = "TYPE")]
    pub test_type: Option<String>,

    /// Process only the test suite whose name is NAME
    #[structopt(long = "test-name", alias = "suite", value_name = "NAME")]
    pub test_name: Option<String>,

    /// When a test fails, crash immediately (useful when running under a debugger)
    #[structopt(long = "assert-on-failure")]
    pub assert_on_failure: bool,

    /// When a test fails, stop immediately
    #[structopt(long = "stop-on-failure")]
    pub stop_on_failure: bool,

    /// Duration of tests to run: QUICK, EXTENSIVE or TAKES_FOREVER, where each level includes the shorter ones
    #[structopt(long, value_name = "FULLNESS")]
    pub fullness: Option<String>,

    /// Print details of test execution
    #[structopt(long)]
    pub verbose: bool,

    /// Format test run output as xml
    #[structopt(long)]
    pub xml: bool,

    /// Set temp dir for tests to store output files
    #[structopt(long, value_name = "DIR", parse(from_os_str))]
    pub tempdir: Option<PathBuf>,

    /// Set data dir for tests to read reference files
    #[structopt(long, value_name = "DIR", parse(from_os_str))]
    pub datadir: Option<PathBuf>,

    /// Send test result to FILE instead of standard output
    #[structopt(long, value_name = "FILE", parse(from_os_str))]
    pub out: Option<PathBuf>,

    /// Append test result to FILE (or to --out) instead of truncating it
    #[structopt(long, value_name = "FILE")]
    pub append: Option<Option<String>>,

    /// Regenerate reference data instead of writing to the temp dir
    #[structopt(long = "update-data")]
    pub update_data: bool,

    /// Settings file. Supported: YAML, JSON, TOML, HJSON
    #[structopt(long, value_name = "FILE", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE", parse(from_os_str))]
    pub log_output_file: Option<PathBuf>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Opt {
    /// Merges the flags over `settings`. Flags win; boolean settings can only
    /// be switched on.
    pub fn into_options(self, settings: Settings) -> Result<RunOptions, Error> {
        let fullness = self.fullness.or(settings.fullness);
        let max_duration = match fullness {
            Some(fullness) => fullness.parse::<DurationClass>()?,
            None => DurationClass::Quick,
        };
        let category = Category::from_test_type(self.test_type.as_deref().unwrap_or(""))?;
        let output = match (self.out, self.append) {
            (_, Some(Some(path))) => Output::File {
                path: PathBuf::from(path),
                append: true,
            },
            (Some(path), append) => Output::File {
                path,
                append: append.is_some(),
            },
            (None, _) => Output::Stdout,
        };

        Ok(RunOptions {
            filter: SelectionFilter {
                name: self.test_name.unwrap_or_default(),
                category,
                max_duration,
            },
            verbose: self.verbose || settings.verbose,
            xml: self.xml || settings.xml,
            assert_on_failure: self.assert_on_failure,
            continue_on_failure: !self.stop_on_failure,
            update_data: self.update_data,
            temp_dir: self.tempdir.or(settings.tempdir).unwrap_or_default(),
            data_dir: self.datadir.or(settings.datadir),
            output,
            print_temp_dir: self.print_temp_dir,
            print_test_name_list: self.print_test_name_list,
            print_test_types: self.print_test_types,
            print_test_type_list: self.print_test_type_list,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Opt {
        let mut argv = vec!["test-runner"];
        argv.extend_from_slice(args);
        Opt::from_iter_safe(argv).unwrap()
    }

    fn options(args: &[&str]) -> Result<RunOptions, Error> {
        parse(args).into_options(Settings::default())
    }

    #[test]
    fn test_defaults() {
        let options = options(&[]).unwrap();

        assert_eq!(options.filter, SelectionFilter::default());
        assert!(options.continue_on_failure);
        assert_eq!(options.output, Output::Stdout);
    }

    #[test]
    fn test_aliases() {
        let opt = parse(&["--suite=sample", "--list"]);

        assert_eq!(opt.test_name.as_deref(), Some("sample"));
        assert!(opt.print_test_name_list);
    }

    #[test]
    fn test_filter_flags() {
        let options = options(&["--test-name=sample", "--test-type=unit", "--fullness=EXTENSIVE"]).unwrap();

        assert_eq!(options.filter.name, "sample");
        assert_eq!(options.filter.category, Category::Unit);
        assert_eq!(options.filter.max_duration, DurationClass::Extensive);
    }

    #[test]
    fn test_invalid_fullness() {
        assert!(matches!(
            options(&["--fullness=SLOW"]),
            Err(Error::UnknownFullness(_))
        ));
    }

    #[test]
    fn test_invalid_test_type() {
        assert!(matches!(
            options(&["--test-type=integration"]),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_output_modes() {
        assert_eq!(
            options(&["--out=r.txt"]).unwrap().output,
            Output::File {
                path: PathBuf::from("r.txt"),
                append: false
            }
        );
        assert_eq!(
            options(&["--out=r.txt", "--append"]).unwrap().output,
            Output::File {
                path: PathBuf::from("r.txt"),
                append: true
            }
        );
        assert_eq!(
            options(&["--append=log.txt"]).unwrap().output,
            Output::File {
                path: PathBuf::from("log.txt"),
                append: true
            }
        );
    }

    #[test]
    fn test_bare_append_before_out() {
        assert_eq!(
            options(&["--append", "--out=r.txt"]).unwrap().output,
            Output::File {
                path: PathBuf::from("r.txt"),
                append: true
            }
        );
    }

    #[test]
    fn test_usage_names_the_runner_without_version_flag() {
        assert_eq!(Opt::clap().get_name(), "test-runner");
        assert!(Opt::from_iter_safe(vec!["test-runner", "--version"]).is_err());
        assert!(Opt::from_iter_safe(vec!["test-runner", "-V"]).is_err());
    }

    #[test]
    fn test_stop_on_failure() {
        assert!(!options(&["--stop-on-failure"]).unwrap().continue_on_failure);
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            tempdir: Some(PathBuf::from("/from/settings")),
            fullness: Some("TAKES_FOREVER".to_owned()),
            ..Settings::default()
        };
        let options = parse(&["--tempdir=/from/flag"]).into_options(settings).unwrap();

        assert_eq!(options.temp_dir, PathBuf::from("/from/flag"));
        assert_eq!(options.filter.max_duration, DurationClass::TakesForever);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(Opt::from_iter_safe(vec!["test-runner", "--bogus"]).is_err());
    }
}
