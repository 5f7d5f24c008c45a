#[macro_use]
pub mod assert;
pub mod context;
pub mod environment;
pub mod error;
pub mod executor;
pub mod hooks;
pub mod node;
pub mod options;
pub mod result;
pub mod selector;
pub mod suite;

use crate::app::environment::Environment;
use crate::app::error::{Error, ExitCode, Result};
use crate::app::executor::run_node;
use crate::app::options::{Output, RunOptions};
use crate::app::selector::select;
use crate::app::suite::{Registry, Suite};
use crate::reporter::Reporter;
use crate::system_path;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Drives one invocation: select, run exactly one suite, report.
pub struct TestRunner {
    options: RunOptions,
}

impl TestRunner {
    pub fn new(mut options: RunOptions) -> Self {
        if options.temp_dir.as_os_str().is_empty() {
            options.temp_dir = system_path::make_temporary_directory_name();
        }
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Handles the listing flags, otherwise runs the selection and writes
    /// the report to the configured output (`console` for stdout).
    pub fn run(
        &self,
        registry: Registry,
        env: &mut dyn Environment,
        console: &mut dyn Write,
    ) -> Result<ExitCode> {
        info!("{} suites registered", registry.len());
        let selection = select(registry, &self.options.filter);

        if self.options.print_temp_dir {
            writeln!(console, "{}", self.options.temp_dir.display())?;
        }
        if self.options.print_test_name_list {
            print_test_name_list(&selection, self.options.print_test_types, console)?;
            return Ok(ExitCode::Success);
        }
        if self.options.print_test_type_list {
            print_test_type_list(console)?;
            return Ok(ExitCode::Success);
        }

        match &self.options.output {
            Output::Stdout => self.execute(selection, env, console),
            Output::File { path, append } => {
                let mut file = open_output(path, *append)?;
                let code = self.execute(selection, env, &mut file)?;
                file.flush()?;
                Ok(code)
            }
        }
    }

    /// Runs the single selected suite. An empty or ambiguous selection is an
    /// error; nothing runs in that case.
    pub fn execute(
        &self,
        selection: Vec<Suite>,
        env: &mut dyn Environment,
        out: &mut dyn Write,
    ) -> Result<ExitCode> {
        match selection.len() {
            0 => return Err(Error::NoMatch),
            1 => {}
            n => return Err(Error::Ambiguous(n)),
        }

        let reporter = Reporter::from_options(&self.options);
        let mut failed = false;
        for mut suite in selection {
            info!("Running suite '{}' ({})", suite.name(), suite.category());
            let root = suite.root();
            run_node(suite.tree_mut(), root, &self.options, env);
            reporter.report(suite.tree(), out)?;
            if suite.is_failed() {
                warn!("Suite '{}' failed", suite.name());
                failed = true;
                if !self.options.continue_on_failure {
                    return Ok(ExitCode::Failure);
                }
            }
        }
        Ok(if failed {
            ExitCode::Failure
        } else {
            ExitCode::Success
        })
    }
}

fn open_output(path: &Path, append: bool) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub fn print_test_name_list(
    suites: &[Suite],
    print_test_types: bool,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    for suite in suites {
        if print_test_types {
            write!(out, "{}", suite.category().label())?;
        }
        writeln!(out, "{}", suite.name())?;
    }
    Ok(())
}

pub fn print_test_type_list(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "  core:        Run all TestSuite-based tests (exclude examples)")?;
    writeln!(out, "  example:     Examples (to see if example programs run successfully)")?;
    writeln!(out, "  performance: Performance Tests (check to see if the system is as fast as expected)")?;
    writeln!(out, "  system:      System Tests (spans modules to check integration of modules)")?;
    writeln!(out, "  unit:        Unit Tests (within modules to check basic functionality)")
}
