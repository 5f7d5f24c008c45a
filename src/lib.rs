//! Hierarchical test trees for simulation code: register suites, select one,
//! run its lifecycle and report the results as text or XML.

#[macro_use]
extern crate log;

#[macro_use]
extern crate derive_builder;

#[macro_use]
pub mod app;
pub mod configuration;
pub mod reporter;
pub mod suites;
pub mod system_path;
pub mod time;

pub use app::context::CaseContext;
pub use app::environment::{Environment, SimulationEnvironment};
pub use app::error::{Error, ExitCode};
pub use app::hooks::{case, FnCase, NoOp, TestCase};
pub use app::node::{NodeId, Stage, TestTree};
pub use app::options::{Output, RunOptions};
pub use app::result::{FailureRecord, TestResult};
pub use app::selector::{select, SelectionFilter};
pub use app::suite::{Category, DurationClass, Registry, Suite};
pub use app::TestRunner;
pub use reporter::{Format, Reporter};
