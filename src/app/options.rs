use crate::app::selector::SelectionFilter;
use std::path::PathBuf;

/// Where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File { path: PathBuf, append: bool },
}

impl Default for Output {
    fn default() -> Self {
        Output::Stdout
    }
}

/// Everything one invocation of the runner needs to know.
#[derive(Debug, Clone, Builder)]
#[builder(default, setter(into))]
pub struct RunOptions {
    pub filter: SelectionFilter,
    pub verbose: bool,
    pub xml: bool,
    /// Abort the process on the first reported failure.
    pub assert_on_failure: bool,
    pub continue_on_failure: bool,
    pub update_data: bool,
    pub temp_dir: PathBuf,
    /// Root that data directories are resolved against. When unset the
    /// top-level source directory is searched for.
    pub data_dir: Option<PathBuf>,
    pub output: Output,
    pub print_temp_dir: bool,
    pub print_test_name_list: bool,
    pub print_test_types: bool,
    pub print_test_type_list: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            filter: SelectionFilter::default(),
            verbose: false,
            xml: false,
            assert_on_failure: false,
            continue_on_failure: true,
            update_data: false,
            temp_dir: PathBuf::new(),
            data_dir: None,
            output: Output::default(),
            print_temp_dir: false,
            print_test_name_list: false,
            print_test_types: false,
            print_test_type_list: false,
        }
    }
}

impl RunOptions {
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }
}
