use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no tests match the requested string")]
    NoMatch,

    #[error("tests should be launched separately (one at a time), {0} suites matched")]
    Ambiguous(usize),

    #[error("Invalid test type specified: {0}")]
    UnknownCategory(String),

    #[error("invalid fullness '{0}', expected QUICK, EXTENSIVE or TAKES_FOREVER")]
    UnknownFullness(String),

    #[error("no one called set_data_dir on '{0}' or any of its ancestors")]
    NoDataDir(String),

    #[error("could not find source directory from {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("io error: {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit statuses of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    InvalidFullness = 3,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::UnknownFullness(_) => ExitCode::InvalidFullness,
            _ => ExitCode::Failure,
        }
    }
}
