pub mod common {
    /// Name of the runner binary, shown in usage.
    pub const RUNNER_NAME: &'static str = "test-runner";
    /// Prefix of the default temporary directory name.
    pub const TEMP_DIR_PREFIX: &'static str = "simtest";
    /// Files that identify the top of the source tree.
    pub const SOURCE_DIR_MARKERS: [&'static str; 2] = ["VERSION", "LICENSE"];
    /// Prefix of settings read from the environment, e.g. `SIMTEST_TEMPDIR`.
    pub const ENV_PREFIX: &'static str = "SIMTEST";
}
