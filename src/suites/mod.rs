//! Suites shipped with the runner binary.

mod fixtures;
mod lifecycle;
mod sample;
mod system_path;

use crate::app::suite::Registry;

/// Registers every built-in suite, in listing order.
pub fn register_all(registry: &mut Registry) {
    registry.register(sample::suite());
    registry.register(system_path::suite());
    registry.register(lifecycle::suite());
}

/// Registers the deliberately failing suites after the built-in ones.
pub fn register_fixtures(registry: &mut Registry) {
    registry.register(fixtures::failing());
    registry.register(fixtures::missing_data_dir());
}
