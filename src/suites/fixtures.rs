//! Suites that end badly on purpose. Only registered when the `fixtures`
//! setting is on, so the runner's own failure paths can be driven end to end.

use crate::app::hooks::case;
use crate::app::suite::{Category, DurationClass, Suite};

pub(super) fn failing() -> Suite {
    let mut suite = Suite::new("failing-fixture", Category::Unit);
    suite.add_case(
        "mismatch",
        DurationClass::Quick,
        case(|ctx| expect_eq!(ctx, 1 + 1, 3, "always fails")),
    );
    suite
}

pub(super) fn missing_data_dir() -> Suite {
    let mut suite = Suite::new("missing-data-dir-fixture", Category::Unit);
    suite.add_case(
        "reference-file",
        DurationClass::Quick,
        case(|ctx| {
            let path = ctx.data_dir_filename("reference.txt");
            debug!("Unreachable without a data dir: {}", path.display());
        }),
    );
    suite
}
