use crate::app::assert::double_is_equal;
use crate::app::hooks::case;
use crate::app::suite::{Category, DurationClass, Suite};

pub(super) fn suite() -> Suite {
    let mut suite = Suite::new("sample", Category::Unit);
    suite.add_case(
        "arithmetic",
        DurationClass::Quick,
        case(|ctx| {
            expect_eq!(ctx, 1 + 1, 2, "integer addition");
            expect_ne!(ctx, 2 * 3, 5, "integer multiplication");
            expect_tol!(ctx, 0.1 + 0.2, 0.3, 1e-12, "floating point addition");
        }),
    );
    suite.add_case(
        "double-comparison",
        DurationClass::Quick,
        case(|ctx| {
            expect_eq!(ctx, double_is_equal(1e6, 1e6 + 1e-7, 1e-12), true, "scaled epsilon");
            expect_eq!(ctx, double_is_equal(1.0, 1.5, 1e-3), false, "distinct values");
        }),
    );
    // Siblings start from the same substream.
    suite.add_case(
        "substreams",
        DurationClass::Quick,
        case(|ctx| {
            let first = ctx.environment().allocate_stream_index();
            let second = ctx.environment().allocate_stream_index();
            require_eq!(ctx, first, 0, "stream index rewound before the case");
            expect_eq!(ctx, second, 1, "stream index advances");
        }),
    );
    suite.add_case(
        "harmonic-series",
        DurationClass::Extensive,
        case(|ctx| {
            let sum: f64 = (1..=1_000_000u32).map(|k| 1.0 / f64::from(k)).sum();
            expect_tol!(ctx, sum, 14.392_726_722_865_7, 1e-6, "partial sum of 1/k");
        }),
    );
    suite
}
