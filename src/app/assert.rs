//! Checks used inside `run` hooks.
//!
//! `expect_*` macros record a failure and carry on, unless the runner was
//! started with `--stop-on-failure`, in which case they return from the hook.
//! `require_*` macros always return from the hook after recording.

/// True when `x1` and `x2` differ by at most `epsilon` scaled to the binary
/// exponent of the larger-magnitude operand.
pub fn double_is_equal(x1: f64, x2: f64, epsilon: f64) -> bool {
    trace!("Comparing {} to {} within {}", x1, x2, epsilon);
    let max = if x1.abs() > x2.abs() { x1 } else { x2 };
    let delta = epsilon * 2f64.powi(binary_exponent(max));
    let difference = x1 - x2;
    difference <= delta && difference >= -delta
}

/// Exponent `e` such that `|x| = m * 2^e` with `m` in `[0.5, 1)`.
fn binary_exponent(x: f64) -> i32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let mut exponent = x.abs().log2().floor() as i32 + 1;
    // log2 can round across a power of two
    let scaled = x.abs() / 2f64.powi(exponent);
    if scaled >= 1.0 {
        exponent += 1;
    } else if scaled < 0.5 {
        exponent -= 1;
    }
    exponent
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_failure {
    ($ctx:expr, $cond:expr, $actual:expr, $limit:expr, $($msg:tt)+) => {
        $ctx.report_failure($crate::FailureRecord::new(
            $cond,
            format!("{:?}", $actual),
            format!("{:?}", $limit),
            format!($($msg)+),
            file!(),
            line!(),
        ))
    };
}

#[macro_export]
macro_rules! expect_eq {
    ($ctx:expr, $actual:expr, $limit:expr, $($msg:tt)+) => {{
        let (actual, limit) = (&$actual, &$limit);
        if !(*actual == *limit) {
            $crate::__record_failure!(
                $ctx,
                concat!(stringify!($actual), " (actual) == ", stringify!($limit), " (limit)"),
                actual,
                limit,
                $($msg)+
            );
            if !$ctx.must_continue_on_failure() {
                return;
            }
        }
    }};
}

#[macro_export]
macro_rules! expect_ne {
    ($ctx:expr, $actual:expr, $limit:expr, $($msg:tt)+) => {{
        let (actual, limit) = (&$actual, &$limit);
        if !(*actual != *limit) {
            $crate::__record_failure!(
                $ctx,
                concat!(stringify!($actual), " (actual) != ", stringify!($limit), " (limit)"),
                actual,
                limit,
                $($msg)+
            );
            if !$ctx.must_continue_on_failure() {
                return;
            }
        }
    }};
}

#[macro_export]
macro_rules! expect_tol {
    ($ctx:expr, $actual:expr, $limit:expr, $tol:expr, $($msg:tt)+) => {{
        let (actual, limit, tol): (f64, f64, f64) = ($actual, $limit, $tol);
        if (actual - limit).abs() > tol {
            $crate::__record_failure!(
                $ctx,
                concat!(stringify!($actual), " (actual) within ", stringify!($tol), " of ", stringify!($limit), " (limit)"),
                actual,
                limit,
                $($msg)+
            );
            if !$ctx.must_continue_on_failure() {
                return;
            }
        }
    }};
}

#[macro_export]
macro_rules! require_eq {
    ($ctx:expr, $actual:expr, $limit:expr, $($msg:tt)+) => {{
        let (actual, limit) = (&$actual, &$limit);
        if !(*actual == *limit) {
            $crate::__record_failure!(
                $ctx,
                concat!(stringify!($actual), " (actual) == ", stringify!($limit), " (limit)"),
                actual,
                limit,
                $($msg)+
            );
            return;
        }
    }};
}

#[macro_export]
macro_rules! require_tol {
    ($ctx:expr, $actual:expr, $limit:expr, $tol:expr, $($msg:tt)+) => {{
        let (actual, limit, tol): (f64, f64, f64) = ($actual, $limit, $tol);
        if (actual - limit).abs() > tol {
            $crate::__record_failure!(
                $ctx,
                concat!(stringify!($actual), " (actual) within ", stringify!($tol), " of ", stringify!($limit), " (limit)"),
                actual,
                limit,
                $($msg)+
            );
            return;
        }
    }};
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::context::CaseContext;
    use crate::app::environment::SimulationEnvironment;
    use crate::app::executor::run_node;
    use crate::app::hooks::{case, NoOp};
    use crate::app::node::TestTree;
    use crate::app::options::RunOptions;
    use crate::app::suite::DurationClass;

    fn run_case<F>(options: RunOptions, body: F) -> TestTree
    where
        F: FnMut(&mut CaseContext<'_>) + 'static,
    {
        let mut tree = TestTree::new("root", Box::new(NoOp));
        let root = tree.root();
        tree.add_case(root, "case", DurationClass::Quick, case(body));
        run_node(&mut tree, root, &options, &mut SimulationEnvironment::new());
        tree
    }

    fn failures(tree: &TestTree) -> usize {
        let child = tree.children(tree.root())[0];
        tree.result(child).unwrap().failures.len()
    }

    #[test]
    fn test_double_is_equal() {
        assert!(double_is_equal(1.0, 1.0, f64::EPSILON));
        assert!(double_is_equal(1000.0, 1000.0 + 1e-10, 1e-12));
        assert!(!double_is_equal(1.0, 1.1, 1e-3));
        assert!(double_is_equal(0.0, 0.0, 0.0));
        assert!(double_is_equal(-3.0, -3.0 + 1e-9, 1e-9));
    }

    #[test]
    fn test_binary_exponent_matches_frexp() {
        assert_eq!(binary_exponent(1.0), 1);
        assert_eq!(binary_exponent(0.5), 0);
        assert_eq!(binary_exponent(8.0), 4);
        assert_eq!(binary_exponent(-3.0), 2);
        assert_eq!(binary_exponent(0.0), 0);
    }

    #[test]
    fn test_expect_eq_records_and_continues() {
        let tree = run_case(RunOptions::default(), |ctx| {
            expect_eq!(ctx, 1 + 1, 3, "first");
            expect_eq!(ctx, 2, 2, "second");
            expect_eq!(ctx, "a", "b", "third {}", 3);
        });

        let child = tree.children(tree.root())[0];
        let result = tree.result(child).unwrap();
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].condition, "1 + 1 (actual) == 3 (limit)");
        assert_eq!(result.failures[0].actual, "2");
        assert_eq!(result.failures[0].limit, "3");
        assert_eq!(result.failures[1].message, "third 3");
        assert!(result.failures[1].file.ends_with("assert.rs"));
    }

    #[test]
    fn test_expect_eq_stops_when_not_continuing() {
        let options = RunOptions::builder()
            .continue_on_failure(false)
            .build()
            .unwrap();
        let tree = run_case(options, |ctx| {
            expect_eq!(ctx, 1, 2, "first");
            expect_eq!(ctx, 3, 4, "second");
        });

        assert_eq!(failures(&tree), 1);
    }

    #[test]
    fn test_require_returns_from_hook() {
        let tree = run_case(RunOptions::default(), |ctx| {
            require_eq!(ctx, 1, 2, "first");
            expect_eq!(ctx, 3, 4, "unreachable");
        });

        assert_eq!(failures(&tree), 1);
    }

    #[test]
    fn test_tolerance_checks() {
        let tree = run_case(RunOptions::default(), |ctx| {
            expect_tol!(ctx, 1.0, 1.05, 0.1, "within");
            expect_tol!(ctx, 1.0, 2.0, 0.1, "outside");
            expect_ne!(ctx, 1, 2, "different");
            require_tol!(ctx, 0.5, 0.5, 0.0, "exact");
        });

        assert_eq!(failures(&tree), 1);
    }
}
