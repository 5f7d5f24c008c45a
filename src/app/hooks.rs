use crate::app::context::CaseContext;

/// Override points of a node's lifecycle. Every hook defaults to a no-op, so
/// an implementation only provides what it needs.
pub trait TestCase {
    fn setup(&mut self, _ctx: &mut CaseContext<'_>) {}
    fn run(&mut self, _ctx: &mut CaseContext<'_>) {}
    fn teardown(&mut self, _ctx: &mut CaseContext<'_>) {}
}

/// A node with no behavior of its own, e.g. a plain grouping suite.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

impl TestCase for NoOp {}

/// Adapts a closure into the `run` hook.
pub struct FnCase<F> {
    body: F,
}

impl<F> FnCase<F>
where
    F: FnMut(&mut CaseContext<'_>),
{
    pub fn new(body: F) -> Self {
        Self { body }
    }
}

impl<F> TestCase for FnCase<F>
where
    F: FnMut(&mut CaseContext<'_>),
{
    fn run(&mut self, ctx: &mut CaseContext<'_>) {
        (self.body)(ctx)
    }
}

pub fn case<F>(body: F) -> FnCase<F>
where
    F: FnMut(&mut CaseContext<'_>),
{
    FnCase::new(body)
}
