use crate::app::context::CaseContext;
use crate::app::hooks::{NoOp, TestCase};
use crate::app::suite::{Category, DurationClass, Suite};

/// Builds a queue in setup, drains it in run and checks it in teardown.
#[derive(Debug, Default)]
struct QueueCase {
    queue: Vec<u32>,
    drained: Vec<u32>,
}

impl TestCase for QueueCase {
    fn setup(&mut self, _ctx: &mut CaseContext<'_>) {
        self.queue = (1..=5).collect();
    }

    fn run(&mut self, ctx: &mut CaseContext<'_>) {
        while let Some(item) = self.queue.pop() {
            self.drained.push(item);
        }
        expect_eq!(ctx, self.drained, vec![5, 4, 3, 2, 1], "items come out in LIFO order");
    }

    fn teardown(&mut self, ctx: &mut CaseContext<'_>) {
        expect_eq!(ctx, self.queue.len(), 0, "queue drained");
        self.drained.clear();
    }
}

/// Draws from the substream the runner rewound for it.
struct SubstreamCase;

impl TestCase for SubstreamCase {
    fn run(&mut self, ctx: &mut CaseContext<'_>) {
        let index = ctx.environment().allocate_stream_index();
        expect_eq!(ctx, index, 0, "fresh substream");
    }
}

pub(super) fn suite() -> Suite {
    let mut suite = Suite::new("lifecycle-example", Category::Example);
    let root = suite.root();
    let tree = suite.tree_mut();
    let group = tree.add_case(root, "group", DurationClass::Quick, NoOp);
    tree.add_case(group, "queue", DurationClass::Quick, QueueCase::default());
    tree.add_case(group, "substream", DurationClass::Quick, SubstreamCase);
    suite
}
