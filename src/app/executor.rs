use crate::app::context::CaseContext;
use crate::app::environment::Environment;
use crate::app::hooks::TestCase;
use crate::app::node::{NodeId, Stage, TestTree};
use crate::app::options::RunOptions;
use crate::time::clock::Clock;

/// Runs `id` and its subtree:
///
/// setup, then each child in order, then the node's own `run` hook, then
/// teardown. As soon as any child leaves this node failed the remaining
/// children and the `run` hook are skipped; teardown still happens.
pub fn run_node(tree: &mut TestTree, id: NodeId, options: &RunOptions, env: &mut dyn Environment) {
    debug!("Running '{}'", tree.name(id));
    tree.begin_result(id);
    env.reset_config();

    let mut hooks = tree.take_hooks(id);

    tree.set_stage(id, Stage::SettingUp);
    invoke(tree, id, options, env, &mut hooks, |h, ctx| h.setup(ctx));

    let mut clock = Clock::new();
    clock.start();

    tree.set_stage(id, Stage::RunningChildren);
    let children = tree.children(id).to_vec();
    let mut abandoned = false;
    for child in children {
        env.reset_next_stream_index();
        run_node(tree, child, options, env);
        if tree.is_failed(id) {
            info!(
                "'{}' failed below '{}', skipping the rest",
                tree.name(child),
                tree.name(id)
            );
            abandoned = true;
            break;
        }
    }

    if !abandoned {
        tree.set_stage(id, Stage::RunningSelf);
        invoke(tree, id, options, env, &mut hooks, |h, ctx| h.run(ctx));
    }

    tree.set_elapsed(id, clock.end());

    tree.set_stage(id, Stage::TearingDown);
    invoke(tree, id, options, env, &mut hooks, |h, ctx| h.teardown(ctx));

    env.reset_config();
    tree.restore_hooks(id, hooks);
    tree.set_stage(id, Stage::Done);
}

fn invoke<F>(
    tree: &mut TestTree,
    id: NodeId,
    options: &RunOptions,
    env: &mut dyn Environment,
    hooks: &mut Option<Box<dyn TestCase>>,
    hook: F,
) where
    F: FnOnce(&mut Box<dyn TestCase>, &mut CaseContext<'_>),
{
    if let Some(hooks) = hooks.as_mut() {
        let mut ctx = CaseContext::new(tree, id, options, env);
        hook(hooks, &mut ctx);
    }
}
