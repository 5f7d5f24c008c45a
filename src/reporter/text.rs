use crate::app::node::{NodeId, TestTree};
use crate::reporter::{status, Indent};
use std::io::{self, Write};

pub(super) fn write_node(
    tree: &TestTree,
    id: NodeId,
    out: &mut dyn Write,
    level: usize,
    verbose: bool,
) -> io::Result<()> {
    let result = match tree.result(id) {
        Some(result) => result,
        None => return Ok(()),
    };
    writeln!(
        out,
        "{}{} {} {:.3} s",
        Indent(level),
        status(tree, id),
        tree.name(id),
        result.elapsed.real_secs()
    )?;
    if verbose {
        for failure in &result.failures {
            writeln!(out, "{}{}", Indent(level), failure)?;
        }
        for child in tree.children(id) {
            write_node(tree, *child, out, level + 1, verbose)?;
        }
    }
    Ok(())
}
