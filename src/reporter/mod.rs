pub mod escape;
mod text;
mod xml;

use crate::app::node::{NodeId, TestTree};
use crate::app::options::RunOptions;
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Xml,
}

/// Renders the results of a run tree. Nodes that never ran are skipped
/// together with their subtree.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: Format,
    verbose: bool,
}

impl Reporter {
    pub fn new(format: Format, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub fn from_options(options: &RunOptions) -> Self {
        let format = if options.xml { Format::Xml } else { Format::Text };
        Self::new(format, options.verbose)
    }

    pub fn report(&self, tree: &TestTree, out: &mut dyn Write) -> io::Result<()> {
        self.report_node(tree, tree.root(), out, 0)
    }

    pub fn report_node(&self, tree: &TestTree, id: NodeId, out: &mut dyn Write, level: usize) -> io::Result<()> {
        match self.format {
            Format::Text => text::write_node(tree, id, out, level, self.verbose),
            Format::Xml => xml::write_node(tree, id, out, level),
        }
    }
}

/// Two spaces per level.
pub(crate) struct Indent(pub usize);

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("  ")?;
        }
        Ok(())
    }
}

pub(crate) fn status(tree: &TestTree, id: NodeId) -> &'static str {
    if tree.is_failed(id) {
        "FAIL"
    } else {
        "PASS"
    }
}
