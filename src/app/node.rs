use crate::app::hooks::TestCase;
use crate::app::result::{FailureRecord, TestResult};
use crate::app::suite::DurationClass;
use crate::time::clock::Elapsed;
use derivative::*;
use lazy_static::*;
use regex::Regex;

lazy_static! {
    // Names become temp directory components, so path separators and
    // shell-hostile characters are flagged.
    static ref ILLEGAL_NAME_REGEX: Regex =
        Regex::new(r#"["/\\|?]"#).expect("Regex compilation error");
}

/// Handle of a node inside the [`TestTree`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Lifecycle state of a node. States are only ever visited in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    SettingUp,
    RunningChildren,
    RunningSelf,
    TearingDown,
    Done,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Node {
    name: String,
    duration: DurationClass,
    data_dir: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    stage: Stage,
    #[derivative(Debug = "ignore")]
    hooks: Option<Box<dyn TestCase>>,
    result: Option<TestResult>,
}

impl Node {
    fn new(name: String, duration: DurationClass, parent: Option<NodeId>, hooks: Box<dyn TestCase>) -> Self {
        Self {
            name,
            duration,
            data_dir: None,
            children: Vec::new(),
            parent,
            stage: Stage::Idle,
            hooks: Some(hooks),
            result: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> DurationClass {
        self.duration
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    pub fn has_valid_name(&self) -> bool {
        !is_invalid_name(&self.name)
    }
}

pub fn is_invalid_name(name: &str) -> bool {
    ILLEGAL_NAME_REGEX.is_match(name)
}

/// Arena holding one test tree. Node 0 is the root; parents are stored as
/// indices so pruning and teardown need no lifetime bookkeeping.
///
/// A [`NodeId`] is only meaningful for the tree that returned it; indexing a
/// tree with a foreign id panics.
#[derive(Debug)]
pub struct TestTree {
    nodes: Vec<Node>,
}

impl TestTree {
    pub fn new<N: Into<String>>(name: N, hooks: Box<dyn TestCase>) -> Self {
        let root = Node::new(name.into(), DurationClass::Quick, None, hooks);
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a child to `parent`. Children run in insertion order.
    pub fn add_case<N, T>(&mut self, parent: NodeId, name: N, duration: DurationClass, case: T) -> NodeId
    where
        N: Into<String>,
        T: TestCase + 'static,
    {
        self.add_boxed_case(parent, name, duration, Box::new(case))
    }

    pub fn add_boxed_case<N: Into<String>>(
        &mut self,
        parent: NodeId,
        name: N,
        duration: DurationClass,
        case: Box<dyn TestCase>,
    ) -> NodeId {
        let name: String = name.into();
        if is_invalid_name(&name) {
            warn!(
                "Invalid test name: cannot contain any of '\"/\\|?': {}",
                name
            );
        }
        let id = NodeId(self.nodes.len());
        let node = Node::new(name, duration, Some(parent), case);
        trace!("Adding '{}' under '{}'", node.name, self.node(parent).name);
        self.nodes.push(node);
        self.node_mut(parent).children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn stage(&self, id: NodeId) -> Stage {
        self.node(id).stage()
    }

    pub fn result(&self, id: NodeId) -> Option<&TestResult> {
        self.node(id).result()
    }

    pub fn set_data_dir<D: Into<String>>(&mut self, id: NodeId, dir: D) {
        self.node_mut(id).data_dir = Some(dir.into());
    }

    /// Data directory of the nearest node, starting at `id`, that declares one.
    pub fn data_dir(&self, id: NodeId) -> Option<&str> {
        self.ancestors(id)
            .find_map(|current| self.node(current).data_dir.as_deref())
    }

    /// `id` followed by its parent chain up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |current| self.parent(*current))
    }

    /// Names from the root down to `id`.
    pub fn path_names(&self, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = self.ancestors(id).map(|n| self.name(n)).collect();
        names.reverse();
        names
    }

    /// False for nodes that never ran.
    pub fn is_failed(&self, id: NodeId) -> bool {
        self.result(id).map_or(false, TestResult::is_failed)
    }

    pub fn is_status_success(&self, id: NodeId) -> bool {
        self.result(id).map_or(true, TestResult::is_status_success)
    }

    /// Records `record` on `id` and marks every ancestor as having a failed
    /// descendant. The walk always reaches the root.
    pub fn report_failure(&mut self, id: NodeId, record: FailureRecord) {
        debug!("Failure in '{}': {}", self.name(id), record);
        self.node_mut(id)
            .result
            .get_or_insert_with(TestResult::default)
            .failures
            .push(record);
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            self.node_mut(ancestor)
                .result
                .get_or_insert_with(TestResult::default)
                .children_failed = true;
            current = self.parent(ancestor);
        }
    }

    /// Detaches the direct children of `id` whose duration class exceeds
    /// `max`. Returns how many were removed.
    pub fn prune_children(&mut self, id: NodeId, max: DurationClass) -> usize {
        let children = std::mem::take(&mut self.node_mut(id).children);
        let (kept, pruned): (Vec<NodeId>, Vec<NodeId>) = children
            .into_iter()
            .partition(|child| self.node(*child).duration <= max);
        for child in &pruned {
            debug!(
                "Pruning '{}' ({} > {})",
                self.name(*child),
                self.node(*child).duration,
                max
            );
            let node = self.node_mut(*child);
            node.parent = None;
            node.hooks = None;
        }
        self.node_mut(id).children = kept;
        pruned.len()
    }

    pub(crate) fn set_stage(&mut self, id: NodeId, stage: Stage) {
        trace!("'{}' {:?} -> {:?}", self.name(id), self.stage(id), stage);
        self.node_mut(id).stage = stage;
    }

    pub(crate) fn begin_result(&mut self, id: NodeId) {
        self.node_mut(id).result = Some(TestResult::default());
    }

    pub(crate) fn set_elapsed(&mut self, id: NodeId, elapsed: Elapsed) {
        if let Some(result) = self.node_mut(id).result.as_mut() {
            result.elapsed = elapsed;
        }
    }

    pub(crate) fn take_hooks(&mut self, id: NodeId) -> Option<Box<dyn TestCase>> {
        self.node_mut(id).hooks.take()
    }

    pub(crate) fn restore_hooks(&mut self, id: NodeId, hooks: Option<Box<dyn TestCase>>) {
        self.node_mut(id).hooks = hooks;
    }
}
