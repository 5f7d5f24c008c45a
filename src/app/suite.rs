use crate::app::error::Error;
use crate::app::hooks::{NoOp, TestCase};
use crate::app::node::{NodeId, TestTree};
use core::str::FromStr;
use std::fmt;

/// How long a case takes to run. Ordered from shortest to longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationClass {
    Quick,
    Extensive,
    TakesForever,
}

impl Default for DurationClass {
    fn default() -> Self {
        DurationClass::Quick
    }
}

impl FromStr for DurationClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUICK" => Ok(DurationClass::Quick),
            "EXTENSIVE" => Ok(DurationClass::Extensive),
            "TAKES_FOREVER" => Ok(DurationClass::TakesForever),
            _ => Err(Error::UnknownFullness(s.to_owned())),
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DurationClass::Quick => f.write_str("QUICK"),
            DurationClass::Extensive => f.write_str("EXTENSIVE"),
            DurationClass::TakesForever => f.write_str("TAKES_FOREVER"),
        }
    }
}

/// Classification of a suite. `All` only makes sense as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    All,
    Unit,
    System,
    Example,
    Performance,
}

impl Category {
    /// Parses a `--test-type` value. Empty and `core` select everything.
    pub fn from_test_type(s: &str) -> Result<Self, Error> {
        match s {
            "" | "core" => Ok(Category::All),
            "example" => Ok(Category::Example),
            "unit" => Ok(Category::Unit),
            "system" => Ok(Category::System),
            "performance" => Ok(Category::Performance),
            _ => Err(Error::UnknownCategory(s.to_owned())),
        }
    }

    /// Fixed-width prefix used by `--print-test-types`.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "all                  ",
            Category::Unit => "unit                 ",
            Category::System => "system               ",
            Category::Example => "example-as-test      ",
            Category::Performance => "performance          ",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::All => f.write_str("ALL"),
            Category::Unit => f.write_str("UNIT"),
            Category::System => f.write_str("SYSTEM"),
            Category::Example => f.write_str("EXAMPLE"),
            Category::Performance => f.write_str("PERFORMANCE"),
        }
    }
}

/// A registered tree root tagged with a category.
#[derive(Debug)]
pub struct Suite {
    category: Category,
    tree: TestTree,
}

impl Suite {
    pub fn new<N: Into<String>>(name: N, category: Category) -> Self {
        Self::with_hooks(name, category, NoOp)
    }

    pub fn with_hooks<N, T>(name: N, category: Category, hooks: T) -> Self
    where
        N: Into<String>,
        T: TestCase + 'static,
    {
        Self {
            category,
            tree: TestTree::new(name, Box::new(hooks)),
        }
    }

    pub fn name(&self) -> &str {
        self.tree.name(self.tree.root())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &TestTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut TestTree {
        &mut self.tree
    }

    /// Adds a case directly under the suite root.
    pub fn add_case<N, T>(&mut self, name: N, duration: DurationClass, case: T) -> NodeId
    where
        N: Into<String>,
        T: TestCase + 'static,
    {
        let root = self.root();
        self.tree.add_case(root, name, duration, case)
    }

    pub fn set_data_dir<D: Into<String>>(&mut self, dir: D) {
        let root = self.root();
        self.tree.set_data_dir(root, dir);
    }

    pub fn is_failed(&self) -> bool {
        self.tree.is_failed(self.root())
    }
}

/// Every suite known to the host program, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    suites: Vec<Suite>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, suite: Suite) {
        debug!("Registered suite '{}' ({})", suite.name(), suite.category());
        self.suites.push(suite);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suite> {
        self.suites.iter()
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl IntoIterator for Registry {
    type Item = Suite;
    type IntoIter = std::vec::IntoIter<Suite>;

    fn into_iter(self) -> Self::IntoIter {
        self.suites.into_iter()
    }
}
