use crate::app::suite::{Category, DurationClass, Registry, Suite};

/// Which suites a run asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFilter {
    /// Exact suite name; empty matches any name.
    pub name: String,
    pub category: Category,
    pub max_duration: DurationClass,
}

impl Default for SelectionFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::All,
            max_duration: DurationClass::Quick,
        }
    }
}

impl SelectionFilter {
    /// Both the name and the category constraint must hold.
    pub fn matches(&self, suite: &Suite) -> bool {
        (self.category == Category::All || suite.category() == self.category)
            && (self.name.is_empty() || suite.name() == self.name)
    }
}

/// Narrows the registry to the suites matching `filter`, in registry order,
/// dropping each kept suite's direct children that take longer than
/// `filter.max_duration`.
pub fn select(registry: Registry, filter: &SelectionFilter) -> Vec<Suite> {
    registry
        .into_iter()
        .filter(|suite| filter.matches(suite))
        .map(|mut suite| {
            let root = suite.root();
            let pruned = suite.tree_mut().prune_children(root, filter.max_duration);
            if pruned > 0 {
                info!(
                    "Skipping {} case(s) of '{}' longer than {}",
                    pruned,
                    suite.name(),
                    filter.max_duration
                );
            }
            suite
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::hooks::NoOp;

    fn suite_with_durations(name: &str, category: Category) -> Suite {
        let mut suite = Suite::new(name, category);
        suite.add_case("quick", DurationClass::Quick, NoOp);
        suite.add_case("extensive", DurationClass::Extensive, NoOp);
        suite.add_case("forever", DurationClass::TakesForever, NoOp);
        suite
    }

    fn child_names(suite: &Suite) -> Vec<&str> {
        let tree = suite.tree();
        tree.children(suite.root())
            .iter()
            .map(|id| tree.name(*id))
            .collect()
    }

    fn registry(suites: Vec<Suite>) -> Registry {
        let mut registry = Registry::new();
        for suite in suites {
            registry.register(suite);
        }
        registry
    }

    fn select_with_duration(max_duration: DurationClass) -> Vec<Suite> {
        let filter = SelectionFilter {
            max_duration,
            ..SelectionFilter::default()
        };
        select(registry(vec![suite_with_durations("s", Category::Unit)]), &filter)
    }

    #[test]
    fn test_quick_keeps_only_quick_children() {
        let selected = select_with_duration(DurationClass::Quick);

        assert_eq!(child_names(&selected[0]), vec!["quick"]);
    }

    #[test]
    fn test_extensive_keeps_quick_and_extensive() {
        let selected = select_with_duration(DurationClass::Extensive);

        assert_eq!(child_names(&selected[0]), vec!["quick", "extensive"]);
    }

    #[test]
    fn test_takes_forever_keeps_everything() {
        let selected = select_with_duration(DurationClass::TakesForever);

        assert_eq!(child_names(&selected[0]), vec!["quick", "extensive", "forever"]);
    }

    #[test]
    fn test_name_and_category_are_conjunctive() {
        let filter = SelectionFilter {
            name: "B".to_owned(),
            category: Category::Unit,
            ..SelectionFilter::default()
        };
        let selected = select(
            registry(vec![
                Suite::new("A", Category::Unit),
                Suite::new("B", Category::System),
            ]),
            &filter,
        );

        assert!(selected.is_empty());
    }

    #[test]
    fn test_category_filter_keeps_registry_order() {
        let filter = SelectionFilter {
            category: Category::Unit,
            ..SelectionFilter::default()
        };
        let selected = select(
            registry(vec![
                Suite::new("c", Category::Unit),
                Suite::new("b", Category::System),
                Suite::new("a", Category::Unit),
            ]),
            &filter,
        );

        let names: Vec<&str> = selected.iter().map(Suite::name).collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn test_name_filter_is_exact() {
        let filter = SelectionFilter {
            name: "sample".to_owned(),
            ..SelectionFilter::default()
        };
        let selected = select(
            registry(vec![
                Suite::new("sample", Category::Unit),
                Suite::new("sample-extra", Category::Unit),
            ]),
            &filter,
        );

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "sample");
    }
}
