use crate::app::environment::Environment;
use crate::app::error::{Error, ExitCode, Result};
use crate::app::node::{NodeId, TestTree};
use crate::app::options::RunOptions;
use crate::app::result::FailureRecord;
use crate::system_path;
use std::path::PathBuf;

/// View of the run handed to a node's hooks while it executes.
pub struct CaseContext<'a> {
    tree: &'a mut TestTree,
    id: NodeId,
    options: &'a RunOptions,
    env: &'a mut dyn Environment,
}

impl<'a> CaseContext<'a> {
    pub(crate) fn new(
        tree: &'a mut TestTree,
        id: NodeId,
        options: &'a RunOptions,
        env: &'a mut dyn Environment,
    ) -> Self {
        Self {
            tree,
            id,
            options,
            env,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.tree.name(self.id)
    }

    pub fn tree(&self) -> &TestTree {
        &*self.tree
    }

    pub fn environment(&mut self) -> &mut dyn Environment {
        &mut *self.env
    }

    /// Records a failed check against the running node. In assert-on-failure
    /// mode the process aborts right after recording, for debuggers.
    pub fn report_failure(&mut self, record: FailureRecord) {
        self.tree.report_failure(self.id, record);
        if self.options.assert_on_failure {
            error!("Assertion failure in '{}', aborting", self.name());
            std::process::abort();
        }
    }

    pub fn is_failed(&self) -> bool {
        self.tree.is_failed(self.id)
    }

    pub fn is_status_success(&self) -> bool {
        self.tree.is_status_success(self.id)
    }

    pub fn must_assert_on_failure(&self) -> bool {
        self.options.assert_on_failure
    }

    pub fn must_continue_on_failure(&self) -> bool {
        self.options.continue_on_failure
    }

    pub fn must_update_data(&self) -> bool {
        self.options.update_data
    }

    fn data_root(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.options.data_dir {
            return Ok(dir.clone());
        }
        let exe_dir = system_path::find_self_directory().map_err(|source| Error::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })?;
        system_path::find_top_level_source_dir(&exe_dir).ok_or(Error::SourceDirNotFound(exe_dir))
    }

    /// `filename` inside the data directory declared by this node or its
    /// nearest ancestor.
    pub fn try_data_dir_filename(&self, filename: &str) -> Result<PathBuf> {
        let data_dir = self
            .tree
            .data_dir(self.id)
            .ok_or_else(|| Error::NoDataDir(self.name().to_owned()))?;
        let root = self.data_root()?;
        Ok(system_path::append(system_path::append(root, data_dir), filename))
    }

    /// Like [`try_data_dir_filename`](Self::try_data_dir_filename), but a
    /// missing data directory is a bug in the test itself and terminates the
    /// process.
    pub fn data_dir_filename(&self, filename: &str) -> PathBuf {
        match self.try_data_dir_filename(filename) {
            Ok(path) => path,
            Err(err) => {
                error!("{}", err);
                eprintln!("Error:  {}", err);
                std::process::exit(ExitCode::Failure.code());
            }
        }
    }

    /// Where the node may write `filename`. With update-data enabled this is
    /// the data directory, so reference files get regenerated in place.
    pub fn temp_dir_filename(&self, filename: &str) -> Result<PathBuf> {
        if self.options.update_data {
            return self.try_data_dir_filename(filename);
        }
        let fragments = self
            .tree
            .path_names(self.id)
            .into_iter()
            .map(system_path::create_valid_path_fragment);
        let dir = system_path::append(&self.options.temp_dir, system_path::join(fragments));
        system_path::make_directories(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(system_path::append(dir, filename))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::environment::SimulationEnvironment;
    use crate::app::hooks::NoOp;
    use crate::app::suite::DurationClass;

    fn tree() -> (TestTree, NodeId) {
        let mut tree = TestTree::new("suite", Box::new(NoOp));
        let root = tree.root();
        let group = tree.add_case(root, "group", DurationClass::Quick, NoOp);
        let leaf = tree.add_case(group, "case: a/b", DurationClass::Quick, NoOp);
        for id in &[root, group, leaf] {
            tree.begin_result(*id);
        }
        (tree, leaf)
    }

    #[test]
    fn test_report_failure_marks_parents() {
        let (mut tree, leaf) = tree();
        let options = RunOptions::default();
        let mut env = SimulationEnvironment::new();
        {
            let mut ctx = CaseContext::new(&mut tree, leaf, &options, &mut env);
            ctx.report_failure(FailureRecord::new("x", "1", "2", "", "f.rs", 1));
            assert!(ctx.is_failed());
            assert!(!ctx.is_status_success());
        }

        assert!(tree.is_failed(tree.root()));
        assert!(tree.is_status_success(tree.root()));
    }

    #[test]
    fn test_data_dir_filename_uses_nearest_declaration() {
        let (mut tree, leaf) = tree();
        let root = tree.root();
        tree.set_data_dir(root, "src/core/test");
        let options = RunOptions::builder()
            .data_dir(PathBuf::from("/checkout"))
            .build()
            .unwrap();
        let mut env = SimulationEnvironment::new();
        let ctx = CaseContext::new(&mut tree, leaf, &options, &mut env);

        assert_eq!(
            ctx.try_data_dir_filename("reference.pcap").unwrap(),
            PathBuf::from("/checkout/src/core/test/reference.pcap")
        );
    }

    #[test]
    fn test_data_dir_filename_without_declaration() {
        let (mut tree, leaf) = tree();
        let options = RunOptions::default();
        let mut env = SimulationEnvironment::new();
        let ctx = CaseContext::new(&mut tree, leaf, &options, &mut env);

        assert!(matches!(
            ctx.try_data_dir_filename("reference.pcap"),
            Err(Error::NoDataDir(_))
        ));
    }

    #[test]
    fn test_temp_dir_filename_mirrors_tree() {
        let temp = tempfile::tempdir().unwrap();
        let (mut tree, leaf) = tree();
        let options = RunOptions::builder()
            .temp_dir(temp.path().to_path_buf())
            .build()
            .unwrap();
        let mut env = SimulationEnvironment::new();
        let ctx = CaseContext::new(&mut tree, leaf, &options, &mut env);

        let path = ctx.temp_dir_filename("out.txt").unwrap();

        let dir = temp.path().join("suite").join("group").join("case__a_b");
        assert_eq!(path, dir.join("out.txt"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_temp_dir_filename_in_update_mode() {
        let (mut tree, leaf) = tree();
        tree.set_data_dir(leaf, "data");
        let options = RunOptions::builder()
            .update_data(true)
            .data_dir(PathBuf::from("/checkout"))
            .build()
            .unwrap();
        let mut env = SimulationEnvironment::new();
        let ctx = CaseContext::new(&mut tree, leaf, &options, &mut env);

        assert_eq!(
            ctx.temp_dir_filename("ref.txt").unwrap(),
            PathBuf::from("/checkout/data/ref.txt")
        );
    }
}
