use std::collections::HashMap;

/// Process-wide simulation state the runner resets around every node.
///
/// Only one node runs at a time, so implementations need no locking.
pub trait Environment {
    /// Restores the ambient configuration to its defaults.
    fn reset_config(&mut self);
    /// Rewinds the random substream index so siblings draw reproducible
    /// streams.
    fn reset_next_stream_index(&mut self);
    /// Hands out the next substream index.
    fn allocate_stream_index(&mut self) -> u64;
}

/// Default [`Environment`]: attribute overrides on top of fixed defaults and
/// a monotonically increasing substream counter.
#[derive(Debug, Default)]
pub struct SimulationEnvironment {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
    next_stream_index: u64,
}

impl SimulationEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            defaults: defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.overrides.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.overrides
            .get(key)
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
    }
}

impl Environment for SimulationEnvironment {
    fn reset_config(&mut self) {
        if !self.overrides.is_empty() {
            trace!("Dropping {} configuration overrides", self.overrides.len());
        }
        self.overrides.clear();
    }

    fn reset_next_stream_index(&mut self) {
        self.next_stream_index = 0;
    }

    fn allocate_stream_index(&mut self) -> u64 {
        let index = self.next_stream_index;
        self.next_stream_index += 1;
        index
    }
}
