//! Optional free-text node descriptions.

use nt_core::NodeId;
use rustc_hash::FxHashMap;

/// An explicitly owned `NodeId → label` map.
///
/// Labels may be set at any time before or during the run and are read at
/// serialization time when a node first appears in the output.  The map is
/// owned by whoever constructs the serializer, so test runs never share
/// state.
#[derive(Default)]
pub struct NodeLabels {
    map: FxHashMap<NodeId, String>,
}

impl NodeLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the label for `node`.
    pub fn set(&mut self, node: NodeId, label: impl Into<String>) {
        self.map.insert(node, label.into());
    }

    pub fn get(&self, node: NodeId) -> Option<&str> {
        self.map.get(&node).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
