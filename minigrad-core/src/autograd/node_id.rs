use std::fmt;

/// Stable identity of a node in a computation graph.
///
/// Used as the key of the visited set during traversal and of the
/// derivative accumulator during backpropagation, so node types never need
/// structural equality or hashing by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id from a raw index.
    ///
    /// Prefer minting ids through a [`NodeIdGenerator`]; this exists for node
    /// types that manage their own numbering.
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator of strictly increasing [`NodeId`]s.
///
/// Owned by whatever constructs nodes (a [`Tape`](crate::scalar::Tape) owns
/// one). Ids are unique per generator.
#[derive(Debug, Default, Clone)]
pub struct NodeIdGenerator {
    next: usize,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh id.
    pub fn mint(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids minted so far.
    pub fn minted(&self) -> usize {
        self.next
    }
}
