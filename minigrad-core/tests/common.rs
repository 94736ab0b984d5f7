use minigrad_core::{MinigradError, NodeId, NodeIdGenerator, Variable};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum MockKind {
    Leaf,
    Constant,
    Op,
    /// Routes its derivative to a node outside its parents.
    Rogue(NodeId),
    /// Emits no contributions at all.
    Silent,
}

#[derive(Debug)]
struct MockRecord {
    kind: MockKind,
    parents: Vec<(NodeId, f64)>,
    received: Vec<f64>,
}

#[derive(Debug, Default)]
struct MockArena {
    ids: NodeIdGenerator,
    records: Vec<MockRecord>,
}

/// Hand-built graph whose edges carry fixed local derivatives.
///
/// `chain_rule` of an op node returns `(parent, d_output * weight)` for every
/// edge, constants included, so the engine's own filtering is exercised.
#[derive(Debug, Clone, Default)]
pub struct MockGraph {
    arena: Rc<RefCell<MockArena>>,
}

#[derive(Debug, Clone)]
pub struct MockNode {
    graph: MockGraph,
    id: NodeId,
}

#[allow(dead_code)]
impl MockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: MockKind, parents: Vec<(NodeId, f64)>) -> MockNode {
        let mut arena = self.arena.borrow_mut();
        let id = arena.ids.mint();
        arena.records.push(MockRecord {
            kind,
            parents,
            received: Vec::new(),
        });
        MockNode {
            graph: self.clone(),
            id,
        }
    }

    pub fn leaf(&self) -> MockNode {
        self.push(MockKind::Leaf, Vec::new())
    }

    pub fn constant(&self) -> MockNode {
        self.push(MockKind::Constant, Vec::new())
    }

    /// Derived node with `(parent, local derivative)` edges.
    pub fn op(&self, parents: &[(&MockNode, f64)]) -> MockNode {
        let edges = parents.iter().map(|(p, w)| (p.id, *w)).collect();
        self.push(MockKind::Op, edges)
    }

    pub fn rogue(&self, parent: &MockNode, stranger: &MockNode) -> MockNode {
        self.push(MockKind::Rogue(stranger.id), vec![(parent.id, 1.0)])
    }

    pub fn silent(&self, parents: &[&MockNode]) -> MockNode {
        let edges = parents.iter().map(|p| (p.id, 1.0)).collect();
        self.push(MockKind::Silent, edges)
    }

    /// Adds an edge after construction; the only way to build a cycle.
    pub fn link(&self, child: &MockNode, parent: &MockNode, weight: f64) {
        self.arena.borrow_mut().records[child.id.index()]
            .parents
            .push((parent.id, weight));
    }

    fn node(&self, id: NodeId) -> MockNode {
        MockNode {
            graph: self.clone(),
            id,
        }
    }
}

#[allow(dead_code)]
impl MockNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Every derivative deposited through `accumulate_derivative`.
    pub fn received(&self) -> Vec<f64> {
        self.graph.arena.borrow().records[self.id.index()].received.clone()
    }

    fn kind(&self) -> MockKind {
        self.graph.arena.borrow().records[self.id.index()].kind.clone()
    }

    fn edges(&self) -> Vec<(NodeId, f64)> {
        self.graph.arena.borrow().records[self.id.index()].parents.clone()
    }
}

impl Variable for MockNode {
    type Derivative = f64;

    fn unique_id(&self) -> NodeId {
        self.id
    }

    fn is_leaf(&self) -> bool {
        self.kind() == MockKind::Leaf
    }

    fn is_constant(&self) -> bool {
        self.kind() == MockKind::Constant
    }

    fn parents(&self) -> Vec<Self> {
        self.edges().into_iter().map(|(id, _)| self.graph.node(id)).collect()
    }

    fn accumulate_derivative(&self, derivative: f64) -> Result<(), MinigradError> {
        if !self.is_leaf() {
            return Err(MinigradError::NotALeaf { node: self.id });
        }
        self.graph.arena.borrow_mut().records[self.id.index()]
            .received
            .push(derivative);
        Ok(())
    }

    fn chain_rule(&self, d_output: &f64) -> Result<Vec<(Self, f64)>, MinigradError> {
        Ok(match self.kind() {
            MockKind::Leaf | MockKind::Constant | MockKind::Silent => Vec::new(),
            MockKind::Op => self
                .edges()
                .into_iter()
                .map(|(id, w)| (self.graph.node(id), d_output * w))
                .collect(),
            MockKind::Rogue(stranger) => vec![(self.graph.node(stranger), *d_output)],
        })
    }
}

/// Position of `id` in a topological order.
#[allow(dead_code)]
pub fn position(order: &[MockNode], id: NodeId) -> usize {
    order
        .iter()
        .position(|n| n.id() == id)
        .unwrap_or_else(|| panic!("node {} missing from order", id))
}

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
