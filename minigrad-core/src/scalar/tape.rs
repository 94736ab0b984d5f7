use crate::autograd::{Context, NodeId, NodeIdGenerator};
use crate::error::MinigradError;
use crate::scalar::functions::ScalarFunction;
use crate::scalar::Scalar;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
enum NodeKind {
    Constant,
    Leaf {
        derivative: Option<f64>,
    },
    Derived {
        function: Box<dyn ScalarFunction>,
        ctx: Context<f64>,
        inputs: Vec<NodeId>,
    },
}

#[derive(Debug)]
struct NodeRecord {
    value: f64,
    kind: NodeKind,
}

#[derive(Debug)]
struct TapeData {
    nodes: Vec<NodeRecord>,
    ids: NodeIdGenerator,
    grad_enabled: bool,
}

/// Arena holding the nodes of a scalar computation graph.
///
/// Nodes are addressed by the [`NodeId`] minted by the tape's own
/// [`NodeIdGenerator`]; derived nodes store their operands as ids, never as
/// owning pointers. A `Tape` is a shared handle: clones refer to the same
/// arena. Nothing is removed from the arena until the last handle is dropped.
///
/// Every `NodeId` held by a [`Scalar`] was minted by its own tape, so lookups
/// by id index the arena directly.
#[derive(Debug, Clone)]
pub struct Tape {
    data: Rc<RefCell<TapeData>>,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates an empty tape with gradient tracking enabled.
    pub fn new() -> Self {
        Tape {
            data: Rc::new(RefCell::new(TapeData {
                nodes: Vec::new(),
                ids: NodeIdGenerator::new(),
                grad_enabled: true,
            })),
        }
    }

    /// Creates a leaf: an input whose derivative is accumulated by backward passes.
    pub fn leaf(&self, value: f64) -> Scalar {
        let id = self.push(value, NodeKind::Leaf { derivative: None });
        Scalar::from_parts(self.clone(), id)
    }

    /// Creates a constant: a value excluded from all derivative bookkeeping.
    pub fn constant(&self, value: f64) -> Scalar {
        let id = self.push(value, NodeKind::Constant);
        Scalar::from_parts(self.clone(), id)
    }

    /// Enables or disables gradient tracking for operations recorded from now on.
    ///
    /// While disabled, every operation result is a constant and its context is
    /// created under no-grad.
    pub fn set_grad_enabled(&self, enabled: bool) {
        self.data.borrow_mut().grad_enabled = enabled;
    }

    pub fn is_grad_enabled(&self) -> bool {
        self.data.borrow().grad_enabled
    }

    /// Number of nodes recorded on the tape.
    pub fn len(&self) -> usize {
        self.data.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if both handles refer to the same arena.
    pub fn same_tape(&self, other: &Tape) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Runs `function` forward on `inputs` and records the result.
    pub(crate) fn apply(
        &self,
        function: Box<dyn ScalarFunction>,
        inputs: &[&Scalar],
    ) -> Result<Scalar, MinigradError> {
        if inputs.len() != function.arity() {
            return Err(MinigradError::ArityMismatch {
                function: function.name().to_string(),
                expected: function.arity(),
                actual: inputs.len(),
            });
        }
        if inputs.iter().any(|input| !self.same_tape(input.tape())) {
            return Err(MinigradError::TapeMismatch {
                operation: function.name().to_string(),
            });
        }

        let (values, needs_grad) = {
            let data = self.data.borrow();
            let values: Vec<f64> = inputs
                .iter()
                .map(|input| data.nodes[input.id().index()].value)
                .collect();
            let any_tracked = inputs
                .iter()
                .any(|input| !matches!(data.nodes[input.id().index()].kind, NodeKind::Constant));
            (values, data.grad_enabled && any_tracked)
        };

        let mut ctx = Context::with_no_grad(!needs_grad);
        let value = function.forward(&mut ctx, &values);

        let kind = if needs_grad {
            NodeKind::Derived {
                function,
                ctx,
                inputs: inputs.iter().map(|input| input.id()).collect(),
            }
        } else {
            NodeKind::Constant
        };
        let id = self.push(value, kind);
        Ok(Scalar::from_parts(self.clone(), id))
    }

    fn push(&self, value: f64, kind: NodeKind) -> NodeId {
        let mut data = self.data.borrow_mut();
        let id = data.ids.mint();
        debug_assert_eq!(id.index(), data.nodes.len());
        data.nodes.push(NodeRecord { value, kind });
        id
    }

    pub(crate) fn value(&self, id: NodeId) -> f64 {
        self.data.borrow().nodes[id.index()].value
    }

    pub(crate) fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.data.borrow().nodes[id.index()].kind, NodeKind::Leaf { .. })
    }

    pub(crate) fn is_constant(&self, id: NodeId) -> bool {
        matches!(self.data.borrow().nodes[id.index()].kind, NodeKind::Constant)
    }

    pub(crate) fn inputs(&self, id: NodeId) -> Vec<NodeId> {
        match &self.data.borrow().nodes[id.index()].kind {
            NodeKind::Derived { inputs, .. } => inputs.clone(),
            NodeKind::Leaf { .. } | NodeKind::Constant => Vec::new(),
        }
    }

    pub(crate) fn derivative(&self, id: NodeId) -> Option<f64> {
        match self.data.borrow().nodes[id.index()].kind {
            NodeKind::Leaf { derivative } => derivative,
            _ => None,
        }
    }

    pub(crate) fn accumulate_derivative(&self, id: NodeId, d: f64) -> Result<(), MinigradError> {
        match &mut self.data.borrow_mut().nodes[id.index()].kind {
            NodeKind::Leaf { derivative } => {
                *derivative = Some(derivative.unwrap_or(0.0) + d);
                Ok(())
            }
            _ => Err(MinigradError::NotALeaf { node: id }),
        }
    }

    pub(crate) fn zero_grad(&self, id: NodeId) {
        if let NodeKind::Leaf { derivative } = &mut self.data.borrow_mut().nodes[id.index()].kind {
            *derivative = None;
        }
    }

    /// Routes `d_output` through the function that produced `id`.
    ///
    /// Constant operands are left out of the result. Leaves and constants
    /// have no operands and yield nothing.
    pub(crate) fn chain_rule(&self, id: NodeId, d_output: f64) -> Result<Vec<(NodeId, f64)>, MinigradError> {
        let data = self.data.borrow();
        let (function, ctx, inputs) = match &data.nodes[id.index()].kind {
            NodeKind::Derived { function, ctx, inputs } => (function, ctx, inputs),
            NodeKind::Leaf { .. } | NodeKind::Constant => return Ok(Vec::new()),
        };

        let local = function.backward(ctx, d_output)?;
        if local.len() != inputs.len() {
            return Err(MinigradError::ArityMismatch {
                function: function.name().to_string(),
                expected: inputs.len(),
                actual: local.len(),
            });
        }

        Ok(inputs
            .iter()
            .zip(local)
            .filter(|(input, _)| !matches!(data.nodes[input.index()].kind, NodeKind::Constant))
            .map(|(input, d)| (*input, d))
            .collect())
    }
}

#[cfg(test)]
#[path = "tape_test.rs"]
mod tests;
