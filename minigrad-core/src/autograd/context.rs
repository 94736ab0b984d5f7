/// Scratch record of one operation application.
///
/// Stores values computed during the forward pass so the backward pass can
/// reuse them without recomputation. Under `no_grad` nothing is retained,
/// which keeps inference-only evaluation free of memory overhead.
#[derive(Debug, Clone, PartialEq)]
pub struct Context<T> {
    no_grad: bool,
    saved_values: Vec<T>,
}

impl<T> Context<T> {
    /// Creates a context that retains saved values.
    pub fn new() -> Self {
        Self::with_no_grad(false)
    }

    /// Creates a context with an explicit no-grad flag and nothing saved.
    pub fn with_no_grad(no_grad: bool) -> Self {
        Context {
            no_grad,
            saved_values: Vec::new(),
        }
    }

    pub fn no_grad(&self) -> bool {
        self.no_grad
    }

    /// Stores `values` for the backward pass.
    ///
    /// Replaces whatever was saved before. Does nothing under no-grad.
    pub fn save_for_backward<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        if self.no_grad {
            return;
        }
        self.saved_values = values.into_iter().collect();
    }

    /// Read-only view of the saved values.
    pub fn saved_tensors(&self) -> &[T] {
        &self.saved_values
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
