use crate::{exerr, ExResult};

/// Counts visited nodes of one phase of one evaluation. Every call creates its own budget,
/// there is no shared counter.
#[derive(Clone, Debug)]
pub struct NodeBudget {
    visited: usize,
    max_nodes: usize,
}

impl NodeBudget {
    pub fn new(max_nodes: usize) -> Self {
        NodeBudget {
            visited: 0,
            max_nodes,
        }
    }

    /// Registers the visit of one node.
    ///
    /// # Errors
    ///
    /// Fails the instant more than `max_nodes` nodes have been visited.
    pub fn visit(&mut self) -> ExResult<()> {
        self.visited += 1;
        if self.visited > self.max_nodes {
            tracing::debug!(max_nodes = self.max_nodes, "node budget exceeded");
            exerr!(ExpressionTooLarge, "Expression too large.")
        } else {
            Ok(())
        }
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn remaining(&self) -> usize {
        self.max_nodes.saturating_sub(self.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeBudget;
    use crate::ErrorKind;

    #[test]
    fn test_budget() {
        let mut budget = NodeBudget::new(3);
        for _ in 0..3 {
            budget.visit().unwrap();
        }
        assert_eq!(budget.visited(), 3);
        assert_eq!(budget.remaining(), 0);
        let err = budget.visit().unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpressionTooLarge);
        assert_eq!(err.msg, "Expression too large.");

        let mut budget = NodeBudget::new(0);
        assert!(budget.visit().is_err());
    }
}
