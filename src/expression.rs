use std::fmt::{self, Debug, Display, Formatter};

use num::Float;

use crate::budget::NodeBudget;
use crate::operators::{BinOp, PowerGuard, UnaryOp};
use crate::ExResult;

// binding strength of a unary sign relative to binary operator priorities
const UNARY_PRIO: i32 = 2;
const ATOM_PRIO: i32 = 4;

/// Node of an expression tree. Each node owns its children, trees are created by the
/// parser once per evaluation and dropped afterwards.
#[derive(Clone, PartialEq, Debug)]
pub enum Node<T: Float> {
    Num(T),
    Unary {
        op: UnaryOp,
        operand: Box<Node<T>>,
    },
    Binary {
        op: BinOp,
        left: Box<Node<T>>,
        right: Box<Node<T>>,
    },
}

impl<T: Float> Node<T> {
    pub fn unary(op: UnaryOp, operand: Node<T>) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Node<T>, right: Node<T>) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of nodes of the tree including this one.
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Num(_) => 1,
            Node::Unary { operand, .. } => 1 + operand.n_nodes(),
            Node::Binary { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }

    /// Evaluates the tree bottom-up. Every node entered is charged to the `budget` before
    /// its children are evaluated.
    ///
    /// # Errors
    ///
    /// * the budget is exhausted,
    /// * an operator fails, see [`BinOp::apply`](crate::BinOp::apply).
    ///
    pub fn eval(&self, budget: &mut NodeBudget, guard: &PowerGuard<T>) -> ExResult<T>
    where
        T: Debug,
    {
        budget.visit()?;
        match self {
            Node::Num(x) => Ok(*x),
            Node::Unary { op, operand } => Ok(op.apply(operand.eval(budget, guard)?)),
            Node::Binary { op, left, right } => {
                let a = left.eval(budget, guard)?;
                let b = right.eval(budget, guard)?;
                op.apply(a, b, guard)
            }
        }
    }

    fn prio(&self) -> i32 {
        match self {
            Node::Num(x) if x.is_sign_negative() => UNARY_PRIO,
            Node::Num(_) => ATOM_PRIO,
            Node::Unary { .. } => UNARY_PRIO,
            Node::Binary { op, .. } => op.prio(),
        }
    }
}

fn write_child<T: Float + Display>(
    f: &mut Formatter,
    child: &Node<T>,
    needs_parens: bool,
) -> fmt::Result {
    if needs_parens {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Unparses the tree with as few parentheses as possible, e.g., `(1+2)*3` or `-2**2`.
impl<T: Float + Display> Display for Node<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::Num(x) => write!(f, "{}", x),
            Node::Unary { op, operand } => {
                write!(f, "{}", op)?;
                write_child(f, operand, operand.prio() < UNARY_PRIO)
            }
            Node::Binary { op, left, right } => {
                let prio = op.prio();
                if op.is_right_assoc() {
                    // the exponent may carry a sign without parentheses
                    write_child(f, left, left.prio() <= prio)?;
                    write!(f, "{}", op)?;
                    write_child(f, right, right.prio() < UNARY_PRIO)
                } else {
                    write_child(f, left, left.prio() < prio)?;
                    write!(f, "{}", op)?;
                    write_child(f, right, right.prio() <= prio)
                }
            }
        }
    }
}
