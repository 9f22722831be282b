use crate::budget::NodeBudget;
use crate::expression::Node;
use crate::operators::PowerGuard;
use crate::{format_exerr, normalize, parser, EvalConfig, ExResult, Outcome};

/// Rounds non-integral finite values to `precision` decimal digits. Integral values,
/// infinities, and NaN are returned unchanged.
///
/// Rounding goes through the exactly rounded decimal formatting of the standard library
/// such that large values do not overflow as they would when scaling by `10^precision`.
///
/// ```rust
/// use safecalc::round_result;
/// assert_eq!(round_result(0.1 + 0.2, 12).unwrap(), 0.3);
/// assert_eq!(round_result(2.0, 12).unwrap(), 2.0);
/// ```
pub fn round_result(x: f64, precision: u32) -> ExResult<f64> {
    if !x.is_finite() || x.fract() == 0.0 {
        return Ok(x);
    }
    let formatted = format!("{:.*}", precision as usize, x);
    formatted
        .parse::<f64>()
        .map_err(|e| format_exerr!(Evaluation, "could not round {}, {:?}", x, e))
}

/// Evaluator of restricted arithmetic expressions. It only holds its immutable
/// configuration, all mutable state of an evaluation is created per call. Hence, one
/// evaluator can be shared between threads.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use safecalc::{EvalConfig, Evaluator, ErrorKind};
/// let evaluator = Evaluator::new(EvalConfig::default().with_max_nodes(5));
/// assert_eq!(evaluator.evaluate("2^10")?, 1024.0);
/// let err = evaluator.evaluate("1+2+3+4").unwrap_err();
/// assert_eq!(err.kind, ErrorKind::ExpressionTooLarge);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Normalizes and parses the text into an expression tree without evaluating it.
    ///
    /// # Errors
    ///
    /// * [`Syntax`](crate::ErrorKind::Syntax) if the text is not a restricted arithmetic
    ///   expression,
    /// * [`ExpressionTooLarge`](crate::ErrorKind::ExpressionTooLarge) if the parser
    ///   encounters too many nodes.
    ///
    pub fn parse(&self, text: &str) -> ExResult<Node<f64>> {
        let normalized = normalize(text);
        parser::parse::<f64>(&normalized, self.config.max_nodes)
    }

    /// Evaluates an already parsed tree with a fresh budget and rounds the result.
    pub fn eval_tree(&self, tree: &Node<f64>) -> ExResult<f64> {
        let guard = PowerGuard::new(self.config.max_base, self.config.max_exponent)?;
        let mut budget = NodeBudget::new(self.config.max_nodes);
        let value = tree.eval(&mut budget, &guard)?;
        round_result(value, self.config.precision)
    }

    /// Normalizes, parses, and evaluates the text.
    ///
    /// # Errors
    ///
    /// Every failure is classified by an [`ErrorKind`](crate::ErrorKind), there are no
    /// partial results.
    ///
    pub fn evaluate(&self, text: &str) -> ExResult<f64> {
        let res = self.parse(text).and_then(|tree| self.eval_tree(&tree));
        match &res {
            Ok(value) => tracing::debug!(text, value, "evaluated"),
            Err(e) => tracing::debug!(text, kind = %e.kind, msg = e.msg.as_str(), "rejected"),
        }
        res
    }

    /// Like [`evaluate`](Evaluator::evaluate) but returns the tagged outcome meant for
    /// shells.
    pub fn outcome(&self, text: &str) -> Outcome {
        Outcome::from(self.evaluate(text))
    }
}

/// Evaluates a restricted arithmetic expression with the default configuration.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use safecalc::{evaluate, ErrorKind};
/// assert_eq!(evaluate("7 // 2")?, 3.0);
/// assert_eq!(evaluate("3×4÷2")?, 6.0);
/// assert_eq!(evaluate("x+1").unwrap_err().kind, ErrorKind::Syntax);
/// #
/// #     Ok(())
/// # }
/// ```
pub fn evaluate(text: &str) -> ExResult<f64> {
    Evaluator::default().evaluate(text)
}

/// Parses a restricted arithmetic expression with the default configuration.
pub fn parse(text: &str) -> ExResult<Node<f64>> {
    Evaluator::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(0.1 + 0.2, 12).unwrap(), 0.3);
        assert_eq!(round_result(1.0 / 3.0, 12).unwrap(), 0.333333333333);
        assert_eq!(round_result(2.0 / 3.0, 12).unwrap(), 0.666666666667);
        assert_eq!(round_result(-2.0 / 3.0, 12).unwrap(), -0.666666666667);
        assert_eq!(round_result(1.0 / 3.0, 2).unwrap(), 0.33);
        assert_eq!(round_result(1e300, 12).unwrap(), 1e300);
        assert_eq!(round_result(123456.5, 12).unwrap(), 123456.5);
        assert_eq!(round_result(-3.0, 12).unwrap(), -3.0);
        assert!(round_result(f64::NAN, 12).unwrap().is_nan());
        assert_eq!(round_result(f64::INFINITY, 12).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }

    #[test]
    fn test_parse_then_eval() {
        let evaluator = Evaluator::default();
        let tree = evaluator.parse("2^3 × 2").unwrap();
        assert_eq!(format!("{}", tree), "2**3*2");
        assert_eq!(evaluator.eval_tree(&tree).unwrap(), 16.0);
    }

    #[test]
    fn test_budget_per_phase() {
        // 5 nodes pass both phases with a budget of 5
        let evaluator = Evaluator::new(EvalConfig::default().with_max_nodes(5));
        assert_eq!(evaluator.evaluate("1+2*3").unwrap(), 7.0);
        let err = evaluator.evaluate("1+2*3-4").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpressionTooLarge);
        assert_eq!(err.msg, "Expression too large.");
    }

    #[test]
    fn test_custom_power_limits() {
        let evaluator = Evaluator::new(EvalConfig::default().with_power_limits(1e6, 100.0));
        assert_eq!(evaluator.evaluate("2**20").unwrap(), 1048576.0);
        assert_eq!(
            evaluator.evaluate("2**101").unwrap_err().kind,
            ErrorKind::ExponentTooLarge
        );
    }

    #[test]
    fn test_outcome() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.outcome("2+2"), Outcome::Value { value: 4.0 });
        assert_eq!(
            evaluator.outcome("1/0"),
            Outcome::Error {
                classification: ErrorKind::DivisionByZero,
                message: "Division by zero".to_string()
            }
        );
    }
}
