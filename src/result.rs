use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Classification of everything that can go wrong while evaluating an expression.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The input does not conform to the restricted grammar. This includes identifiers,
    /// function calls, and unsupported operators or characters.
    Syntax,
    /// One of `/`, `//`, or `%` with a zero right-hand side, or zero raised to a negative
    /// power.
    DivisionByZero,
    /// Power with a base magnitude or exponent magnitude beyond the configured limits.
    ExponentTooLarge,
    /// The node-visit budget has been exceeded during parsing or evaluation.
    ExpressionTooLarge,
    /// Catch-all for any other failure, e.g., a power without a real result.
    Evaluation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::ExponentTooLarge => "ExponentTooLarge",
            ErrorKind::ExpressionTooLarge => "ExpressionTooLarge",
            ErrorKind::Evaluation => "EvaluationError",
        };
        write!(f, "{}", name)
    }
}

/// This will be thrown at you if something within Safecalc went wrong. Ok, obviously it is
/// not an exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    pub kind: ErrorKind,
    pub msg: String,
}
impl ExError {
    pub fn new(kind: ErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            msg: msg.to_string(),
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
}
impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl Error for ExError {}

/// Safecalc's result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given kind with a formatted message.
///
/// ```rust
/// use safecalc::{format_exerr, ErrorKind};
/// let err = format_exerr!(Syntax, "unexpected {}", ")");
/// assert_eq!(err.kind, ErrorKind::Syntax);
/// assert_eq!(err.msg, "unexpected )");
/// ```
#[macro_export]
macro_rules! format_exerr {
    ($kind:ident, $s:literal $(, $exps:expr )*) => {
        $crate::ExError::new($crate::ErrorKind::$kind, format!($s, $($exps,)*).as_str())
    }
}

/// Shortcut for `Err(format_exerr!(...))`.
#[macro_export]
macro_rules! exerr {
    ($kind:ident, $s:literal $(, $exps:expr )*) => {
        Err($crate::format_exerr!($kind, $s $(, $exps)*))
    }
}

/// Tagged outcome of one evaluation as handed to a shell, i.e., either a value or a
/// classified error with its message. With the feature `serde` this serializes as
/// `{"kind": "value", "value": 4.0}` or
/// `{"kind": "error", "classification": "DivisionByZero", "message": "Division by zero"}`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Outcome {
    Value {
        value: f64,
    },
    Error {
        classification: ErrorKind,
        message: String,
    },
}

impl Outcome {
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value { .. })
    }
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value { value } => Some(*value),
            Outcome::Error { .. } => None,
        }
    }
}

impl From<ExResult<f64>> for Outcome {
    fn from(res: ExResult<f64>) -> Self {
        match res {
            Ok(value) => Outcome::Value { value },
            Err(e) => Outcome::Error {
                classification: e.kind,
                message: e.msg,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros() {
        let res: ExResult<f64> = exerr!(DivisionByZero, "Division by zero");
        let err = res.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
        assert_eq!(format!("{}", err), "Division by zero");
        let err = format_exerr!(Syntax, "how to parse the beginning of {}", "$");
        assert_eq!(err.msg(), "how to parse the beginning of $");
        assert_eq!(format!("{}", err.kind), "SyntaxError");
    }

    #[test]
    fn test_outcome() {
        let outcome = Outcome::from(Ok(3.5));
        assert!(outcome.is_value());
        assert_eq!(outcome.value(), Some(3.5));
        let outcome = Outcome::from(exerr!(ExponentTooLarge, "Exponent too large."));
        assert_eq!(outcome.value(), None);
        assert_eq!(
            outcome,
            Outcome::Error {
                classification: ErrorKind::ExponentTooLarge,
                message: "Exponent too large.".to_string()
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_outcome_serde() {
        use serde_test::Token;
        serde_test::assert_tokens(
            &ErrorKind::ExpressionTooLarge,
            &[Token::UnitVariant {
                name: "ErrorKind",
                variant: "ExpressionTooLarge",
            }],
        );
        let serialized = serde_json::to_string(&Outcome::Value { value: 4.0 }).unwrap();
        assert_eq!(serialized, r#"{"kind":"value","value":4.0}"#);
        let outcome = Outcome::Error {
            classification: ErrorKind::DivisionByZero,
            message: "Division by zero".to_string(),
        };
        let serialized = serde_json::to_string(&outcome).unwrap();
        assert_eq!(
            serialized,
            r#"{"kind":"error","classification":"DivisionByZero","message":"Division by zero"}"#
        );
        let deserialized = serde_json::from_str::<Outcome>(&serialized).unwrap();
        assert_eq!(deserialized, outcome);
    }
}
