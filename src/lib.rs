#![doc(html_root_url = "https://docs.rs/safecalc/0.1.0")]
//! Safecalc evaluates arithmetic typed into a calculator, and nothing else. Input is
//! untrusted text, hence the evaluator is a closed interpreter of numeric literals,
//! parentheses, unary signs, and the binary operators `+`, `-`, `*`, `/`, `//`, `%`, and
//! `**`. Names and calls are rejected, the work per evaluation is bounded by a node
//! budget, and powers are guarded against huge bases and exponents.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use safecalc::{evaluate, ErrorKind};
//! assert_eq!(evaluate("2+2")?, 4.0);
//! assert_eq!(evaluate("2^10")?, 1024.0);
//! assert_eq!(evaluate("7%2")?, 1.0);
//! assert_eq!(evaluate("0.1+0.2")?, 0.3);
//! assert_eq!(evaluate("1/0").unwrap_err().kind, ErrorKind::DivisionByZero);
//! assert_eq!(evaluate("2**1000").unwrap_err().kind, ErrorKind::ExponentTooLarge);
//! assert_eq!(evaluate("print(1)").unwrap_err().kind, ErrorKind::Syntax);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! Before parsing, calculator glyphs are [normalized](normalize), i.e., `×`, `÷`, en and
//! em dashes, and `^` become `*`, `/`, `-`, and `**`. The operator precedence is the usual
//! one, in particular `**` is right associative and binds stronger than a unary sign on its
//! left, such that `-2**2 == -4` and `2**-1 == 0.5`. Non-integral results are rounded to
//! 12 decimal digits.
//!
//! The limits can be configured via [`EvalConfig`](EvalConfig).
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use safecalc::{EvalConfig, Evaluator};
//! let evaluator = Evaluator::new(EvalConfig::default().with_precision(3));
//! assert_eq!(evaluator.evaluate("2/3")?, 0.667);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! The module [`session`] contains the state transitions of a calculator front end with
//! an expression being edited and a history of results.
//!
//! ## Features
//!
//! With the feature `serde`, [`EvalConfig`], [`ErrorKind`], and [`Outcome`] can be
//! serialized and deserialized.

mod budget;
mod config;
mod evaluator;
mod expression;
mod normalize;
mod operators;
mod parser;
mod result;
pub mod session;

pub use {
    budget::NodeBudget,
    config::{
        EvalConfig, DEFAULT_MAX_BASE, DEFAULT_MAX_EXPONENT, DEFAULT_MAX_NODES, DEFAULT_PRECISION,
    },
    evaluator::{evaluate, parse, round_result, Evaluator},
    expression::Node,
    normalize::normalize,
    operators::{BinOp, PowerGuard, UnaryOp},
    parser::{is_numeric_text, max_tokens, tokenize, Paren, ParsedToken},
    result::{ErrorKind, ExError, ExResult, Outcome},
};
