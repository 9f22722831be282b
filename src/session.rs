//! State of an interactive calculator shell, decoupled from any user interface. Each user
//! action is a transition `(Session, Action) -> Session`.
//!
//! ```rust
//! use safecalc::session::{Action, Session};
//! let session = Session::default()
//!     .apply(Action::Append("7".to_string()))
//!     .apply(Action::Append("//".to_string()))
//!     .apply(Action::Append("2".to_string()))
//!     .apply(Action::Evaluate);
//! assert_eq!(session.expr(), "3");
//! assert_eq!(session.history().next().unwrap().to_string(), "7//2 = 3");
//! ```
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

use crate::{Evaluator, ExResult};

/// Number of evaluations the history keeps.
pub const HISTORY_LEN: usize = 15;

/// Expression of a fresh or cleared session.
pub const INITIAL_EXPR: &str = "0";

/// Tokens that are appended to the initial expression instead of replacing it.
const APPENDED_TO_INITIAL: [&str; 4] = [".", ")", "**", "%"];

/// Main keypad, row by row.
pub const KEYPAD: [[&str; 5]; 4] = [
    ["7", "8", "9", "/", "AC"],
    ["4", "5", "6", "*", "⌫"],
    ["1", "2", "3", "-", "("],
    ["0", ".", "=", "+", ")"],
];

/// Additional operator keys as pairs of label and the token they append.
pub const EXTRA_KEYS: [(&str, &str); 5] = [
    ("xʸ", "**"),
    ("%", "%"),
    ("÷", "÷"),
    ("×", "×"),
    ("//", "//"),
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Appends a token such as a digit or an operator to the expression.
    Append(String),
    /// Removes the last character.
    Backspace,
    /// Resets the expression.
    Clear,
    /// Replaces the expression, e.g., after typing into an input box.
    SetExpr(String),
    /// Evaluates the expression and records the result in the history.
    Evaluate,
}

impl Action {
    /// Maps the label of a key of [`KEYPAD`] or [`EXTRA_KEYS`] to its action.
    pub fn from_key(label: &str) -> Option<Action> {
        match label {
            "AC" => Some(Action::Clear),
            "⌫" => Some(Action::Backspace),
            "=" => Some(Action::Evaluate),
            _ => {
                if let Some((_, token)) = EXTRA_KEYS.iter().find(|(l, _)| *l == label) {
                    Some(Action::Append(token.to_string()))
                } else if KEYPAD.iter().flatten().any(|l| *l == label) {
                    Some(Action::Append(label.to_string()))
                } else {
                    None
                }
            }
        }
    }
}

/// Renders an evaluated value for display and re-entry, integral values without
/// fractional part.
///
/// ```rust
/// use safecalc::session::format_value;
/// assert_eq!(format_value(4.0), "4");
/// assert_eq!(format_value(3.5), "3.5");
/// ```
pub fn format_value(x: f64) -> String {
    format!("{}", x)
}

fn render(res: &ExResult<f64>) -> String {
    match res {
        Ok(x) => format_value(*x),
        Err(e) => format!("Error: {}", e),
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    pub expr: String,
    pub rendered: String,
}

impl Display for HistoryEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.expr, self.rendered)
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    expr: String,
    history: VecDeque<HistoryEntry>,
    evaluator: Evaluator,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Evaluator::default())
    }
}

impl Session {
    pub fn new(evaluator: Evaluator) -> Self {
        Session {
            expr: INITIAL_EXPR.to_string(),
            history: VecDeque::with_capacity(HISTORY_LEN),
            evaluator,
        }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// History entries, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::Append(token) => {
                if self.expr == INITIAL_EXPR && !APPENDED_TO_INITIAL.contains(&token.as_str()) {
                    self.expr = token;
                } else {
                    self.expr.push_str(&token);
                }
            }
            Action::Backspace => {
                self.expr.pop();
                if self.expr.is_empty() {
                    self.expr = INITIAL_EXPR.to_string();
                }
            }
            Action::Clear => self.expr = INITIAL_EXPR.to_string(),
            Action::SetExpr(text) => self.expr = text,
            Action::Evaluate => {
                let expr = self.expr.trim().to_string();
                let res = self.evaluator.evaluate(&expr);
                let rendered = render(&res);
                tracing::trace!(expr = expr.as_str(), rendered = rendered.as_str(), "history");
                if res.is_ok() {
                    self.expr = rendered.clone();
                }
                self.history.push_front(HistoryEntry { expr, rendered });
                self.history.truncate(HISTORY_LEN);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(session: Session, labels: &[&str]) -> Session {
        labels.iter().fold(session, |s, label| {
            s.apply(Action::from_key(label).unwrap())
        })
    }

    #[test]
    fn test_append() {
        let s = Session::default();
        assert_eq!(s.expr(), "0");
        let s = press(s, &["7"]);
        assert_eq!(s.expr(), "7");
        let s = press(Session::default(), &["."]);
        assert_eq!(s.expr(), "0.");
        let s = press(Session::default(), &["xʸ"]);
        assert_eq!(s.expr(), "0**");
        let s = press(Session::default(), &["("]);
        assert_eq!(s.expr(), "(");
        let s = press(Session::default(), &["4", "×", "2", "÷", "8"]);
        assert_eq!(s.expr(), "4×2÷8");
    }

    #[test]
    fn test_backspace_clear() {
        let s = press(Session::default(), &["1", "2", "⌫"]);
        assert_eq!(s.expr(), "1");
        let s = press(s, &["⌫"]);
        assert_eq!(s.expr(), "0");
        let s = press(s, &["⌫"]);
        assert_eq!(s.expr(), "0");
        let s = press(s, &["9", "AC"]);
        assert_eq!(s.expr(), "0");
        let s = s.apply(Action::SetExpr("2×…".to_string())).apply(Action::Backspace);
        assert_eq!(s.expr(), "2×");
    }

    #[test]
    fn test_evaluate() {
        let s = press(Session::default(), &["7", "/", "2", "="]);
        assert_eq!(s.expr(), "3.5");
        let s = press(s, &["*", "2", "="]);
        assert_eq!(s.expr(), "7");
        let entries = s.history().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(entries, vec!["3.5*2 = 7", "7/2 = 3.5"]);
    }

    #[test]
    fn test_evaluate_error_keeps_expr() {
        let s = Session::default()
            .apply(Action::SetExpr(" 1/0 ".to_string()))
            .apply(Action::Evaluate);
        assert_eq!(s.expr(), " 1/0 ");
        assert_eq!(
            s.history().next().unwrap(),
            &HistoryEntry {
                expr: "1/0".to_string(),
                rendered: "Error: Division by zero".to_string()
            }
        );
        let s = s.apply(Action::SetExpr("x+1".to_string())).apply(Action::Evaluate);
        assert_eq!(s.expr(), "x+1");
        assert_eq!(
            s.history().next().unwrap().rendered,
            "Error: Variables are not allowed."
        );
    }

    #[test]
    fn test_history_len() {
        let s = (0..20).fold(Session::default(), |s, i| {
            s.apply(Action::SetExpr(format!("{}+1", i)))
                .apply(Action::Evaluate)
        });
        let history = s.history().collect::<Vec<_>>();
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(history[0].to_string(), "19+1 = 20");
        assert_eq!(history[HISTORY_LEN - 1].to_string(), "5+1 = 6");
    }

    #[test]
    fn test_keys() {
        for label in KEYPAD.iter().flatten() {
            assert!(Action::from_key(label).is_some(), "{}", label);
        }
        for (label, _) in EXTRA_KEYS {
            assert!(Action::from_key(label).is_some(), "{}", label);
        }
        assert_eq!(
            Action::from_key("//"),
            Some(Action::Append("//".to_string()))
        );
        assert_eq!(Action::from_key("sin"), None);
    }
}
