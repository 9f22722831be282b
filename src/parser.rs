use crate::budget::NodeBudget;
use crate::expression::Node;
use crate::operators::{BinOp, UnaryOp};
use crate::{exerr, format_exerr, ExResult};
use lazy_static::lazy_static;
use num::Float;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// Tokens of typical calculator inputs fit on the stack.
pub const N_TOKENS_ON_STACK: usize = 64;

pub type TokenVec<T> = SmallVec<[ParsedToken<T>; N_TOKENS_ON_STACK]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParsedToken<T> {
    Num(T),
    Paren(Paren),
    Op(BinOp),
}

impl<T: Debug> Display for ParsedToken<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParsedToken::Num(x) => write!(f, "{:?}", x),
            ParsedToken::Paren(Paren::Open) => write!(f, "("),
            ParsedToken::Paren(Paren::Close) => write!(f, ")"),
            ParsedToken::Op(op) => write!(f, "{}", op),
        }
    }
}

lazy_static! {
    static ref RE_NUMBER: Regex =
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
    static ref RE_NAME: Regex = Regex::new(r"^[a-zA-Z_]+[a-zA-Z_0-9]*").unwrap();
    // We sort operators inverse alphabetically such that ** has higher priority than * and
    // // than /.
    static ref OPS_BY_REPR: SmallVec<[BinOp; 8]> = {
        let mut ops = BinOp::ALL.iter().copied().collect::<SmallVec<[BinOp; 8]>>();
        ops.sort_unstable_by(|o1, o2| o2.repr().cmp(o1.repr()));
        ops
    };
}

/// Returns the numeric literal at the beginning of `text` if there is one. Besides
/// decimal digits with at most one dot we accept an exponent such as in `1.5e-3`.
pub fn is_numeric_text(text: &str) -> Option<&str> {
    RE_NUMBER.find(text).map(|m| m.as_str())
}

fn find_op(text_rest: &str) -> Option<BinOp> {
    OPS_BY_REPR
        .iter()
        .find(|op| text_rest.starts_with(op.repr()))
        .copied()
}

/// Upper bound of the number of tokens of an expression that fits into a budget of
/// `max_nodes`. Numbers, operators, and opening parentheses are charged by the parser,
/// closing parentheses match opening ones.
pub fn max_tokens(max_nodes: usize) -> usize {
    max_nodes.saturating_mul(2).saturating_add(1)
}

fn is_line_break(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

fn check_leading_zeros(num_str: &str) -> ExResult<()> {
    let is_integer = !num_str.contains(|c| matches!(c, '.' | 'e' | 'E'));
    if is_integer && num_str.starts_with('0') && num_str.bytes().any(|b| b != b'0') {
        exerr!(
            Syntax,
            "leading zeros in decimal integer literals are not permitted, {}",
            num_str
        )
    } else {
        Ok(())
    }
}

/// Splits the text into numbers, parentheses, and operators. Tokenization stops as soon
/// as there are more tokens than an expression within the budget of `max_nodes` can
/// have, such that the work does not depend on the length of oversized inputs.
///
/// # Errors
///
/// * [`ExpressionTooLarge`](crate::ErrorKind::ExpressionTooLarge) if there are more than
///   [`max_tokens`] tokens,
/// * [`Syntax`](crate::ErrorKind::Syntax) otherwise. Names are rejected unconditionally,
///   with a dedicated message if they are followed by an opening parenthesis, i.e., if
///   they look like a function call. Line breaks are only allowed within parentheses or
///   around the expression.
///
pub fn tokenize<T>(text: &str, max_nodes: usize) -> ExResult<TokenVec<T>>
where
    T: Float + FromStr,
    <T as FromStr>::Err: Debug,
{
    let max_tokens = max_tokens(max_nodes);
    let mut res = TokenVec::new();
    let mut cur_offset = 0usize;
    let mut paren_depth = 0usize;
    while cur_offset < text.len() {
        let c = text.as_bytes()[cur_offset];
        // we only ever advance past ascii characters, hence cur_offset is a char boundary
        if !c.is_ascii() {
            return exerr!(Syntax, "only ascii characters are supported");
        }
        let text_rest = &text[cur_offset..];
        if is_line_break(c) && paren_depth == 0 && !res.is_empty() {
            if text_rest.trim().is_empty() {
                break;
            }
            return exerr!(Syntax, "line breaks are only allowed within parentheses");
        }
        if c.is_ascii_whitespace() {
            cur_offset += 1;
            continue;
        }
        if res.len() == max_tokens {
            tracing::debug!(max_tokens, "token bound exceeded");
            return exerr!(ExpressionTooLarge, "Expression too large.");
        }
        let next_parsed_token = if c == b'(' {
            cur_offset += 1;
            paren_depth += 1;
            ParsedToken::Paren(Paren::Open)
        } else if c == b')' {
            cur_offset += 1;
            paren_depth = paren_depth.saturating_sub(1);
            ParsedToken::Paren(Paren::Close)
        } else if let Some(num_str) = is_numeric_text(text_rest) {
            cur_offset += num_str.len();
            check_leading_zeros(num_str)?;
            let num = num_str
                .parse::<T>()
                .map_err(|e| format_exerr!(Syntax, "could not parse {}, {:?}", num_str, e))?;
            ParsedToken::Num(num)
        } else if let Some(op) = find_op(text_rest) {
            cur_offset += op.repr().len();
            ParsedToken::Op(op)
        } else if let Some(name) = RE_NAME.find(text_rest) {
            let after_name = text_rest[name.end()..].trim_start();
            tracing::debug!(name = name.as_str(), "rejecting name");
            return if after_name.starts_with('(') {
                exerr!(Syntax, "Function calls are not allowed.")
            } else {
                exerr!(Syntax, "Variables are not allowed.")
            };
        } else {
            let beginning = text_rest.chars().take(16).collect::<String>();
            return exerr!(Syntax, "how to parse the beginning of {}", beginning);
        };
        res.push(next_parsed_token);
    }
    Ok(res)
}

/// Recursive descent parser over the tokens. Each production that creates a node or
/// enters a parenthesized group charges the budget before it recurses, such that neither
/// the size of the tree nor the recursion depth can exceed the budget.
struct Parser<'a, T> {
    tokens: &'a [ParsedToken<T>],
    pos: usize,
    budget: NodeBudget,
}

impl<'a, T> Parser<'a, T>
where
    T: Float + Debug,
{
    fn peek(&self) -> Option<&ParsedToken<T>> {
        self.tokens.get(self.pos)
    }

    fn next_op_of(&self, ops: &[BinOp]) -> Option<BinOp> {
        match self.peek() {
            Some(ParsedToken::Op(op)) if ops.contains(op) => Some(*op),
            _ => None,
        }
    }

    /// `expr := term (('+' | '-') term)*`
    fn expr(&mut self) -> ExResult<Node<T>> {
        let mut left = self.term()?;
        while let Some(op) = self.next_op_of(&[BinOp::Add, BinOp::Sub]) {
            self.pos += 1;
            self.budget.visit()?;
            let right = self.term()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// `term := factor (('*' | '/' | '//' | '%') factor)*`
    fn term(&mut self) -> ExResult<Node<T>> {
        let mut left = self.factor()?;
        while let Some(op) =
            self.next_op_of(&[BinOp::Mul, BinOp::Div, BinOp::FloorDiv, BinOp::Mod])
        {
            self.pos += 1;
            self.budget.visit()?;
            let right = self.factor()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// `factor := ('+' | '-') factor | power`
    fn factor(&mut self) -> ExResult<Node<T>> {
        let unary = match self.next_op_of(&[BinOp::Add, BinOp::Sub]) {
            Some(BinOp::Add) => Some(UnaryOp::Plus),
            Some(_) => Some(UnaryOp::Minus),
            None => None,
        };
        match unary {
            Some(op) => {
                self.pos += 1;
                self.budget.visit()?;
                let operand = self.factor()?;
                Ok(Node::unary(op, operand))
            }
            None => self.power(),
        }
    }

    /// `power := atom ('**' factor)?`, right associative since the exponent is a factor
    fn power(&mut self) -> ExResult<Node<T>> {
        let base = self.atom()?;
        if self.next_op_of(&[BinOp::Pow]).is_some() {
            self.pos += 1;
            self.budget.visit()?;
            let exponent = self.factor()?;
            Ok(Node::binary(BinOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    /// `atom := NUMBER | '(' expr ')'`
    fn atom(&mut self) -> ExResult<Node<T>> {
        match self.peek().copied() {
            Some(ParsedToken::Num(x)) => {
                self.pos += 1;
                self.budget.visit()?;
                Ok(Node::Num(x))
            }
            Some(ParsedToken::Paren(Paren::Open)) => {
                self.pos += 1;
                self.budget.visit()?;
                let inner = self.expr()?;
                match self.peek() {
                    Some(ParsedToken::Paren(Paren::Close)) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(token) => exerr!(Syntax, "expected ) but found {}", token),
                    None => exerr!(Syntax, "parentheses mismatch"),
                }
            }
            Some(ParsedToken::Paren(Paren::Close)) => {
                if self.pos > 0 && self.tokens[self.pos - 1] == ParsedToken::Paren(Paren::Open)
                {
                    exerr!(Syntax, "an opening paren cannot be next to a closing paren")
                } else {
                    exerr!(Syntax, "an operator cannot be on the left of a closing paren")
                }
            }
            Some(ParsedToken::Op(op)) => {
                exerr!(Syntax, "operator {} is missing its left operand", op)
            }
            None if self.tokens.is_empty() => exerr!(Syntax, "cannot parse empty string"),
            None => exerr!(Syntax, "the last element cannot be an operator"),
        }
    }
}

/// Parses tokens into an expression tree.
///
/// # Errors
///
/// * [`Syntax`](crate::ErrorKind::Syntax) for token sequences outside the grammar,
/// * [`ExpressionTooLarge`](crate::ErrorKind::ExpressionTooLarge) if more than `max_nodes`
///   nodes and parenthesized groups are encountered.
///
pub fn parse_tokens<T>(tokens: &[ParsedToken<T>], max_nodes: usize) -> ExResult<Node<T>>
where
    T: Float + Debug,
{
    let mut parser = Parser {
        tokens,
        pos: 0,
        budget: NodeBudget::new(max_nodes),
    };
    let root = parser.expr()?;
    match parser.peek() {
        None => {
            tracing::trace!(visited = parser.budget.visited(), "parsed");
            Ok(root)
        }
        Some(ParsedToken::Paren(Paren::Close)) => exerr!(
            Syntax,
            "too many closing parentheses until token {}",
            parser.pos
        ),
        Some(token) => exerr!(
            Syntax,
            "a number/parenthesis cannot be next to an operand, found {}",
            token
        ),
    }
}

/// Tokenizes and parses already normalized text.
pub fn parse<T>(text: &str, max_nodes: usize) -> ExResult<Node<T>>
where
    T: Float + FromStr + Debug,
    <T as FromStr>::Err: Debug,
{
    let tokens = tokenize::<T>(text, max_nodes)?;
    parse_tokens(&tokens, max_nodes)
}
