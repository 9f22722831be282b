use crate::{exerr, format_exerr, ExResult};
use num::Float;
use std::fmt::{self, Debug, Display, Formatter};

/// Unary operators, i.e., the signs that can be put in front of an operand.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    /// Representation of the operator in the string to be parsed.
    pub fn repr(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }

    pub fn apply<T: Float>(&self, x: T) -> T {
        match self {
            UnaryOp::Plus => x,
            UnaryOp::Minus => -x,
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Binary operators. Adding an operator means extending this enum and the matches
/// below, there is no registration of operators at runtime.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    pub const ALL: [BinOp; 7] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::FloorDiv,
        BinOp::Mod,
        BinOp::Pow,
    ];

    /// Representation of the operator in the string to be parsed.
    pub fn repr(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
        }
    }

    /// Priority of the binary operation. A binary operation with a higher number binds
    /// stronger. Unary signs sit between multiplicative operators and the power, such
    /// that `-2**2 == -4`.
    pub fn prio(&self) -> i32 {
        match self {
            BinOp::Add | BinOp::Sub => 0,
            BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod => 1,
            BinOp::Pow => 3,
        }
    }

    pub fn is_right_assoc(&self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// Applies the operator to already evaluated operands.
    ///
    /// # Errors
    ///
    /// * division, floor division, and modulo by zero,
    /// * powers that violate the `guard`,
    /// * powers without real result such as `(-8)**0.5`.
    ///
    pub fn apply<T: Float + Debug>(&self, a: T, b: T, guard: &PowerGuard<T>) -> ExResult<T> {
        match self {
            BinOp::Add => Ok(a + b),
            BinOp::Sub => Ok(a - b),
            BinOp::Mul => Ok(a * b),
            BinOp::Div => {
                check_divisor(b)?;
                Ok(a / b)
            }
            BinOp::FloorDiv => {
                check_divisor(b)?;
                Ok(floor_div_mod(a, b).0)
            }
            BinOp::Mod => {
                check_divisor(b)?;
                Ok(floor_div_mod(a, b).1)
            }
            BinOp::Pow => pow(a, b, guard),
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Magnitude limits of a power operation converted to the float type of the expression.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PowerGuard<T> {
    pub max_base: T,
    pub max_exponent: T,
}

impl<T: Float> PowerGuard<T> {
    pub fn new(max_base: f64, max_exponent: f64) -> ExResult<Self> {
        let convert = |x: f64| {
            <T as num::NumCast>::from(x)
                .ok_or_else(|| format_exerr!(Evaluation, "cannot represent power limit {}", x))
        };
        Ok(PowerGuard {
            max_base: convert(max_base)?,
            max_exponent: convert(max_exponent)?,
        })
    }

    fn check(&self, base: T, exponent: T) -> ExResult<()> {
        if base.abs() > self.max_base || exponent.abs() > self.max_exponent {
            exerr!(ExponentTooLarge, "Exponent too large.")
        } else {
            Ok(())
        }
    }
}

fn check_divisor<T: Float>(b: T) -> ExResult<()> {
    if b == T::zero() {
        exerr!(DivisionByZero, "Division by zero")
    } else {
        Ok(())
    }
}

fn signed_zero<T: Float>(sign_of: T) -> T {
    if sign_of.is_sign_negative() {
        -T::zero()
    } else {
        T::zero()
    }
}

/// Floored division and modulo with the sign of the modulo following the divisor, i.e.,
/// `a == div * b + mod` up to rounding. The divisor must not be zero.
fn floor_div_mod<T: Float>(a: T, b: T) -> (T, T) {
    let mut modulo = a % b;
    let mut div = (a - modulo) / b;
    if modulo != T::zero() {
        if (b < T::zero()) != (modulo < T::zero()) {
            modulo = modulo + b;
            div = div - T::one();
        }
    } else {
        modulo = signed_zero(b);
    }
    let floor_div = if div != T::zero() {
        let floored = div.floor();
        // div is already integral up to rounding noise of the subtraction above
        let half = T::one() / (T::one() + T::one());
        if div - floored > half {
            floored + T::one()
        } else {
            floored
        }
    } else {
        signed_zero(a / b)
    };
    (floor_div, modulo)
}

fn pow<T: Float + Debug>(base: T, exponent: T, guard: &PowerGuard<T>) -> ExResult<T> {
    guard.check(base, exponent)?;
    if base == T::zero() && exponent < T::zero() {
        return exerr!(DivisionByZero, "Division by zero");
    }
    let res = base.powf(exponent);
    if res.is_nan() && !base.is_nan() && !exponent.is_nan() {
        exerr!(
            Evaluation,
            "power {:?}**{:?} has no real result",
            base,
            exponent
        )
    } else {
        Ok(res)
    }
}
