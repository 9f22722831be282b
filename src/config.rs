/// Default maximum of expression-tree nodes per phase of one evaluation.
pub const DEFAULT_MAX_NODES: usize = 200;
/// Default number of decimal digits non-integral results are rounded to.
pub const DEFAULT_PRECISION: u32 = 12;
/// Default bound of the absolute value of a base in a power operation.
pub const DEFAULT_MAX_BASE: f64 = 1e6;
/// Default bound of the absolute value of an exponent in a power operation.
pub const DEFAULT_MAX_EXPONENT: f64 = 10.0;

/// Construction-time settings of an [`Evaluator`](crate::Evaluator).
///
/// ```rust
/// use safecalc::EvalConfig;
/// let config = EvalConfig::default().with_max_nodes(50).with_precision(6);
/// assert_eq!(config.max_nodes, 50);
/// assert_eq!(config.precision, 6);
/// assert_eq!(config.max_exponent, 10.0);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EvalConfig {
    /// Parsing and evaluation abort as soon as more nodes than this have been visited.
    pub max_nodes: usize,
    /// Non-integral results are rounded to this many decimal digits.
    pub precision: u32,
    /// Powers with a base of larger magnitude are rejected.
    pub max_base: f64,
    /// Powers with an exponent of larger magnitude are rejected.
    pub max_exponent: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_nodes: DEFAULT_MAX_NODES,
            precision: DEFAULT_PRECISION,
            max_base: DEFAULT_MAX_BASE,
            max_exponent: DEFAULT_MAX_EXPONENT,
        }
    }
}

impl EvalConfig {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
    pub fn with_power_limits(mut self, max_base: f64, max_exponent: f64) -> Self {
        self.max_base = max_base;
        self.max_exponent = max_exponent;
        self
    }
}
