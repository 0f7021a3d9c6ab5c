mod batch;
mod display;
mod error;
mod evaluator;
mod parser;

pub use batch::*;
pub use display::NamedExpression;
pub use error::*;
pub use evaluator::Dual;
pub use parser::ExpressionParser as Parser;

use crate::functions::FunctionId;

/// A parsed formula. Trees are built once and never mutated; every node owns
/// its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(f64),
    /// Slot in the point vector handed to [`Expression::eval`]. Slots come
    /// from the variable-name table used at parse time.
    Variable(usize),
    Negation(Box<Expression>),
    BinaryOperation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    FunctionCall(FunctionCall),
    /// Stands in for any text that could not be parsed. Evaluates to NaN.
    Invalid,
}

impl Expression {
    pub fn binary(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn negation(inner: Expression) -> Self {
        Expression::Negation(Box::new(inner))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Expression::Invalid)
    }

    /// True when no variable occurs anywhere in the tree.
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Constant(_) | Expression::Invalid => true,
            Expression::Variable(_) => false,
            Expression::Negation(inner) => inner.is_constant(),
            Expression::BinaryOperation { left, right, .. } => {
                left.is_constant() && right.is_constant()
            }
            Expression::FunctionCall(call) => call.args.iter().all(Expression::is_constant),
        }
    }

    pub fn depends_on(&self, slot: usize) -> bool {
        match self {
            Expression::Constant(_) | Expression::Invalid => false,
            Expression::Variable(s) => *s == slot,
            Expression::Negation(inner) => inner.depends_on(slot),
            Expression::BinaryOperation { left, right, .. } => {
                left.depends_on(slot) || right.depends_on(slot)
            }
            Expression::FunctionCall(call) => call.args.iter().any(|arg| arg.depends_on(slot)),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Expression::Constant(_) | Expression::Variable(_) | Expression::Invalid => 1,
            Expression::Negation(inner) => 1 + inner.node_count(),
            Expression::BinaryOperation { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
            Expression::FunctionCall(call) => {
                1 + call.args.iter().map(Expression::node_count).sum::<usize>()
            }
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Expression::Invalid
    }
}

/// A builtin applied to its arguments. The argument count is checked against
/// the function's arity once, here, and trusted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    id: FunctionId,
    args: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(id: FunctionId, args: Vec<Expression>) -> Result<Self, ParseError> {
        let arity = id.arity();
        if !arity.accepts(args.len()) {
            return Err(ParseError::ArityMismatch {
                name: id.name(),
                expected: arity,
                found: args.len(),
            });
        }
        Ok(Self { id, args })
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            _ => Err(ParseError::UnrecognizedToken(value.to_string())),
        }
    }
}
