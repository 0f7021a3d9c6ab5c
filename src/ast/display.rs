use crate::ast::Expression;
use std::fmt;

/// Renders fully parenthesised text that parses back to an equivalent tree.
/// Variables print as `v<slot>`; use [`Expression::display_with`] to get
/// their names back.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, None)
    }
}

/// An [`Expression`] paired with the variable table it was parsed with.
pub struct NamedExpression<'a> {
    expression: &'a Expression,
    variables: &'a [char],
}

impl fmt::Display for NamedExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self.expression, Some(self.variables))
    }
}

impl Expression {
    pub fn display_with<'a>(&'a self, variables: &'a [char]) -> NamedExpression<'a> {
        NamedExpression {
            expression: self,
            variables,
        }
    }
}

fn write_expression(
    f: &mut fmt::Formatter<'_>,
    expression: &Expression,
    variables: Option<&[char]>,
) -> fmt::Result {
    match expression {
        Expression::Constant(value) if *value < 0.0 => write!(f, "({})", value),
        Expression::Constant(value) => write!(f, "{}", value),
        Expression::Variable(slot) => match variables.and_then(|names| names.get(*slot)) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "v{}", slot),
        },
        Expression::Negation(inner) => {
            write!(f, "(-")?;
            write_expression(f, inner, variables)?;
            write!(f, ")")
        }
        Expression::BinaryOperation {
            left,
            operator,
            right,
        } => {
            write!(f, "(")?;
            write_expression(f, left, variables)?;
            write!(f, "{}", operator.symbol())?;
            write_expression(f, right, variables)?;
            write!(f, ")")
        }
        Expression::FunctionCall(call) => {
            write!(f, "{}(", call.id().name())?;
            for (i, arg) in call.args().iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write_expression(f, arg, variables)?;
            }
            write!(f, ")")
        }
        Expression::Invalid => write!(f, "<invalid>"),
    }
}
