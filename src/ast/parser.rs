use crate::ast::{Expression, FunctionCall, Operator, ParseError};
use crate::functions::FunctionId;
use log::{debug, trace};

/// Operator classes, loosest binding first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Tier {
    Additive,
    Multiplicative,
    Power,
}

impl Tier {
    const ALL: [Tier; 3] = [Tier::Additive, Tier::Multiplicative, Tier::Power];

    fn contains(self, c: char) -> bool {
        match self {
            Tier::Additive => c == '+' || c == '-',
            Tier::Multiplicative => c == '*' || c == '/',
            Tier::Power => c == '^',
        }
    }
}

/// Turns formula text into an [`Expression`].
///
/// There is no tokenizer. Each recursion level normalises its substring,
/// looks for the rightmost top-level operator of the loosest tier present and
/// splits there, so operators of equal precedence associate to the left.
/// Variables are single characters; their position in the table handed to
/// [`ExpressionParser::new`] becomes the slot in the point vector.
///
/// Every split recurses into a freshly normalised copy of each side, so
/// recursion depth grows with the number of operators in a flat chain such as
/// `1+1+...+1`, not with parenthesis nesting, and parsing such a chain is
/// quadratic in its length. Formulas typed into a plot field stay far below
/// the point where this matters.
#[derive(Debug, Copy, Clone)]
pub struct ExpressionParser<'a> {
    variables: &'a [char],
}

impl<'a> ExpressionParser<'a> {
    pub fn new(variables: &'a [char]) -> Self {
        Self { variables }
    }

    /// Parses `input`, returning [`Expression::Invalid`] if any part of it is
    /// malformed. Partial trees are never returned.
    pub fn parse(&self, input: &str) -> Expression {
        match self.try_parse(input) {
            Ok(ast) => ast,
            Err(err) => {
                debug!("Rejected expression {:?}: {}", input, err);
                Expression::Invalid
            }
        }
    }

    /// Like [`ExpressionParser::parse`] but keeps the reason for a rejection.
    pub fn try_parse(&self, input: &str) -> Result<Expression, ParseError> {
        debug!("Parsing expression: {}", input);
        self.parse_expression(input)
    }

    fn parse_expression(&self, input: &str) -> Result<Expression, ParseError> {
        let chars = self.normalize(input);
        trace!("Normalized: {}", chars.iter().collect::<String>());

        if chars.is_empty() {
            return Err(ParseError::Empty);
        }

        for tier in Tier::ALL {
            // A leading minus only reaches here once no lower tier split.
            if tier != Tier::Additive && chars[0] == '-' {
                let inner = self.parse_expression(&text(&chars[1..]))?;
                return Ok(Expression::negation(inner));
            }

            if let Some(pos) = split_point(&chars, tier) {
                trace!("Splitting at {} ({:?})", pos, chars[pos]);
                let operator = Operator::try_from(chars[pos])?;
                let left = self.parse_expression(&text(&chars[..pos]))?;
                let right = self.parse_expression(&text(&chars[pos + 1..]))?;
                return Ok(Expression::binary(left, operator, right));
            }
        }

        if let Some(call) = self.parse_function_call(&chars)? {
            return Ok(call);
        }

        if let [c] = chars.as_slice() {
            if let Some(slot) = self.variables.iter().position(|v| v == c) {
                return Ok(Expression::Variable(slot));
            }
        }

        parse_literal(&chars).map(Expression::Constant)
    }

    fn normalize(&self, input: &str) -> Vec<char> {
        let chars: Vec<char> = input.to_lowercase().chars().filter(|&c| c != ' ').collect();
        let chars = strip_outer_parentheses(&chars);
        self.insert_implied_multiplication(chars)
    }

    /// `2x`, `x(x+1)`, `(a)(b)` and friends. Function names are masked first
    /// so their letters never count as variables.
    fn insert_implied_multiplication(&self, chars: &[char]) -> Vec<char> {
        let mut out = chars.to_vec();
        let mut masked = mask_function_names(chars);

        let mut i = 0;
        while i + 1 < out.len() {
            let c = masked[i];
            let next = masked[i + 1];
            let implied = (self.is_number_part(c) && (next == '(' || self.is_variable(next)))
                || (self.is_number_part(next) && (c == ')' || c == 'x'))
                || (c == ')' && next == '(');
            if implied {
                out.insert(i + 1, '*');
                masked.insert(i + 1, '*');
            }
            i += 1;
        }
        out
    }

    fn parse_function_call(&self, chars: &[char]) -> Result<Option<Expression>, ParseError> {
        let word = first_word(chars);
        let Some(id) = FunctionId::lookup(&text(word)) else {
            return Ok(None);
        };

        let mut args = Vec::new();
        if word.len() != chars.len() {
            if chars[word.len()] != '(' || chars[chars.len() - 1] != ')' {
                return Err(ParseError::MalformedCall(text(chars)));
            }

            let inner = &chars[word.len() + 1..chars.len() - 1];
            if !inner.is_empty() {
                for arg in split_arguments(inner) {
                    args.push(self.parse_expression(&text(arg))?);
                }
            }
        }

        let call = FunctionCall::new(id, args)?;
        Ok(Some(Expression::FunctionCall(call)))
    }

    fn is_variable(&self, c: char) -> bool {
        self.variables.contains(&c)
    }

    fn is_number_part(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '.' || self.is_variable(c)
    }
}

fn text(chars: &[char]) -> String {
    chars.iter().collect()
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

/// Drops parenthesis pairs that enclose the whole string, as in `((x+1))`,
/// but leaves `(a)+(b)` alone.
fn strip_outer_parentheses(chars: &[char]) -> &[char] {
    let mut s = chars;
    while s.len() >= 2 && s[0] == '(' && s[s.len() - 1] == ')' {
        let mut level = 1;
        for &c in s[1..s.len() - 1].iter().rev() {
            match c {
                ')' => level += 1,
                '(' => level -= 1,
                _ => {}
            }
            if level == 0 {
                break;
            }
        }
        if level == 0 {
            break;
        }
        s = &s[1..s.len() - 1];
    }
    s
}

/// Rightmost operator of `tier` that sits outside all parentheses, is not
/// the first character, does not follow another operator and is not the sign
/// of a literal's exponent (`3e-1`).
fn split_point(chars: &[char], tier: Tier) -> Option<usize> {
    let mut level = 0i32;
    for i in (0..chars.len()).rev() {
        let c = chars[i];
        if level == 0 && i > 0 && tier.contains(c) && !is_operator(chars[i - 1]) {
            let exponent_sign = (c == '+' || c == '-')
                && chars[i - 1] == 'e'
                && i >= 2
                && chars[i - 2].is_ascii_digit();
            if !exponent_sign {
                return Some(i);
            }
        }
        match c {
            ')' => level += 1,
            '(' => level -= 1,
            _ => {}
        }
    }
    None
}

/// Leading identifier: a letter or underscore followed by letters,
/// underscores and digits. Empty when the text starts with anything else.
fn first_word(chars: &[char]) -> &[char] {
    match chars.first() {
        Some(c) if c.is_ascii_alphabetic() || *c == '_' => {}
        _ => return &[],
    }
    let end = chars
        .iter()
        .position(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        .unwrap_or(chars.len());
    &chars[..end]
}

/// Overwrites every catalog name in the text with underscores, scanning left
/// to right over the already masked copy.
fn mask_function_names(chars: &[char]) -> Vec<char> {
    let mut masked = chars.to_vec();
    for i in 0..masked.len() {
        let len = first_word(&masked[i..]).len();
        if len > 0 && FunctionId::lookup(&text(&masked[i..i + len])).is_some() {
            masked[i..i + len].fill('_');
        }
    }
    masked
}

/// Splits a call's argument list at commas outside nested parentheses.
fn split_arguments(chars: &[char]) -> Vec<&[char]> {
    let mut args = Vec::new();
    let mut level = 0i32;
    let mut start = 0;
    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' if level == 0 => {
                args.push(&chars[start..i]);
                start = i + 1;
            }
            '(' => level += 1,
            ')' => level -= 1,
            _ => {}
        }
    }
    args.push(&chars[start..]);
    args
}

/// Plain decimal literals only: digits, a point and an `e` exponent. Words
/// such as `inf` and `nan` are rejected even though `f64` would accept them.
fn parse_literal(chars: &[char]) -> Result<f64, ParseError> {
    let literal = text(chars);
    let plain = chars
        .iter()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-'));
    if !plain {
        return Err(ParseError::UnrecognizedToken(literal));
    }
    literal
        .parse::<f64>()
        .map_err(|_| ParseError::UnrecognizedToken(literal))
}
