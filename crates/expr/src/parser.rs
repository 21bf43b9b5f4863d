//! Expression parser
//!
//! The grammar lives in `expression.pest`. Precedence, lowest first:
//!
//! | level | rule | operators |
//! |-------|------|-----------|
//! | or | `or_expr` | `\|\|`, `or` |
//! | and | `and_expr` | `&&`, `and` |
//! | equality | `eq_expr` | `==`, `!=` |
//! | comparison | `comp_expr` | `<`, `<=`, `>`, `>=` |
//! | additive | `add_expr` | `+`, `-` |
//! | multiplicative | `mul_expr` | `*`, `/`, `%` |
//! | unary | `unary_expr` | `!`, `not`, `-` |
//!
//! Every binary level yields `operand (op operand)*`, folded here into a
//! left-associative [`Expr`] tree.

use crate::ParseError;
use crate::ast::{BinaryOp, Expr, Path, UnaryOp};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;
use recast_record::Value;

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;

/// Parser generated from `expression.pest`
#[derive(Parser)]
#[grammar = "expression.pest"]
struct ExpressionParser;

/// Parse expression source text into a syntax tree
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new("empty expression", 0));
    }

    let mut pairs = ExpressionParser::parse(Rule::expression, source).map_err(syntax_error)?;
    let expression = next_pair(&mut pairs, 0)?;
    let mut inner = expression.into_inner();
    build(next_pair(&mut inner, 0)?)
}

fn build(pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
    match pair.as_rule() {
        Rule::or_expr
        | Rule::and_expr
        | Rule::eq_expr
        | Rule::comp_expr
        | Rule::add_expr
        | Rule::mul_expr => build_binary(pair),
        Rule::unary_expr => build_unary(pair),
        Rule::boolean => Ok(Expr::Literal(Value::Boolean(pair.as_str() == "true"))),
        Rule::null => Ok(Expr::Literal(Value::Null)),
        Rule::number => build_number(&pair),
        Rule::string => build_string(pair),
        Rule::path => build_path(pair),
        rule => Err(ParseError::new(
            format!("unexpected {:?}", rule),
            pair.as_span().start(),
        )),
    }
}

/// Fold `operand (op operand)*` to the left
fn build_binary(pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
    let start = pair.as_span().start();
    let mut inner = pair.into_inner();
    let mut left = build(next_pair(&mut inner, start)?)?;

    while let Some(op_pair) = inner.next() {
        let op = binary_op(&op_pair)?;
        let right = build(next_pair(&mut inner, op_pair.as_span().end())?)?;
        left = Expr::binary(left, op, right);
    }
    Ok(left)
}

fn binary_op(pair: &Pair<'_, Rule>) -> Result<BinaryOp, ParseError> {
    let op = match pair.as_str() {
        "||" | "or" => BinaryOp::Or,
        "&&" | "and" => BinaryOp::And,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::Ne,
        "<" => BinaryOp::Lt,
        "<=" => BinaryOp::Le,
        ">" => BinaryOp::Gt,
        ">=" => BinaryOp::Ge,
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Rem,
        other => {
            return Err(ParseError::new(
                format!("unknown operator '{}'", other),
                pair.as_span().start(),
            ));
        }
    };
    Ok(op)
}

/// Apply prefix operators innermost first; negated number literals fold
fn build_unary(pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
    let start = pair.as_span().start();
    let mut ops = Vec::new();
    let mut operand = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::unary_op if inner.as_str() == "-" => ops.push(UnaryOp::Negate),
            Rule::unary_op => ops.push(UnaryOp::Not),
            _ => operand = Some(build(inner)?),
        }
    }

    let mut expr = operand.ok_or_else(|| ParseError::new("expected a value", start))?;
    for op in ops.into_iter().rev() {
        expr = match (op, expr) {
            (UnaryOp::Negate, Expr::Literal(Value::Int64(i))) if i != i64::MIN => {
                Expr::Literal(Value::Int64(-i))
            }
            (UnaryOp::Negate, Expr::Literal(Value::Double(d))) => Expr::Literal(Value::Double(-d)),
            (op, operand) => Expr::unary(op, operand),
        };
    }
    Ok(expr)
}

fn build_number(pair: &Pair<'_, Rule>) -> Result<Expr, ParseError> {
    let text = pair.as_str();
    let start = pair.as_span().start();

    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .map(|f| Expr::Literal(Value::Double(f)))
            .map_err(|_| ParseError::new("invalid number literal", start))
    } else {
        text.parse::<i64>()
            .map(|i| Expr::Literal(Value::Int64(i)))
            .map_err(|_| ParseError::new("integer literal out of range", start))
    }
}

fn build_string(pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
    let start = pair.as_span().start();
    let mut inner = pair.into_inner();
    let raw = next_pair(&mut inner, start)?;
    Ok(Expr::Literal(Value::String(unescape(raw.as_str()))))
}

/// Resolve the escapes the grammar admits
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn build_path(pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
    let start = pair.as_span().start();
    let segments = pair
        .into_inner()
        .map(|segment| segment.as_str().to_string())
        .collect();
    Path::new(segments)
        .map(Expr::Path)
        .ok_or_else(|| ParseError::new("invalid path", start))
}

fn next_pair<'a>(pairs: &mut Pairs<'a, Rule>, offset: usize) -> Result<Pair<'a, Rule>, ParseError> {
    pairs
        .next()
        .ok_or_else(|| ParseError::new("unexpected end of expression", offset))
}

/// Convert a grammar failure, keeping its byte offset
fn syntax_error(error: pest::error::Error<Rule>) -> ParseError {
    let offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let error = error.renamed_rules(|rule| describe(rule).to_string());
    ParseError::new(error.variant.message(), offset)
}

/// Rule names as shown in error messages
fn describe(rule: &Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of expression",
        Rule::or_op => "'||'",
        Rule::and_op => "'&&'",
        Rule::eq_op => "'==' or '!='",
        Rule::comp_op => "a comparison",
        Rule::add_op => "'+' or '-'",
        Rule::mul_op => "'*', '/' or '%'",
        Rule::unary_op => "a prefix operator",
        Rule::string | Rule::single_inner | Rule::double_inner | Rule::escape => "a string",
        Rule::field | Rule::root | Rule::path => "a field name",
        _ => "a value",
    }
}
