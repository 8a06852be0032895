// In-memory formula evaluator, used by the in-memory record store to apply
// the same filter the HTTP store receives.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::ast::Expr;
use crate::functions::call_builtin;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("type error: {0}")]
    TypeError(String),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// Evaluate `expr` against a record's fields and coerce the result to a boolean.
pub fn eval_filter(expr: &Expr, fields: &Map<String, Value>) -> Result<bool, EvalError> {
    Ok(truthy(&eval_expr(expr, fields)?))
}

pub fn eval_expr(expr: &Expr, fields: &Map<String, Value>) -> Result<Value, EvalError> {
    match expr {
        Expr::StringLiteral(s) => Ok(Value::String(s.clone())),
        Expr::IntLiteral(n) => Ok(Value::Number((*n).into())),
        Expr::FloatLiteral(n) => Ok(serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        Expr::BoolLiteral(b) => Ok(Value::Bool(*b)),
        Expr::Field(name) => Ok(field_value(fields.get(name))),
        Expr::Eq(l, r) => compare(l, r, fields, |o| o == Ordering::Equal),
        Expr::Neq(l, r) => compare(l, r, fields, |o| o != Ordering::Equal),
        Expr::Lt(l, r) => compare(l, r, fields, |o| o == Ordering::Less),
        Expr::Gt(l, r) => compare(l, r, fields, |o| o == Ordering::Greater),
        Expr::Lte(l, r) => compare(l, r, fields, |o| o != Ordering::Greater),
        Expr::Gte(l, r) => compare(l, r, fields, |o| o != Ordering::Less),
        Expr::FuncCall(name, args) => {
            let values = args
                .iter()
                .map(|arg| eval_expr(arg, fields))
                .collect::<Result<Vec<_>, _>>()?;
            call_builtin(name, &values)
        }
    }
}

/// Store truthiness: blank, `0`, `false` and `""` are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// Multi-value fields read as their comma-joined text, like the store does.
fn field_value(raw: Option<&Value>) -> Value {
    match raw {
        None => Value::Null,
        Some(Value::Array(items)) if items.is_empty() => Value::Null,
        Some(Value::Array(items)) => Value::String(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Some(other) => other.clone(),
    }
}

#[derive(Debug, PartialEq)]
enum Comparable {
    Blank,
    Num(f64),
    Text(String),
}

impl Comparable {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Comparable::Blank,
            Value::String(s) if s.is_empty() => Comparable::Blank,
            Value::String(s) => Comparable::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Comparable::Num).unwrap_or(Comparable::Blank),
            Value::Bool(b) => Comparable::Num(if *b { 1.0 } else { 0.0 }),
            other => Comparable::Text(other.to_string()),
        }
    }

    fn text(&self) -> String {
        match self {
            Comparable::Blank => String::new(),
            Comparable::Num(n) => n.to_string(),
            Comparable::Text(s) => s.clone(),
        }
    }
}

fn ordering(left: &Comparable, right: &Comparable) -> Ordering {
    match (left, right) {
        (Comparable::Blank, Comparable::Blank) => Ordering::Equal,
        (Comparable::Num(a), Comparable::Num(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Comparable::Blank, Comparable::Num(b)) => 0.0_f64.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Comparable::Num(a), Comparable::Blank) => a.partial_cmp(&0.0).unwrap_or(Ordering::Equal),
        (Comparable::Num(a), Comparable::Text(b)) => match b.parse::<f64>() {
            Ok(b) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            Err(_) => left.text().cmp(b),
        },
        (Comparable::Text(a), Comparable::Num(b)) => match a.parse::<f64>() {
            Ok(a) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            Err(_) => a.cmp(&right.text()),
        },
        _ => left.text().cmp(&right.text()),
    }
}

fn compare(
    l: &Expr,
    r: &Expr,
    fields: &Map<String, Value>,
    test: fn(Ordering) -> bool,
) -> Result<Value, EvalError> {
    let left = Comparable::from_value(&eval_expr(l, fields)?);
    let right = Comparable::from_value(&eval_expr(r, fields)?);
    // Blank only equals blank; it never matches a zero or a word.
    let order = match (&left, &right) {
        (Comparable::Blank, Comparable::Blank) => Ordering::Equal,
        (Comparable::Blank, _) | (_, Comparable::Blank)
            if ordering(&left, &right) == Ordering::Equal =>
        {
            Ordering::Less
        }
        _ => ordering(&left, &right),
    };
    Ok(Value::Bool(test(order)))
}
