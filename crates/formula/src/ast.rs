use std::fmt;

use serde::{Deserialize, Serialize};

/// Formula abstract syntax tree.
///
/// Covers the subset of the record store's formula language the portal
/// sends and evaluates: literals, `{Field}` references, comparisons and
/// function calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    // Literals
    StringLiteral(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),

    /// `{Field Name}`
    Field(String),

    // Comparison operators
    Eq(Box<Expr>, Box<Expr>),
    Neq(Box<Expr>, Box<Expr>),
    Lt(Box<Expr>, Box<Expr>),
    Gt(Box<Expr>, Box<Expr>),
    Lte(Box<Expr>, Box<Expr>),
    Gte(Box<Expr>, Box<Expr>),

    /// `NAME(arg, ...)`. Names are stored upper-cased.
    FuncCall(String, Vec<Expr>),
}

impl Expr {
    /// `name` is rendered between braces unescaped, so it must not contain `}`.
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral(value.into())
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

}

fn write_string_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

fn write_binary(f: &mut fmt::Formatter<'_>, l: &Expr, op: &str, r: &Expr) -> fmt::Result {
    write!(f, "{l} {op} {r}")
}

/// Renders canonical formula text, suitable for a `filterByFormula` parameter.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::StringLiteral(s) => write_string_literal(f, s),
            Expr::IntLiteral(n) => write!(f, "{n}"),
            // Keep a decimal point so the text lexes back as a float.
            Expr::FloatLiteral(n) if n.fract() == 0.0 => write!(f, "{n:.1}"),
            Expr::FloatLiteral(n) => write!(f, "{n}"),
            Expr::BoolLiteral(true) => f.write_str("TRUE()"),
            Expr::BoolLiteral(false) => f.write_str("FALSE()"),
            Expr::Field(name) => write!(f, "{{{name}}}"),
            Expr::Eq(l, r) => write_binary(f, l, "=", r),
            Expr::Neq(l, r) => write_binary(f, l, "!=", r),
            Expr::Lt(l, r) => write_binary(f, l, "<", r),
            Expr::Gt(l, r) => write_binary(f, l, ">", r),
            Expr::Lte(l, r) => write_binary(f, l, "<=", r),
            Expr::Gte(l, r) => write_binary(f, l, ">=", r),
            Expr::FuncCall(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
