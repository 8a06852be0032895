//! Filter-formula language understood by the record store.
//!
//! Filters are built as [`Expr`] trees and rendered with `Display` for the
//! wire; [`parse`] and [`eval_filter`] let an in-process store apply the exact
//! same text.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use eval::{eval_filter, EvalError};
pub use parser::{parse, ParseError};
