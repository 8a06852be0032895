// Built-in formula functions.

use serde_json::Value;

use crate::eval::{truthy, EvalError};

/// Evaluate a built-in function by its upper-cased name.
pub fn call_builtin(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    match name {
        "AND" => builtin_and(args),
        "OR" => builtin_or(args),
        "NOT" => builtin_not(args),
        "BLANK" => Ok(Value::Null),
        "TRUE" => Ok(Value::Bool(true)),
        "FALSE" => Ok(Value::Bool(false)),
        _ => {
            tracing::debug!(function = name, "unknown formula function");
            Err(EvalError::UnknownFunction(name.to_string()))
        }
    }
}

fn builtin_and(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::TypeError("AND() needs at least one argument".into()));
    }
    Ok(Value::Bool(args.iter().all(truthy)))
}

fn builtin_or(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::TypeError("OR() needs at least one argument".into()));
    }
    Ok(Value::Bool(args.iter().any(truthy)))
}

fn builtin_not(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => Ok(Value::Bool(!truthy(value))),
        _ => Err(EvalError::TypeError("NOT() takes exactly one argument".into())),
    }
}
