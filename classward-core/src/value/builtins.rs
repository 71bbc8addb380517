//! Builtin method tables and type constructors

use rustc_hash::FxHashMap;

use super::{CallArgs, Method, Value, ValueError, ValueKind, ValueResult};

/// Look up a builtin method of `kind`
pub fn method(kind: ValueKind, name: &str) -> Option<Method> {
    let body: fn(&Value, &CallArgs) -> ValueResult<Value> = match (kind, name) {
        (ValueKind::String, "upper") => string_upper,
        (ValueKind::String, "lower") => string_lower,
        (ValueKind::String, "strip") => string_strip,
        (ValueKind::List, "copy") => list_copy,
        (ValueKind::List, "count") => list_count,
        (ValueKind::Map, "keys") => map_keys,
        (ValueKind::Map, "values") => map_values,
        (ValueKind::Map, "get") => map_get,
        _ => return None,
    };
    Some(Method::new(kind.name(), name, body))
}

fn string_upper(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    Ok(Value::String(receiver.as_string()?.to_uppercase()))
}

fn string_lower(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    Ok(Value::String(receiver.as_string()?.to_lowercase()))
}

fn string_strip(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    Ok(Value::String(receiver.as_string()?.trim().to_string()))
}

fn list_copy(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    Ok(Value::List(receiver.as_list()?.to_vec()))
}

fn list_count(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(1)?;
    let needle = &args.positional[0];
    let count = receiver.as_list()?.iter().filter(|v| *v == needle).count();
    Ok(Value::Integer(count as i64))
}

fn sorted_entries(map: &FxHashMap<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn map_keys(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    let keys = sorted_entries(receiver.as_map()?)
        .into_iter()
        .map(|(k, _)| Value::String(k.clone()))
        .collect();
    Ok(Value::List(keys))
}

fn map_values(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    args.expect_arity(0)?;
    let values = sorted_entries(receiver.as_map()?)
        .into_iter()
        .map(|(_, v)| v.clone())
        .collect();
    Ok(Value::List(values))
}

fn map_get(receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
    let default = match args.positional.len() {
        1 => Value::Nil,
        2 => args.positional[1].clone(),
        actual => return Err(ValueError::ArityMismatch { expected: 2, actual }),
    };
    let key = args.positional[0].as_string()?;
    Ok(receiver.as_map()?.get(key).cloned().unwrap_or(default))
}

/// Builtin type constructors, e.g. `integer("42")` or `map(**named)`
pub fn construct(kind: ValueKind, args: &CallArgs) -> ValueResult<Value> {
    if kind != ValueKind::Map && !args.named.is_empty() {
        return Err(ValueError::InvalidOperation(format!(
            "{}() takes no keyword arguments",
            kind
        )));
    }

    let arg = match args.positional.len() {
        0 => None,
        1 => Some(&args.positional[0]),
        actual => return Err(ValueError::ArityMismatch { expected: 1, actual }),
    };

    match kind {
        ValueKind::Nil => match arg {
            None => Ok(Value::Nil),
            Some(_) => Err(ValueError::ArityMismatch {
                expected: 0,
                actual: 1,
            }),
        },
        ValueKind::Boolean => Ok(Value::Boolean(arg.map_or(false, Value::is_truthy))),
        ValueKind::Integer => match arg {
            None => Ok(Value::Integer(0)),
            Some(Value::Integer(n)) => Ok(Value::Integer(*n)),
            Some(Value::Float(x)) => float_to_integer(*x).map(Value::Integer),
            Some(Value::Boolean(b)) => Ok(Value::Integer(i64::from(*b))),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Value::Integer).map_err(|e| {
                ValueError::ConversionError {
                    from: "string",
                    to: "integer",
                    reason: e.to_string(),
                }
            }),
            Some(other) => Err(conversion_error(other, "integer")),
        },
        ValueKind::Float => match arg {
            None => Ok(Value::Float(0.0)),
            Some(Value::Integer(n)) => Ok(Value::Float(*n as f64)),
            Some(Value::Float(x)) => Ok(Value::Float(*x)),
            Some(Value::Boolean(b)) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(Value::Float).map_err(|e| {
                ValueError::ConversionError {
                    from: "string",
                    to: "float",
                    reason: e.to_string(),
                }
            }),
            Some(other) => Err(conversion_error(other, "float")),
        },
        ValueKind::String => Ok(Value::String(arg.map(|v| v.to_string()).unwrap_or_default())),
        ValueKind::List => match arg {
            None => Ok(Value::List(Vec::new())),
            Some(Value::List(items)) => Ok(Value::List(items.clone())),
            Some(Value::String(s)) => Ok(Value::List(
                s.chars().map(|c| Value::String(c.to_string())).collect(),
            )),
            Some(Value::Map(map)) => Ok(Value::List(
                sorted_entries(map)
                    .into_iter()
                    .map(|(k, _)| Value::String(k.clone()))
                    .collect(),
            )),
            Some(other) => Err(conversion_error(other, "list")),
        },
        ValueKind::Map => {
            let mut map = match arg {
                None => FxHashMap::default(),
                Some(Value::Map(map)) => map.clone(),
                Some(other) => return Err(conversion_error(other, "map")),
            };
            for (name, value) in &args.named {
                map.insert(name.clone(), value.clone());
            }
            Ok(Value::Map(map))
        }
        ValueKind::Object | ValueKind::Method => Err(ValueError::InvalidOperation(format!(
            "cannot construct a bare {}",
            kind
        ))),
    }
}

fn conversion_error(value: &Value, to: &'static str) -> ValueError {
    ValueError::ConversionError {
        from: value.kind().name(),
        to,
        reason: format!("unsupported argument {}", value.repr()),
    }
}

/// Truncates toward zero; NaN, infinities and floats outside the i64 range fail
fn float_to_integer(x: f64) -> ValueResult<i64> {
    let truncated = x.trunc();
    // i64::MIN is exactly representable, 2^63 is the first value past i64::MAX
    if truncated.is_finite()
        && truncated >= i64::MIN as f64
        && truncated < 9_223_372_036_854_775_808.0
    {
        Ok(truncated as i64)
    } else {
        Err(ValueError::ConversionError {
            from: "float",
            to: "integer",
            reason: format!("{} has no integer value", x),
        })
    }
}
