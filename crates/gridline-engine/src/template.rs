use serde_json::Value;

/// Stand-in for `\$` while placeholders are expanded, restored to a bare
/// `$` at the very end. Control character, cannot appear in config text.
const DOLLAR_SENTINEL: char = '\u{1}';

/// Render a template against a data context.
///
/// Placeholder forms: `{path}`, `{path:fmt}`, `{path <op> number:fmt}`
/// with `<op>` one of `+ - * /`. Missing paths and failed coercions
/// produce an empty substitution, never an error: a status line with a
/// hole beats no status line.
pub fn render(template: &str, data: &Value) -> String {
    let protected = template.replace("\\$", &DOLLAR_SENTINEL.to_string());
    let mut out = String::with_capacity(protected.len());
    let mut rest = protected.as_str();

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match rest[open..].find('}') {
            Some(offset) => {
                let inner = &rest[open + 1..open + offset];
                out.push_str(&eval_placeholder(inner, data));
                rest = &rest[open + offset + 1..];
            }
            None => {
                // Unterminated brace: keep the remainder verbatim.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    restore_dollars(&out)
}

/// Restore escaped dollars after all substitution passes. Applied by
/// `render`, and directly by widgets whose content skips the evaluator.
pub fn restore_dollars(text: &str) -> String {
    text.replace("\\$", "$")
        .replace(DOLLAR_SENTINEL, "$")
}

fn eval_placeholder(inner: &str, data: &Value) -> String {
    let (expr, fmt) = match inner.split_once(':') {
        Some((expr, fmt)) => (expr.trim(), Some(fmt.trim())),
        None => (inner.trim(), None),
    };
    if expr.is_empty() {
        return String::new();
    }

    // Arithmetic form: exactly `path <op> number`.
    let tokens: Vec<&str> = expr.split_whitespace().collect();
    if tokens.len() == 3 {
        if let (Some(op), Ok(rhs)) = (parse_op(tokens[1]), tokens[2].parse::<f64>()) {
            let Some(lhs) = resolve_path(data, tokens[0]).and_then(|v| coerce_number(&v)) else {
                return String::new();
            };
            let result = apply_op(lhs, op, rhs);
            return format_number(result, fmt);
        }
    }

    match resolve_path(data, expr) {
        Some(value) => format_value(&value, fmt),
        None => String::new(),
    }
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

fn parse_op(token: &str) -> Option<Op> {
    match token {
        "+" => Some(Op::Add),
        "-" => Some(Op::Sub),
        "*" => Some(Op::Mul),
        "/" => Some(Op::Div),
        _ => None,
    }
}

fn apply_op(lhs: f64, op: Op, rhs: f64) -> f64 {
    match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
        Op::Mul => lhs * rhs,
        Op::Div => {
            if rhs == 0.0 {
                0.0
            } else {
                lhs / rhs
            }
        }
    }
}

/// Resolve a dotted path against a JSON value.
///
/// A string segment that itself holds valid JSON is re-parsed lazily and
/// traversal continues inside it, so hosts can deliver nested structures
/// as JSON-encoded strings in a flat payload. Numeric segments index
/// arrays.
pub fn resolve_path(data: &Value, path: &str) -> Option<Value> {
    let mut current = data.clone();
    for segment in path.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step(current: Value, segment: &str) -> Option<Value> {
    let current = match current {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) if parsed.is_object() || parsed.is_array() => parsed,
            _ => return None,
        },
        other => other,
    };

    match current {
        Value::Object(map) => map.get(segment).cloned(),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Apply a format spec to a resolved value. Supported: `.Nf` fixed
/// decimals, `,` thousands grouping, and the combination `,.Nf`. Unknown
/// specs and non-numeric values pass through as plain strings.
fn format_value(value: &Value, fmt: Option<&str>) -> String {
    match fmt.filter(|f| !f.is_empty()).and_then(parse_format) {
        Some(spec) => match coerce_number(value) {
            Some(number) => spec.apply(number),
            None => value_to_string(value),
        },
        None => value_to_string(value),
    }
}

/// Format a computed number (arithmetic results have no JSON form to fall
/// back on, so unknown specs degrade to the bare number).
fn format_number(number: f64, fmt: Option<&str>) -> String {
    match fmt.filter(|f| !f.is_empty()).and_then(parse_format) {
        Some(spec) => spec.apply(number),
        None => trim_float(number),
    }
}

struct NumberFormat {
    grouping: bool,
    decimals: Option<usize>,
}

impl NumberFormat {
    fn apply(&self, number: f64) -> String {
        let formatted = match self.decimals {
            Some(places) => format!("{:.*}", places, number),
            None => trim_float(number),
        };
        if self.grouping {
            group_thousands(&formatted)
        } else {
            formatted
        }
    }
}

fn parse_format(fmt: &str) -> Option<NumberFormat> {
    let (grouping, rest) = match fmt.strip_prefix(',') {
        Some(rest) => (true, rest),
        None => (false, fmt),
    };
    if rest.is_empty() {
        return grouping.then_some(NumberFormat {
            grouping,
            decimals: None,
        });
    }
    let decimals = rest
        .strip_prefix('.')?
        .strip_suffix('f')?
        .parse::<usize>()
        .ok()?;
    Some(NumberFormat {
        grouping,
        decimals: Some(decimals),
    })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Integer-valued floats display without a trailing `.0`.
fn trim_float(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Insert `,` separators into the integer part of an already formatted
/// number, leaving sign and decimals alone.
fn group_thousands(formatted: &str) -> String {
    let (mantissa, fraction) = match formatted.split_once('.') {
        Some((m, f)) => (m, Some(f)),
        None => (formatted, None),
    };
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", mantissa),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
