//! Rendering of a tag tree as human-readable text.
//!
//! Three styles are supported: the classic tab-indented dump, a box-drawing
//! tree, and an ANSI-colored variant of the classic dump. Rendering is
//! presentation only and never mutates the tree.

use crate::{NamedTag, Value};

/// How to lay out the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Tab-indented `TAG_Type("name"): value` lines with braced blocks.
    Original,
    /// Box-drawing tree using `├─`, `└─` and `│`.
    Pipe,
    /// The Original layout with ANSI color codes.
    Color,
}

const RESET: &str = "\x1b[0m";
const TYPE_COLOR: &str = "\x1b[38;5;166m";
const NAME_COLOR: &str = "\x1b[33m";
const VALUE_COLOR: &str = "\x1b[32m";

/// Render the whole tree in the given style.
pub fn render(tag: &NamedTag, style: Style) -> String {
    let mut out = String::new();
    match style {
        Style::Original => original(&mut out, Some(tag.name.as_str()), &tag.value, 0, false),
        Style::Color => original(&mut out, Some(tag.name.as_str()), &tag.value, 0, true),
        Style::Pipe => {
            out.push_str(&label(Some(tag.name.as_str()), &tag.value, false));
            out.push('\n');
            pipe_children(&mut out, &tag.value, "");
        }
    }
    out
}

/// The `TAG_Type("name")` part of a line, plus the value or container
/// summary after the colon.
fn label(name: Option<&str>, value: &Value, color: bool) -> String {
    let type_name = value.tag().name();
    let head = match (color, name) {
        (false, Some(n)) => format!("{}(\"{}\")", type_name, n),
        (false, None) => type_name.to_string(),
        (true, Some(n)) => format!(
            "{}{}{}({}\"{}\"{})",
            TYPE_COLOR, type_name, RESET, NAME_COLOR, n, RESET
        ),
        (true, None) => format!("{}{}{}", TYPE_COLOR, type_name, RESET),
    };
    let (open, close) = if color { (VALUE_COLOR, RESET) } else { ("", "") };
    match value {
        Value::Byte(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::Short(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::Int(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::Long(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::Float(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::Double(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::String(v) => format!("{}: {}{}{}", head, open, v, close),
        Value::ByteArray(v) => format!("{}: {}[{} bytes]{}", head, open, v.len(), close),
        Value::IntArray(v) => format!("{}: {}[{} ints]{}", head, open, v.len(), close),
        Value::List(l) => format!(
            "{}: {} entries of type {}",
            head,
            l.len(),
            l.element().name()
        ),
        Value::Compound(c) => format!("{}: {} entries", head, c.len()),
    }
}

fn original(out: &mut String, name: Option<&str>, value: &Value, depth: usize, color: bool) {
    let tabs = "\t".repeat(depth);
    out.push_str(&tabs);
    out.push_str(&label(name, value, color));
    out.push('\n');
    match value {
        Value::List(list) => {
            out.push_str(&tabs);
            out.push_str("{\n");
            for item in list {
                original(out, None, item, depth + 1, color);
            }
            out.push_str(&tabs);
            out.push_str("}\n");
        }
        Value::Compound(compound) => {
            out.push_str(&tabs);
            out.push_str("{\n");
            for (child_name, item) in compound {
                original(out, Some(child_name.as_str()), item, depth + 1, color);
            }
            out.push_str(&tabs);
            out.push_str("}\n");
        }
        _ => {}
    }
}

fn pipe_children(out: &mut String, value: &Value, prefix: &str) {
    let children: Vec<(Option<&str>, &Value)> = match value {
        Value::List(list) => list.iter().map(|v| (None, v)).collect(),
        Value::Compound(compound) => compound
            .iter()
            .map(|(name, v)| (Some(name.as_str()), v))
            .collect(),
        _ => return,
    };
    let count = children.len();
    for (i, (name, child)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└─ " } else { "├─ " });
        out.push_str(&label(name, child, false));
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
        pipe_children(out, child, &child_prefix);
    }
}
