use crate::print::{render, Style};
use crate::{Compound, List, NamedTag, Tag};

fn sample() -> NamedTag {
    let mut ns = List::new(Tag::Int);
    ns.push(4i32).unwrap();
    ns.push(5i32).unwrap();
    let mut root = Compound::new();
    root.insert("x", 42i8);
    root.insert("ns", ns);
    NamedTag::new("", root)
}

#[test]
fn original_style() {
    let text = render(&sample(), Style::Original);
    let expected = "TAG_Compound(\"\"): 2 entries\n\
                    {\n\
                    \tTAG_Byte(\"x\"): 42\n\
                    \tTAG_List(\"ns\"): 2 entries of type TAG_Int\n\
                    \t{\n\
                    \t\tTAG_Int: 4\n\
                    \t\tTAG_Int: 5\n\
                    \t}\n\
                    }\n";
    assert_eq!(text, expected);
}

#[test]
fn pipe_style() {
    let text = render(&sample(), Style::Pipe);
    let expected = "TAG_Compound(\"\"): 2 entries\n\
                    ├─ TAG_Byte(\"x\"): 42\n\
                    └─ TAG_List(\"ns\"): 2 entries of type TAG_Int\n   \
                    ├─ TAG_Int: 4\n   \
                    └─ TAG_Int: 5\n";
    assert_eq!(text, expected);
}

#[test]
fn pipe_style_uses_continuation_bars() {
    let mut inner = Compound::new();
    inner.insert("deep", 1i8);
    let mut root = Compound::new();
    root.insert("inner", inner);
    root.insert("after", 2i8);
    let text = render(&NamedTag::new("", root), Style::Pipe);
    // "inner" is not the last child, so its subtree is prefixed with a bar.
    assert!(text.contains("│  └─ TAG_Byte(\"deep\"): 1"));
}

#[test]
fn color_style_wraps_fragments_in_ansi_codes() {
    let text = render(&sample(), Style::Color);
    assert!(text.contains("\x1b[38;5;166mTAG_Byte\x1b[0m"));
    assert!(text.contains("\x1b[33m\"x\"\x1b[0m"));
    assert!(text.contains("\x1b[32m42\x1b[0m"));
    // Same layout as the original style once the escapes are stripped.
    let mut stripped = String::new();
    let mut rest = text.as_str();
    while let Some(start) = rest.find('\x1b') {
        stripped.push_str(&rest[..start]);
        let after = &rest[start..];
        let end = after.find('m').map(|i| i + 1).unwrap_or(after.len());
        rest = &after[end..];
    }
    stripped.push_str(rest);
    assert_eq!(stripped, render(&sample(), Style::Original));
}

#[test]
fn scalar_root() {
    let tag = NamedTag::new("answer", 42i32);
    assert_eq!(render(&tag, Style::Original), "TAG_Int(\"answer\"): 42\n");
    assert_eq!(render(&tag, Style::Pipe), "TAG_Int(\"answer\"): 42\n");
}
