//! Inline markup sanitization
//!
//! Free text in JATS (abstracts in particular) mixes prose with presentational
//! and structural tags. Only a small whitelist survives, rewritten to HTML:
//!
//! | JATS     | output   |
//! |----------|----------|
//! | `italic` | `em`     |
//! | `sub`    | `sub`    |
//! | `sup`    | `sup`    |
//! | `p`      | `p`      |
//!
//! Every other tag is dropped while its text is kept.

use quick_xml::escape::partial_escape;

/// A child visited during rendering
pub enum MarkupChild<'a, N: ?Sized> {
    Text(&'a str),
    Element(&'a N),
}

/// A tree node that can be rendered as sanitized markup
pub trait MarkupNode {
    fn tag_name(&self) -> &str;
    fn markup_children(&self) -> Vec<MarkupChild<'_, Self>>;
}

/// Output tag for a whitelisted input tag
pub fn semantic_tag(name: &str) -> Option<&'static str> {
    match name {
        "italic" => Some("em"),
        "sub" => Some("sub"),
        "sup" => Some("sup"),
        "p" => Some("p"),
        _ => None,
    }
}

/// Render a node (its own tag included) with the whitelist applied
pub fn render_sanitized<N: MarkupNode + ?Sized>(node: &N) -> String {
    let mut out = String::new();
    render_into(node, &mut out);
    out
}

fn render_into<N: MarkupNode + ?Sized>(node: &N, out: &mut String) {
    let tag = semantic_tag(node.tag_name());
    if let Some(tag) = tag {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    for child in node.markup_children() {
        match child {
            MarkupChild::Text(text) => out.push_str(&partial_escape(text)),
            MarkupChild::Element(element) => render_into(element, out),
        }
    }
    if let Some(tag) = tag {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Sanitized, trimmed markup; `None` when nothing but whitespace remains
pub fn sanitize<N: MarkupNode + ?Sized>(node: &N) -> Option<String> {
    let rendered = render_sanitized(node);
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal tree so the renderer can be tested without XML
    struct Tag {
        name: &'static str,
        children: Vec<Child>,
    }

    enum Child {
        Text(&'static str),
        Tag(Tag),
    }

    impl MarkupNode for Tag {
        fn tag_name(&self) -> &str {
            self.name
        }

        fn markup_children(&self) -> Vec<MarkupChild<'_, Self>> {
            self.children
                .iter()
                .map(|c| match c {
                    Child::Text(t) => MarkupChild::Text(*t),
                    Child::Tag(t) => MarkupChild::Element(t),
                })
                .collect()
        }
    }

    fn tag(name: &'static str, children: Vec<Child>) -> Child {
        Child::Tag(Tag { name, children })
    }

    #[test]
    fn test_whitelist_is_rewritten() {
        let root = Tag {
            name: "abstract",
            children: vec![tag(
                "p",
                vec![
                    Child::Text("H"),
                    tag("sub", vec![Child::Text("2")]),
                    Child::Text("O is "),
                    tag("italic", vec![Child::Text("wet")]),
                    tag("sup", vec![Child::Text("1")]),
                ],
            )],
        };
        assert_eq!(
            render_sanitized(&root),
            "<p>H<sub>2</sub>O is <em>wet</em><sup>1</sup></p>"
        );
    }

    #[test]
    fn test_unknown_tags_keep_text() {
        let root = Tag {
            name: "abstract",
            children: vec![
                tag("title", vec![Child::Text("Background ")]),
                tag("bold", vec![Child::Text("strong")]),
                Child::Text(" claim"),
            ],
        };
        assert_eq!(render_sanitized(&root), "Background strong claim");
    }

    #[test]
    fn test_text_is_escaped() {
        let root = Tag {
            name: "p",
            children: vec![Child::Text("a < b & c")],
        };
        assert_eq!(render_sanitized(&root), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_blank_is_none() {
        let root = Tag {
            name: "abstract",
            children: vec![Child::Text("  \n  "), tag("title", vec![])],
        };
        assert_eq!(sanitize(&root), None);
    }

    #[test]
    fn test_sanitize_trims() {
        let root = Tag {
            name: "abstract",
            children: vec![Child::Text("\n  "), tag("p", vec![Child::Text("Text")]), Child::Text(" ")],
        };
        assert_eq!(sanitize(&root).as_deref(), Some("<p>Text</p>"));
    }
}
