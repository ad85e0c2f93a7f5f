//! DOM Boundary Adapter
//!
//! Converts between markup and the owned [`Tree`] the cleaning passes work
//! on. Parsing is delegated to the `dom_query` crate (html5ever underneath),
//! so the tree a caller gets is the same one a browser would build from the
//! pasted markup. Serialization follows the `innerHTML` rules: void elements
//! have no end tag, text escapes `&`, `<`, `>` and non-breaking spaces,
//! attribute values escape `&`, `"` and non-breaking spaces.

pub use dom_query::{Document, NodeRef, Selection};
use tendril::StrTendril;

use crate::tags::is_void_tag;
use crate::tree::{NodeData, NodeId, Tree};

// === Parsing ===

/// Parse an HTML fragment into an owned tree.
///
/// The markup is parsed as a full document and the children of `<body>`
/// become the children of the tree's fragment root. Leading head-only
/// content (`<meta charset>`, `<style>` blocks from clipboard documents)
/// is therefore not part of the result.
#[must_use]
pub fn parse_fragment(html: &str) -> Tree {
    let doc = Document::from(html);
    from_document(&doc)
}

/// Build an owned tree from the `<body>` of an already parsed document.
#[must_use]
pub fn from_document(doc: &Document) -> Tree {
    let body = doc.select("body");
    from_selection(&body)
}

/// Build an owned tree from the children of every node in `sel`.
///
/// Comments, doctypes and processing instructions are skipped.
#[must_use]
pub fn from_selection(sel: &Selection) -> Tree {
    let mut tree = Tree::new();
    let root = tree.root();

    for node in sel.nodes() {
        let mut stack: Vec<(NodeRef, NodeId)> = node
            .children()
            .into_iter()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            if node.is_element() {
                // Tendrils borrow the parser's buffers; the tree lowercases and copies.
                let name: StrTendril = node.node_name().unwrap_or_default();
                let id = tree.new_element(&name);
                let attrs: Vec<(String, String)> = node
                    .attrs()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                for (key, value) in &attrs {
                    tree.set_attr(id, key, value);
                }
                tree.append_child(parent, id);
                stack.extend(node.children().into_iter().rev().map(|child| (child, id)));
            } else if node.is_text() {
                let text: StrTendril = node.text();
                let id = tree.new_text(&text);
                tree.append_child(parent, id);
            }
        }
    }

    tree
}

// === Serialization ===

/// Serialize the children of the fragment root to markup.
#[must_use]
pub fn serialize(tree: &Tree) -> String {
    let mut out = String::new();
    serialize_into(tree, tree.children(tree.root()), &mut out);
    out
}

/// Serialize a single node (element with its subtree, or text).
#[must_use]
pub fn outer_html(tree: &Tree, id: NodeId) -> String {
    let mut out = String::new();
    serialize_into(tree, &[id], &mut out);
    out
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Walk with an explicit stack so nesting depth is bounded by the heap.
fn serialize_into(tree: &Tree, nodes: &[NodeId], out: &mut String) {
    let mut stack: Vec<Step> = nodes.iter().rev().map(|&id| Step::Open(id)).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => match tree.data(id) {
                NodeData::Text(text) => escape_text(text, out),
                NodeData::Element { name, attrs } => {
                    out.push('<');
                    out.push_str(name);
                    for (key, value) in attrs {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        escape_attr(value, out);
                        out.push('"');
                    }
                    out.push('>');
                    if is_void_tag(name) {
                        continue;
                    }
                    stack.push(Step::Close(id));
                    stack.extend(tree.children(id).iter().rev().map(|&c| Step::Open(c)));
                }
            },
            Step::Close(id) => {
                if let Some(name) = tree.tag(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }
}

fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_uses_body_children() {
        let tree = parse_fragment("<meta charset=\"utf-8\"><p>one</p><p>two</p>");
        let root_children = tree.children(tree.root());

        assert_eq!(root_children.len(), 2);
        assert!(tree.is_tag(root_children[0], "p"));
        assert_eq!(tree.text_content(root_children[1]), "two");
    }

    #[test]
    fn test_parse_keeps_attributes_in_order() {
        let tree = parse_fragment(r#"<a href="/x" title="t" class="c">link</a>"#);
        let a = tree.children(tree.root())[0];
        let keys: Vec<&str> = tree.attrs(a).iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["href", "title", "class"]);
    }

    #[test]
    fn test_parse_skips_comments() {
        let tree = parse_fragment("<p>a<!-- note -->b</p>");
        assert_eq!(serialize(&tree), "<p>ab</p>");
    }

    #[test]
    fn test_serialize_void_and_escapes() {
        let tree = parse_fragment("<p>a&amp;b &lt;c&gt;&nbsp;<br>d</p>");
        assert_eq!(serialize(&tree), "<p>a&amp;b &lt;c&gt;&nbsp;<br>d</p>");
    }

    #[test]
    fn test_serialize_escapes_attribute_quotes() {
        let tree = parse_fragment(r#"<a href="/q?a=1&amp;b=&quot;2&quot;">x</a>"#);
        assert_eq!(serialize(&tree), r#"<a href="/q?a=1&amp;b=&quot;2&quot;">x</a>"#);
    }

    #[test]
    fn test_from_document_matches_parse_fragment() {
        let html = "<div><span>x</span></div>";
        let doc = Document::from(html);
        assert_eq!(serialize(&from_document(&doc)), serialize(&parse_fragment(html)));
    }

    #[test]
    fn test_serialize_deep_nesting() {
        let depth = 5_000;
        let mut tree = Tree::new();
        let mut parent = tree.root();
        for _ in 0..depth {
            let div = tree.new_element("div");
            tree.append_child(parent, div);
            parent = div;
        }
        let text = tree.new_text("x");
        tree.append_child(parent, text);

        let html = serialize(&tree);
        assert_eq!(html, format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth)));
    }

    #[test]
    fn test_outer_html_of_single_node() {
        let tree = parse_fragment("<ul><li>a</li></ul>");
        let ul = tree.children(tree.root())[0];
        assert_eq!(outer_html(&tree, ul), "<ul><li>a</li></ul>");
    }
}
