//! Plain-text rendering of a cleaned tree.
//!
//! Produces the `text/plain` half of the clipboard pair. Rendering follows
//! what a reader sees: paragraphs and headings are separated by a blank
//! line, other blocks start on their own line, `<br>` breaks the line and
//! list items get a `- ` or `N. ` marker. Whitespace inside text runs is
//! collapsed as HTML rendering would.

use crate::tree::{NodeData, NodeId, Tree};

/// Blocks separated from their surroundings by a blank line.
const PARAGRAPH_TAGS: [&str; 8] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote"];

/// Blocks that only need to start on a fresh line.
const LINE_TAGS: [&str; 2] = ["div", "li"];

/// Render the tree below the fragment root as plain text.
#[must_use]
pub fn render_plain_text(tree: &Tree) -> String {
    let mut writer = TextWriter::default();
    writer.render(tree, tree.children(tree.root()));
    writer.finish()
}

#[derive(Default)]
struct TextWriter {
    out: String,
    pending_breaks: usize,
    marker: Option<String>,
}

enum Step {
    /// Node to render, with the list marker it gets as a list item.
    Enter(NodeId, Option<String>),
    /// End of a block: request breaks, and end the list item if it was one.
    Leave { breaks: usize, item: bool },
}

impl TextWriter {
    fn render(&mut self, tree: &Tree, nodes: &[NodeId]) {
        let mut stack: Vec<Step> = nodes.iter().rev().map(|&id| Step::Enter(id, None)).collect();

        while let Some(step) = stack.pop() {
            let (id, marker) = match step {
                Step::Enter(id, marker) => (id, marker),
                Step::Leave { breaks, item } => {
                    if item {
                        self.marker = None;
                    }
                    self.request_breaks(breaks);
                    continue;
                }
            };

            let name = match tree.data(id) {
                NodeData::Text(text) => {
                    self.push_text(text);
                    continue;
                }
                NodeData::Element { name, .. } => name.as_str(),
            };

            let is_list = name == "ul" || name == "ol";
            let breaks = match name {
                "br" => {
                    self.line_break();
                    continue;
                }
                "ul" | "ol" | "li" => 1,
                _ if PARAGRAPH_TAGS.contains(&name) => 2,
                _ if LINE_TAGS.contains(&name) => 1,
                _ => 0,
            };
            let item = name == "li";

            self.request_breaks(breaks);
            if item {
                self.marker = Some(marker.unwrap_or_else(|| "- ".to_string()));
            }
            stack.push(Step::Leave { breaks, item });

            let children = tree.children(id);
            let mut number = children.iter().filter(|&&c| tree.is_tag(c, "li")).count();
            for &child in children.iter().rev() {
                let marker = if is_list && tree.is_tag(child, "li") {
                    let marker = if name == "ol" {
                        format!("{number}. ")
                    } else {
                        "- ".to_string()
                    };
                    number -= 1;
                    Some(marker)
                } else {
                    None
                };
                stack.push(Step::Enter(child, marker));
            }
        }
    }

    fn at_line_start(&self) -> bool {
        self.pending_breaks > 0 || self.out.is_empty() || self.out.ends_with('\n')
    }

    fn request_breaks(&mut self, n: usize) {
        if !self.out.is_empty() {
            self.pending_breaks = self.pending_breaks.max(n);
        }
    }

    fn line_break(&mut self) {
        if !self.out.is_empty() {
            self.pending_breaks += 1;
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut collapsed = collapse_whitespace(text);
        if self.at_line_start() {
            collapsed = collapsed.trim_start().to_string();
        }
        if collapsed.is_empty() {
            return;
        }
        if !self.out.is_empty() {
            for _ in 0..self.pending_breaks {
                self.out.push('\n');
            }
        }
        self.pending_breaks = 0;
        if let Some(marker) = self.marker.take() {
            self.out.push_str(&marker);
        }
        self.out.push_str(&collapsed);
    }

    fn finish(self) -> String {
        let mut text = String::with_capacity(self.out.len());
        let mut blank_run = 0;
        for line in self.out.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            text.push_str(line);
            text.push('\n');
        }
        text.trim().to_string()
    }
}

/// Collapse runs of whitespace (including non-breaking spaces) to one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn render(html: &str) -> String {
        render_plain_text(&dom::parse_fragment(html))
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(render("<p>one</p><p>two</p>"), "one\n\ntwo");
    }

    #[test]
    fn test_inline_formatting_is_flattened() {
        assert_eq!(
            render("<p>a <strong>bold</strong> and <em>it</em></p>"),
            "a bold and it"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(render("<p>a<br>b</p>"), "a\nb");
        assert_eq!(render("<p>a<br><br>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("<ul><li>x</li><li>y</li></ul>"), "- x\n- y");
        assert_eq!(render("<ol><li>x</li><li>y</li></ol>"), "1. x\n2. y");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(render("<div>  a \n\t b&nbsp;&nbsp;c </div>"), "a b c");
    }

    #[test]
    fn test_blank_lines_capped() {
        assert_eq!(render("<p>a</p><br><br><br><p>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_nested_lists_number_their_own_items() {
        assert_eq!(
            render("<ol><li>a<ul><li>b</li></ul></li><li>c</li></ol>"),
            "1. a\n- b\n2. c"
        );
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 3_000;
        let html = format!("{}x{}", "<blockquote>".repeat(depth), "</blockquote>".repeat(depth));
        assert_eq!(render(&html), "x");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(render_plain_text(&crate::tree::Tree::new()), "");
    }
}
