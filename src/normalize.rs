//! Element normalization.
//!
//! Walks the tree with an explicit worklist and rewrites each element into
//! the allowed vocabulary. Per element, in order:
//!
//! 1. Infer bold/italic/underline from declared and effective style.
//! 2. Strip `style`, `id`, `class` and `dir`.
//! 3. A `span` without a formatting descendant becomes `strong`, `em` or `u`
//!    (first true signal in that order) or is unwrapped.
//! 4. `b`/`strong` become a fresh `strong`, `i`/`em` a fresh `em`.
//! 5. Anything outside the allow-list is unwrapped.
//! 6. Anchors keep only `href`.
//! 7. Children are queued.
//!
//! Unwrapped elements hand their children back to the worklist at their new
//! position; substituted elements continue with steps 5-7 in the same
//! iteration. Each node is queued at most once, so the walk terminates on
//! any input, including arbitrarily nested spans.

use log::trace;

use crate::options::Options;
use crate::style::{infer_formatting, Formatting, StyleInspector};
use crate::tags::{canonical_formatting, is_formatting_tag, Tag};
use crate::tree::{NodeId, Tree};

/// Attributes removed from every element.
pub const PRESENTATIONAL_ATTRIBUTES: [&str; 4] = ["style", "id", "class", "dir"];

/// Counters reported by [`normalize_elements`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct NormalizeStats {
    /// Spans or synonyms replaced by a canonical formatting element.
    pub rewritten: usize,
    /// Elements unwrapped (children kept).
    pub unwrapped: usize,
    /// Elements removed together with their content.
    pub dropped: usize,
}

/// Normalize every element below the fragment root.
pub fn normalize_elements<S: StyleInspector + ?Sized>(
    tree: &mut Tree,
    options: &Options,
    inspector: &S,
) -> NormalizeStats {
    let mut stats = NormalizeStats::default();
    let mut worklist: Vec<NodeId> = tree.children(tree.root()).iter().rev().copied().collect();

    while let Some(id) = worklist.pop() {
        let Some(name) = tree.tag(id).map(str::to_string) else {
            continue;
        };

        if options.drops_content(&name) {
            trace!(target: "cleanpaste::normalize", "dropping <{name}> with content");
            tree.detach(id);
            stats.dropped += 1;
            continue;
        }

        // Must be captured before the style attribute goes away.
        let formatting = if name == "span" {
            infer_formatting(inspector, tree, id, options.use_computed_style)
        } else {
            Formatting::default()
        };

        strip_presentational_attributes(tree, id);

        let (current, tag) = if name == "span" && !has_formatting_descendant(tree, id) {
            match span_replacement(tree, id, formatting) {
                Some(tag) => {
                    trace!(target: "cleanpaste::normalize", "span -> <{tag}>");
                    stats.rewritten += 1;
                    (tree.replace_with_element(id, tag.as_str()), Some(tag))
                }
                None => {
                    unwrap_into(tree, id, &mut worklist);
                    stats.unwrapped += 1;
                    continue;
                }
            }
        } else if let Some(tag) = canonical_formatting(&name) {
            stats.rewritten += 1;
            (tree.replace_with_element(id, tag.as_str()), Some(tag))
        } else {
            (id, Tag::from_name(&name))
        };

        let Some(tag) = tag.filter(|t| options.allowed_tags.contains(*t)) else {
            trace!(target: "cleanpaste::normalize", "unwrapping <{name}>");
            unwrap_into(tree, current, &mut worklist);
            stats.unwrapped += 1;
            continue;
        };

        if tag == Tag::A {
            scrub_anchor(tree, current);
        }

        worklist.extend(tree.children(current).iter().rev().copied());
    }

    stats
}

/// Remove `style`, `id`, `class` and `dir` from one element.
pub fn strip_presentational_attributes(tree: &mut Tree, id: NodeId) {
    for attr in PRESENTATIONAL_ATTRIBUTES {
        tree.remove_attr(id, attr);
    }
}

/// Drop every attribute of an anchor except its link target.
pub fn scrub_anchor(tree: &mut Tree, id: NodeId) {
    let href = tree.attr(id, "href").map(str::to_string);
    tree.clear_attrs(id);
    if let Some(href) = href {
        tree.set_attr(id, "href", &href);
    }
}

fn has_formatting_descendant(tree: &Tree, id: NodeId) -> bool {
    tree.has_descendant_tag(id, is_formatting_tag)
}

/// Pick the canonical tag for a span, bold before italic before underline.
///
/// A signal already provided by an enclosing `strong`, `em` or `u` does not
/// count, so inherited styles never produce nested duplicates.
fn span_replacement(tree: &Tree, id: NodeId, formatting: Formatting) -> Option<Tag> {
    let inside = |tag: Tag| tree.ancestors(id).any(|a| tree.is_tag(a, tag.as_str()));

    if formatting.bold && !inside(Tag::Strong) {
        Some(Tag::Strong)
    } else if formatting.italic && !inside(Tag::Em) {
        Some(Tag::Em)
    } else if formatting.underline && !inside(Tag::U) {
        Some(Tag::U)
    } else {
        None
    }
}

fn unwrap_into(tree: &mut Tree, id: NodeId, worklist: &mut Vec<NodeId>) {
    let moved = tree.unwrap(id);
    worklist.extend(moved.into_iter().rev());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::style::InlineStyleInspector;

    fn run(html: &str) -> String {
        run_with(html, &Options::default())
    }

    fn run_with(html: &str, opts: &Options) -> String {
        let mut tree = dom::parse_fragment(html);
        let inspector = InlineStyleInspector::capture(&tree);
        normalize_elements(&mut tree, opts, &inspector);
        dom::serialize(&tree)
    }

    #[test]
    fn test_bold_span_becomes_strong() {
        assert_eq!(run(r#"<span style="font-weight:700">Hi</span>"#), "<strong>Hi</strong>");
    }

    #[test]
    fn test_italic_and_underline_spans() {
        assert_eq!(run(r#"<span style="font-style:italic">a</span>"#), "<em>a</em>");
        assert_eq!(run(r#"<span style="text-decoration:underline">a</span>"#), "<u>a</u>");
    }

    #[test]
    fn test_precedence_bold_over_italic_over_underline() {
        let html = r#"<span style="font-weight:bold;font-style:italic;text-decoration:underline">a</span>"#;
        assert_eq!(run(html), "<strong>a</strong>");

        let html = r#"<span style="font-style:italic;text-decoration:underline">a</span>"#;
        assert_eq!(run(html), "<em>a</em>");
    }

    #[test]
    fn test_plain_span_is_unwrapped_and_children_processed() {
        let html = r#"<p><span style="color:red">x <b class="k">y</b></span></p>"#;
        assert_eq!(run(html), "<p>x <strong>y</strong></p>");
    }

    #[test]
    fn test_span_with_formatting_descendant_falls_to_allow_list() {
        let html = r#"<span style="font-weight:700">a <i>b</i></span>"#;
        assert_eq!(run(html), "a <em>b</em>");
    }

    #[test]
    fn test_legacy_tags_canonicalized() {
        assert_eq!(run(r#"<b id="x">a</b><i>b</i>"#), "<strong>a</strong><em>b</em>");
        assert_eq!(run(r#"<strong data-x="1">a</strong>"#), "<strong>a</strong>");
    }

    #[test]
    fn test_disallowed_tags_unwrapped() {
        let html = "<table><tr><td>cell</td></tr></table><h2>Title</h2>";
        assert_eq!(run(html), "cellTitle");
    }

    #[test]
    fn test_extended_allow_list_keeps_headings() {
        let html = r#"<h2 dir="ltr" style="x">Title</h2><blockquote>q</blockquote>"#;
        assert_eq!(
            run_with(html, &Options::extended()),
            "<h2>Title</h2><blockquote>q</blockquote>"
        );
    }

    #[test]
    fn test_anchor_keeps_only_href() {
        let html = r#"<a href="https://example.com" target="_blank" style="color:blue" rel="x">l</a>"#;
        assert_eq!(run(html), r#"<a href="https://example.com">l</a>"#);
        assert_eq!(run(r#"<a name="top" id="t">l</a>"#), "<a>l</a>");
    }

    #[test]
    fn test_presentational_attributes_stripped() {
        let html = r#"<p dir="ltr" style="margin:0" id="p1" class="c2" role="note">t</p>"#;
        assert_eq!(run(html), r#"<p role="note">t</p>"#);
    }

    #[test]
    fn test_script_and_style_dropped_with_content() {
        let html = "<div>a<style>p{color:red}</style><script>alert(1)</script>b</div>";
        assert_eq!(run(html), "<div>ab</div>");
    }

    #[test]
    fn test_inherited_style_reclassifies_child_span() {
        let html = r#"<p style="font-weight:700"><span>bold</span></p>"#;
        assert_eq!(run(html), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn test_inherited_signal_inside_same_tag_is_not_duplicated() {
        let html = r#"<span style="font-weight:700">a<span>b</span></span>"#;
        assert_eq!(run(html), "<strong>ab</strong>");
    }

    #[test]
    fn test_deeply_nested_spans_terminate() {
        let depth = 2_000;
        let html = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));
        assert_eq!(run(&html), "x");
    }

    #[test]
    fn test_stats_are_counted() {
        let mut tree = dom::parse_fragment(
            r#"<b>a</b><span>b</span><font>c</font><script>d</script>"#,
        );
        let stats = normalize_elements(&mut tree, &Options::default(), &InlineStyleInspector::new());
        assert_eq!(
            stats,
            NormalizeStats {
                rewritten: 1,
                unwrapped: 2,
                dropped: 1
            }
        );
    }
}
