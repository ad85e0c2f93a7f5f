//! Style inspection and formatting inference.
//!
//! Pasted rich text usually carries emphasis in `style` attributes rather
//! than in `<b>`/`<i>` tags. This module turns those declarations into
//! [`Formatting`] signals that the normalizer uses to reclassify spans.
//!
//! The [`StyleInspector`] trait is the seam towards the host: a browser host
//! can answer with real computed styles, while [`InlineStyleInspector`]
//! derives both declared and inherited styles from the tree itself.

use std::collections::HashMap;

use crate::patterns::{IMPORTANT_FLAG, NUMERIC_WEIGHT, STYLE_DECLARATION};
use crate::tree::{NodeId, Tree};

/// Font weight at or above which text counts as bold.
pub const BOLD_WEIGHT_THRESHOLD: f32 = 600.0;

/// The style properties formatting inference looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProps {
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_decoration: Option<String>,
}

impl StyleProps {
    /// Parse the declarations of a `style` attribute. Later declarations win.
    #[must_use]
    pub fn parse(style: &str) -> Self {
        let mut props = Self::default();
        for caps in STYLE_DECLARATION.captures_iter(style) {
            let property = caps[1].to_ascii_lowercase();
            let value = IMPORTANT_FLAG.replace(caps[2].trim(), "").trim().to_ascii_lowercase();
            if value.is_empty() {
                continue;
            }
            match property.as_str() {
                "font-weight" => props.font_weight = Some(value),
                "font-style" => props.font_style = Some(value),
                "text-decoration" | "text-decoration-line" => props.text_decoration = Some(value),
                _ => {}
            }
        }
        props
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.font_weight.is_none() && self.font_style.is_none() && self.text_decoration.is_none()
    }

    /// Fill properties missing from `self` with those of `parent`.
    #[must_use]
    pub fn inherit_from(mut self, parent: &StyleProps) -> Self {
        if self.font_weight.is_none() {
            self.font_weight.clone_from(&parent.font_weight);
        }
        if self.font_style.is_none() {
            self.font_style.clone_from(&parent.font_style);
        }
        if self.text_decoration.is_none() {
            self.text_decoration.clone_from(&parent.text_decoration);
        }
        self
    }
}

/// Boolean emphasis signals inferred for one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Formatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Formatting {
    #[must_use]
    pub fn from_props(props: &StyleProps) -> Self {
        Self {
            bold: props.font_weight.as_deref().is_some_and(is_bold_weight),
            italic: props.font_style.as_deref().is_some_and(is_italic_style),
            underline: props
                .text_decoration
                .as_deref()
                .is_some_and(|d| d.split_whitespace().any(|part| part == "underline")),
        }
    }

    /// Signals present in either operand.
    #[must_use]
    pub fn union(self, other: Formatting) -> Self {
        Self {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }
}

/// `bold`, `bolder`, or a numeric weight of at least 600.
#[must_use]
pub fn is_bold_weight(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("bold") || value.eq_ignore_ascii_case("bolder") {
        return true;
    }
    NUMERIC_WEIGHT.is_match(value)
        && value
            .parse::<f32>()
            .is_ok_and(|w| w >= BOLD_WEIGHT_THRESHOLD)
}

/// `italic` or `oblique` (with an optional angle).
#[must_use]
pub fn is_italic_style(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value == "italic" || value.starts_with("oblique")
}

/// Host-side source of style information for an element.
pub trait StyleInspector {
    /// Styles declared directly on the element (its `style` attribute).
    fn declared(&self, tree: &Tree, id: NodeId) -> StyleProps;

    /// Effective styles after the cascade, when the host can compute them.
    fn computed(&self, _tree: &Tree, _id: NodeId) -> Option<StyleProps> {
        None
    }
}

/// Inspector that reads `style` attributes from the tree.
///
/// Declared styles are read live. Effective styles come from a snapshot
/// taken with [`InlineStyleInspector::capture`] before any attribute is
/// stripped; each element inherits weight, style and decoration from the
/// nearest ancestor that declares them.
#[derive(Debug, Clone, Default)]
pub struct InlineStyleInspector {
    effective: HashMap<NodeId, StyleProps>,
}

impl InlineStyleInspector {
    /// Inspector without an inheritance snapshot (declared styles only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the effective style of every element currently in `tree`.
    #[must_use]
    pub fn capture(tree: &Tree) -> Self {
        let mut effective = HashMap::new();
        let inherited = StyleProps::default();
        let mut stack: Vec<(NodeId, StyleProps)> = tree
            .children(tree.root())
            .iter()
            .rev()
            .map(|&c| (c, inherited.clone()))
            .collect();

        while let Some((id, parent_style)) = stack.pop() {
            if !tree.is_element(id) {
                continue;
            }
            let own = declared_style(tree, id).inherit_from(&parent_style);
            for &child in tree.children(id).iter().rev() {
                stack.push((child, own.clone()));
            }
            if !own.is_empty() {
                effective.insert(id, own);
            }
        }

        Self { effective }
    }
}

impl StyleInspector for InlineStyleInspector {
    fn declared(&self, tree: &Tree, id: NodeId) -> StyleProps {
        declared_style(tree, id)
    }

    fn computed(&self, _tree: &Tree, id: NodeId) -> Option<StyleProps> {
        self.effective.get(&id).cloned()
    }
}

fn declared_style(tree: &Tree, id: NodeId) -> StyleProps {
    tree.attr(id, "style").map(StyleProps::parse).unwrap_or_default()
}

/// Combine declared and (optionally) computed signals for one element.
pub fn infer_formatting<S: StyleInspector + ?Sized>(
    inspector: &S,
    tree: &Tree,
    id: NodeId,
    use_computed: bool,
) -> Formatting {
    let declared = Formatting::from_props(&inspector.declared(tree, id));
    if !use_computed {
        return declared;
    }
    match inspector.computed(tree, id) {
        Some(computed) => declared.union(Formatting::from_props(&computed)),
        None => declared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_with_style(style: &str) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let span = tree.new_element("span");
        tree.set_attr(span, "style", style);
        tree.append_child(tree.root(), span);
        (tree, span)
    }

    #[test]
    fn test_is_bold_weight() {
        assert!(is_bold_weight("bold"));
        assert!(is_bold_weight("BOLDER"));
        assert!(is_bold_weight("600"));
        assert!(is_bold_weight("700"));
        assert!(!is_bold_weight("599"));
        assert!(!is_bold_weight("400"));
        assert!(!is_bold_weight("normal"));
        assert!(!is_bold_weight("lighter"));
    }

    #[test]
    fn test_parse_google_docs_style() {
        let props = StyleProps::parse(
            "font-size:11pt;font-family:Arial;color:#000000;font-weight:700;font-style:normal;\
             text-decoration:none;vertical-align:baseline;white-space:pre;",
        );
        assert_eq!(props.font_weight.as_deref(), Some("700"));
        assert_eq!(props.font_style.as_deref(), Some("normal"));
        assert_eq!(props.text_decoration.as_deref(), Some("none"));
    }

    #[test]
    fn test_parse_last_declaration_wins_and_important_ignored() {
        let props = StyleProps::parse("font-style:normal; FONT-STYLE: Italic !important");
        assert_eq!(props.font_style.as_deref(), Some("italic"));
    }

    #[test]
    fn test_formatting_from_props() {
        let props = StyleProps::parse("text-decoration: underline line-through; font-style: oblique 10deg");
        let f = Formatting::from_props(&props);
        assert!(!f.bold);
        assert!(f.italic);
        assert!(f.underline);
    }

    #[test]
    fn test_declared_only_inspector() {
        let (tree, span) = span_with_style("font-weight:bold");
        let f = infer_formatting(&InlineStyleInspector::new(), &tree, span, true);
        assert!(f.bold);
        assert!(!f.italic);
    }

    #[test]
    fn test_capture_inherits_from_styled_ancestor() {
        let mut tree = Tree::new();
        let p = tree.new_element("p");
        let span = tree.new_element("span");
        tree.set_attr(p, "style", "font-style:italic");
        tree.append_child(tree.root(), p);
        tree.append_child(p, span);

        let inspector = InlineStyleInspector::capture(&tree);
        assert!(infer_formatting(&inspector, &tree, span, true).italic);
        assert!(!infer_formatting(&inspector, &tree, span, false).italic);
    }

    #[test]
    fn test_declared_normal_overrides_inherited_bold() {
        let mut tree = Tree::new();
        let div = tree.new_element("div");
        let span = tree.new_element("span");
        tree.set_attr(div, "style", "font-weight:700");
        tree.set_attr(span, "style", "font-weight:400");
        tree.append_child(tree.root(), div);
        tree.append_child(div, span);

        let inspector = InlineStyleInspector::capture(&tree);
        assert!(!infer_formatting(&inspector, &tree, span, true).bold);
    }
}
