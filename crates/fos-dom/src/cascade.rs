//! Style cascade
//!
//! Resolves the computed value of one property for one element:
//! `!important` author rules, then inline style, then author rules by
//! specificity and source order, then the parent's value for inherited
//! properties, then user-agent defaults.

use crate::{css_to_property_name, DomTree, NodeId, SelectorList, Specificity};

/// Properties that inherit from the parent element when not set
const INHERITED: &[&str] = &[
    "color",
    "cursor",
    "direction",
    "font",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontVariant",
    "fontWeight",
    "letterSpacing",
    "lineHeight",
    "listStyle",
    "textAlign",
    "textIndent",
    "textTransform",
    "visibility",
    "whiteSpace",
    "wordSpacing",
];

/// Initial values for the properties callers commonly read back
const INITIAL: &[(&str, &str)] = &[
    ("color", "rgb(0, 0, 0)"),
    ("fontStyle", "normal"),
    ("fontWeight", "400"),
    ("opacity", "1"),
    ("position", "static"),
    ("visibility", "visible"),
    ("float", "none"),
    ("transform", "none"),
];

/// One author declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// CSSOM (camelCase) property name
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// Author style rule from a stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
    /// Source position across all stylesheets of the document
    pub order: usize,
}

impl StyleRule {
    pub fn new(selectors: SelectorList, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
            order: 0,
        }
    }

    /// Add a declaration given its CSS or CSSOM name
    pub fn push(&mut self, name: &str, value: &str, important: bool) {
        self.declarations.push(Declaration {
            name: css_to_property_name(name),
            value: value.trim().to_string(),
            important,
        });
    }

    fn lookup(&self, property: &str, important: bool) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.name == property && d.important == important)
            .map(|d| d.value.as_str())
    }
}

/// Default `display` value for a tag
pub fn user_agent_display(tag: &str) -> &'static str {
    match tag {
        "html" | "body" | "div" | "p" | "article" | "section" | "header" | "footer" | "nav"
        | "main" | "aside" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "form" | "ul" | "ol"
        | "dl" | "dd" | "dt" | "blockquote" | "pre" | "hr" | "fieldset" | "figure"
        | "figcaption" | "address" | "details" | "legend" | "menu" => "block",
        "li" => "list-item",
        "summary" => "list-item",
        "table" => "table",
        "caption" => "table-caption",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "col" => "table-column",
        "colgroup" => "table-column-group",
        "input" | "button" | "select" | "textarea" => "inline-block",
        "head" | "script" | "style" | "title" | "meta" | "link" | "template" | "base"
        | "noscript" => "none",
        _ => "inline",
    }
}

/// Compute `property` for `node`; empty string when the node is not an element
pub(crate) fn computed_value(
    tree: &DomTree,
    rules: &[StyleRule],
    node: NodeId,
    property: &str,
) -> String {
    let property = css_to_property_name(property);
    resolve(tree, rules, node, &property)
}

fn resolve(tree: &DomTree, rules: &[StyleRule], node: NodeId, property: &str) -> String {
    let Some(elem) = tree.element(node) else {
        return String::new();
    };

    if let Some(value) = cascaded(tree, rules, node, property, true) {
        return value.to_string();
    }
    if let Some(value) = elem.style().get_property(property) {
        return value.to_string();
    }
    if let Some(value) = cascaded(tree, rules, node, property, false) {
        if value != "inherit" {
            return value.to_string();
        }
        return inherited(tree, rules, node, property);
    }

    if INHERITED.contains(&property) {
        return inherited(tree, rules, node, property);
    }
    if property == "display" {
        if elem.get_attribute("hidden").is_some() {
            return "none".to_string();
        }
        return user_agent_display(&elem.tag_name).to_string();
    }
    initial_value(property).to_string()
}

fn inherited(tree: &DomTree, rules: &[StyleRule], node: NodeId, property: &str) -> String {
    match tree.parent(node).filter(|&p| tree.is_element(p)) {
        Some(parent) => resolve(tree, rules, parent, property),
        None => initial_value(property).to_string(),
    }
}

fn initial_value(property: &str) -> &'static str {
    INITIAL
        .iter()
        .find(|(name, _)| *name == property)
        .map_or("", |(_, value)| value)
}

/// Winning author value: highest specificity, later rule on ties
fn cascaded<'r>(
    tree: &DomTree,
    rules: &'r [StyleRule],
    node: NodeId,
    property: &str,
    important: bool,
) -> Option<&'r str> {
    let mut best: Option<((Specificity, usize), &'r str)> = None;
    for rule in rules {
        let Some(value) = rule.lookup(property, important) else {
            continue;
        };
        let Some(specificity) = rule.selectors.matching_specificity(tree, node) else {
            continue;
        };
        let key = (specificity, rule.order);
        if best.is_none_or(|(current, _)| key >= current) {
            best = Some((key, value));
        }
    }
    best.map(|(_, value)| value)
}
