//! DOM node collections
//!
//! Traversal, attributes, content, style and class operations over a
//! [`Selection`]. Mutators return the selection for chaining; readers return
//! a [`Normalized`] value.

use fos_dom::{NodeId, Window};
use indexmap::IndexMap;

use crate::ops::{ClassOp, ContentKind, Position, TargetOps};
use crate::vendor::VendorMap;
use crate::{Normalized, QueryError, QueryResult, Selection};

/// Content accepted by `prepend`/`append`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Raw markup, concatenated with the existing markup
    Markup(String),
    /// A node cloned once per target
    Node(NodeId),
    /// Nodes cloned once per target, in order
    Nodes(Vec<NodeId>),
}

impl From<&str> for Content {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

impl From<String> for Content {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl From<NodeId> for Content {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&Selection> for Content {
    fn from(selection: &Selection) -> Self {
        Self::Nodes(selection.targets().to_vec())
    }
}

/// Visibility toggle for [`Selection::visible`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

/// Write `declarations` to one node, fanning registry properties out to
/// their prefixed spellings
pub(crate) fn write_declarations<K: AsRef<str>, V: AsRef<str>>(
    ops: &dyn TargetOps,
    window: &Window,
    vendor: &VendorMap,
    node: NodeId,
    declarations: &[(K, V)],
) -> QueryResult<()> {
    for (property, value) in declarations {
        for name in vendor.property_names(property.as_ref()) {
            ops.set_style(window, node, &name, value.as_ref())?;
        }
    }
    Ok(())
}

impl Selection {
    pub(crate) fn window(&self) -> &Window {
        self.query().window()
    }

    pub(crate) fn ops(&self) -> &dyn TargetOps {
        self.query().ops()
    }

    // === Traversal ===

    /// Descendants of every target matching `selector`, concatenated in
    /// target order
    pub fn find(&self, selector: &str) -> QueryResult<Selection> {
        let mut found = Vec::new();
        for &node in self.iter() {
            found.extend(self.ops().query_all(self.window(), node, selector)?);
        }
        Ok(self.derive(found))
    }

    /// Parent of every target. With a selector, each target's result is the
    /// first ancestor whose own parent has a descendant matching it.
    pub fn parent(&self, selector: Option<&str>) -> QueryResult<Selection> {
        let (window, ops) = (self.window(), self.ops());
        let mut parents = Vec::with_capacity(self.len());
        for &node in self.iter() {
            let mut current = ops.parent(window, node).ok_or(QueryError::Orphan(node))?;
            if let Some(selector) = selector {
                loop {
                    let Some(above) = ops.parent(window, current) else {
                        return Err(QueryError::NoMatchingAncestor {
                            selector: selector.to_string(),
                        });
                    };
                    if ops.query_first(window, above, selector)?.is_some() {
                        break;
                    }
                    current = above;
                }
            }
            parents.push(current);
        }
        Ok(self.derive(parents))
    }

    // === Attributes and data ===

    pub fn attr(&self, name: &str) -> Normalized<Option<String>> {
        self.normalize(|&node| self.ops().attribute(self.window(), node, name))
    }

    /// Set `name` on every target; an empty value writes nothing
    pub fn set_attr(&self, name: &str, value: &str) -> QueryResult<&Self> {
        if name.is_empty() || value.is_empty() {
            return Ok(self);
        }
        self.try_each(|&node, _| self.ops().set_attribute(self.window(), node, name, value))
    }

    /// Dataset entry `key` (camelCase) of every target
    pub fn data(&self, key: &str) -> Normalized<Option<String>> {
        self.normalize(|&node| self.ops().data(self.window(), node, key))
    }

    pub fn set_data(&self, key: &str, value: &str) -> QueryResult<&Self> {
        if key.is_empty() || value.is_empty() {
            return Ok(self);
        }
        self.try_each(|&node, _| self.ops().set_data(self.window(), node, key, value))
    }

    /// Snapshot of every dataset entry, per target
    pub fn dataset(&self) -> Normalized<IndexMap<String, String>> {
        self.normalize(|&node| self.ops().dataset(self.window(), node))
    }

    // === Form values ===

    pub fn val(&self) -> Normalized<Option<String>> {
        self.normalize(|&node| self.ops().value(self.window(), node))
    }

    pub fn set_val(&self, value: &str) -> QueryResult<&Self> {
        if value.is_empty() {
            return Ok(self);
        }
        self.try_each(|&node, _| self.ops().set_value(self.window(), node, value))
    }

    // === Content ===

    pub fn content(&self, kind: ContentKind) -> Normalized<String> {
        self.normalize(|&node| self.ops().content(self.window(), node, kind))
    }

    pub fn set_content(&self, kind: ContentKind, value: &str) -> QueryResult<&Self> {
        self.try_each(|&node, _| self.ops().set_content(self.window(), node, kind, value))
    }

    /// Read a content channel by name (`html`, `text`, `innerHTML`, `textContent`)
    pub fn content_named(&self, channel: &str) -> QueryResult<Normalized<String>> {
        Ok(self.content(channel_kind(channel)?))
    }

    pub fn set_content_named(&self, channel: &str, value: &str) -> QueryResult<&Self> {
        self.set_content(channel_kind(channel)?, value)
    }

    pub fn html(&self) -> Normalized<String> {
        self.content(ContentKind::Html)
    }

    pub fn set_html(&self, markup: &str) -> QueryResult<&Self> {
        self.set_content(ContentKind::Html, markup)
    }

    pub fn text(&self) -> Normalized<String> {
        self.content(ContentKind::Text)
    }

    pub fn set_text(&self, text: &str) -> QueryResult<&Self> {
        self.set_content(ContentKind::Text, text)
    }

    pub fn prepend(&self, content: impl Into<Content>) -> QueryResult<&Self> {
        self.insert(content.into(), Position::Start)
    }

    pub fn append(&self, content: impl Into<Content>) -> QueryResult<&Self> {
        self.insert(content.into(), Position::End)
    }

    fn insert(&self, content: Content, position: Position) -> QueryResult<&Self> {
        let (window, ops) = (self.window(), self.ops());
        match content {
            Content::Markup(markup) => self.try_each(|&node, _| {
                let existing = ops.content(window, node, ContentKind::Html);
                let combined = match position {
                    Position::Start => markup.clone() + &existing,
                    Position::End => existing + &markup,
                };
                ops.set_content(window, node, ContentKind::Html, &combined)
            }),
            Content::Node(source) => {
                self.try_each(|&node, _| ops.insert_clone(window, node, source, position))
            }
            Content::Nodes(sources) => self.try_each(|&node, _| {
                // Prepending one at a time reverses, so walk backwards
                let ordered: Box<dyn Iterator<Item = &NodeId>> = match position {
                    Position::Start => Box::new(sources.iter().rev()),
                    Position::End => Box::new(sources.iter()),
                };
                for &source in ordered {
                    ops.insert_clone(window, node, source, position)?;
                }
                Ok(())
            }),
        }
    }

    /// Remove every target from its parent; the selection keeps them
    pub fn detach(&self) -> QueryResult<&Self> {
        self.try_each(|&node, _| self.ops().detach(self.window(), node))
    }

    // === Style ===

    /// Set inline declarations (CSSOM names) on every target
    pub fn css<K: AsRef<str>, V: AsRef<str>>(&self, declarations: &[(K, V)]) -> QueryResult<&Self> {
        let vendor = self.query().config().vendor;
        self.try_each(|&node, _| {
            write_declarations(self.ops(), self.window(), vendor, node, declarations)
        })
    }

    /// Computed `property` of the first target only
    pub fn style(&self, property: &str) -> QueryResult<String> {
        let node = *self.require("style")?;
        Ok(self.ops().computed_style(self.window(), node, property))
    }

    /// Computed `property` of every target
    pub fn styles(&self, property: &str) -> Normalized<String> {
        self.normalize(|&node| self.ops().computed_style(self.window(), node, property))
    }

    pub fn visible(&self, visibility: Visibility) -> QueryResult<&Self> {
        let (window, ops) = (self.window(), self.ops());
        match visibility {
            Visibility::Hidden => self.try_each(|&node, _| {
                let display = ops.computed_style(window, node, "display");
                if display != "none" {
                    ops.set_remembered_display(window, node, Some(&display))?;
                }
                ops.set_style(window, node, "display", "none")
            }),
            Visibility::Shown => self.try_each(|&node, _| {
                if ops.computed_style(window, node, "display") != "none" {
                    return Ok(());
                }
                match ops.remembered_display(window, node) {
                    Some(display) => {
                        ops.set_style(window, node, "display", &display)?;
                        ops.set_remembered_display(window, node, None)
                    }
                    None => {
                        let fallback = &self.query().config().fallback_display;
                        ops.set_style(window, node, "display", fallback)
                    }
                }
            }),
        }
    }

    pub fn hide(&self) -> QueryResult<&Self> {
        self.visible(Visibility::Hidden)
    }

    pub fn show(&self) -> QueryResult<&Self> {
        self.visible(Visibility::Shown)
    }

    // === Classes ===

    fn modify_classes<'n>(&self, names: &'n str, op: impl Fn(&'n str) -> ClassOp<'n>) -> QueryResult<&Self> {
        self.try_each(|&node, _| {
            for name in names.split_whitespace() {
                self.ops().modify_class(self.window(), node, op(name))?;
            }
            Ok(())
        })
    }

    /// Add every space-separated class in `names`
    pub fn add_class(&self, names: &str) -> QueryResult<&Self> {
        self.modify_classes(names, ClassOp::Add)
    }

    /// Remove the listed classes, or every class when `names` is `None`
    pub fn remove_class(&self, names: Option<&str>) -> QueryResult<&Self> {
        match names {
            Some(names) => self.modify_classes(names, ClassOp::Remove),
            None => self.try_each(|&node, _| self.ops().modify_class(self.window(), node, ClassOp::Clear)),
        }
    }

    pub fn toggle_class(&self, names: &str) -> QueryResult<&Self> {
        self.modify_classes(names, ClassOp::Toggle)
    }

    /// Clear every class, then add `names`
    pub fn replace_class(&self, names: &str) -> QueryResult<&Self> {
        self.remove_class(None)?.add_class(names)
    }

    /// True when at least one target has `name`
    pub fn has_class(&self, name: &str) -> bool {
        self.iter().any(|&node| self.ops().has_class(self.window(), node, name))
    }
}

fn channel_kind(channel: &str) -> QueryResult<ContentKind> {
    ContentKind::from_name(channel).ok_or_else(|| QueryError::UnsupportedChannel(channel.to_string()))
}
