//! Edge case tests for fos-dom

use fos_dom::{
    css_to_property_name, property_to_css_name, to_attribute_name, to_dataset_key, Document,
    DomError, Event, EventListener, NodeId, SelectorError, SelectorList, Window,
};

// ============================================================================
// INVALID SELECTORS
// ============================================================================

#[test]
fn test_selector_errors() {
    for bad in ["", "div[", "p:nth-child(", "a >", ",p", "::after", "p:unknown"] {
        assert!(SelectorList::parse(bad).is_err(), "{bad:?} should not parse");
    }
    let doc = Document::new("about:blank");
    assert!(doc.query_selector_all(NodeId::ROOT, "p[").is_err());
    assert_eq!(SelectorList::parse("  "), Err(SelectorError::Empty));
}

#[test]
fn test_selector_whitespace_tolerance() {
    let list = SelectorList::parse("  div  >  p ,span ").unwrap();
    assert_eq!(list.selectors().len(), 2);
}

// ============================================================================
// DETACHED AND MISSING NODES
// ============================================================================

#[test]
fn test_detach_unparented_node() {
    let mut doc = Document::new("about:blank");
    let orphan = doc.create_element("div");
    assert!(matches!(doc.tree_mut().detach(orphan), Err(DomError::NoParent(_))));
}

#[test]
fn test_missing_node_lookups() {
    let mut doc = Document::new("about:blank");
    assert_eq!(doc.get_attribute(NodeId::NONE, "id"), None);
    assert_eq!(doc.computed_style(NodeId::NONE, "display"), "");
    assert_eq!(doc.tree().text_content(NodeId::NONE), "");
    assert!(doc.set_attribute(NodeId::NONE, "id", "x").is_err());
    assert!(doc.tree_mut().clone_node(NodeId::NONE, true).is_err());
}

#[test]
fn test_attributes_on_text_node() {
    let mut doc = Document::new("about:blank");
    let text = doc.create_text("hi");
    assert!(matches!(doc.set_attribute(text, "id", "x"), Err(DomError::NotAnElement(_))));
    assert!(doc.class_list(text).is_none());
    assert!(doc.dataset(text).is_empty());
    assert_eq!(doc.value(text), None);
}

#[test]
fn test_detached_subtree_not_matched_from_root() {
    let mut doc = Document::new("about:blank");
    let div = doc.create_element("div");
    doc.set_attribute(div, "class", "loose").unwrap();
    assert!(doc.query_selector(NodeId::ROOT, ".loose").unwrap().is_none());
    assert!(doc.get_element_by_id("nope").is_none());
}

#[test]
fn test_context_on_non_canvas() {
    let mut doc = Document::new("about:blank");
    let body = doc.body();
    assert!(matches!(doc.context_2d(body), Err(DomError::NotACanvas(_))));
}

#[test]
fn test_canvas_bad_dimensions_fall_back() {
    let mut doc = Document::new("about:blank");
    let canvas = doc.create_element("canvas");
    doc.set_attribute(canvas, "width", "wide").unwrap();
    doc.set_attribute(canvas, "height", "-4").unwrap();
    let ctx = doc.context_2d(canvas).unwrap();
    assert_eq!((ctx.borrow().width(), ctx.borrow().height()), (300, 150));
}

// ============================================================================
// NAME CONVERSIONS
// ============================================================================

#[test]
fn test_property_name_conversions() {
    assert_eq!(css_to_property_name("border-bottom-width"), "borderBottomWidth");
    assert_eq!(css_to_property_name("-webkit-transform"), "webkitTransform");
    assert_eq!(css_to_property_name("-moz-transition"), "MozTransition");
    assert_eq!(css_to_property_name("color"), "color");
    assert_eq!(property_to_css_name("borderBottomWidth"), "border-bottom-width");
    assert_eq!(property_to_css_name("webkitTransform"), "-webkit-transform");
}

#[test]
fn test_dataset_name_conversions() {
    assert_eq!(to_attribute_name("fooBarBaz"), "data-foo-bar-baz");
    assert_eq!(to_dataset_key("data-foo-bar"), Some("fooBar".to_string()));
    assert_eq!(to_dataset_key("title"), None);
}

// ============================================================================
// INLINE STYLE
// ============================================================================

#[test]
fn test_inline_style_attribute_parsed() {
    let mut doc = Document::new("about:blank");
    let div = doc.create_element("div");
    doc.set_attribute(div, "style", "color: red; margin-left : 3px;;").unwrap();
    let style = doc.inline_style(div).unwrap();
    assert_eq!(style.get_property("color"), Some("red"));
    assert_eq!(style.get_property("marginLeft"), Some("3px"));
}

#[test]
fn test_inline_style_empty_value_removes() {
    let mut doc = Document::new("about:blank");
    let div = doc.create_element("div");
    doc.set_style_property(div, "opacity", "0.2").unwrap();
    doc.set_style_property(div, "opacity", "").unwrap();
    assert_eq!(doc.inline_style(div).unwrap().get_property("opacity"), None);
}

// ============================================================================
// EVENTS AND TIMERS
// ============================================================================

#[test]
fn test_dispatch_on_detached_node() {
    let mut doc = Document::new("about:blank");
    let div = doc.create_element("div");
    let window = Window::new(doc);
    let hits = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = hits.clone();
    window.add_event_listener(div, "x", EventListener::new(move |_| counter.set(counter.get() + 1)), false);
    assert!(window.dispatch_event(div, &Event::new("x")));
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_listener_on_missing_node_rejected() {
    let window = Window::new(Document::new("about:blank"));
    assert!(!window.add_event_listener(NodeId::NONE, "x", EventListener::new(|_| {}), false));
}

#[test]
fn test_zero_delay_timer_waits_for_tick() {
    let window = Window::new(Document::new("about:blank"));
    let fired = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = fired.clone();
    window.set_timeout(move || flag.set(true), 0);
    assert!(!fired.get());
    assert_eq!(window.advance(0), 1);
    assert!(fired.get());
}

#[test]
fn test_weak_window_after_drop() {
    let window = Window::new(Document::new("about:blank"));
    let weak = window.downgrade();
    assert!(weak.upgrade().is_some_and(|w| w.ptr_eq(&window)));
    drop(window);
    assert!(weak.upgrade().is_none());
}
