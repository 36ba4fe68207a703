//! Edge case tests for fos-query

use std::cell::RefCell;
use std::rc::Rc;

use fos_canvas::CanvasError;
use fos_dom::{DomError, Event, EventListener, NodeId, Window};
use fos_query::{
    ClassOp, ContentKind, Normalized, Query, QueryConfig, QueryError, SettingValue, TargetOps,
    TRANSITION_END, VendorMap,
};

fn page() -> Query {
    Query::from_html(
        r#"<div id="box"><p class="a b">one</p><p>two</p></div>
<canvas id="art" width="4" height="4"></canvas>
<canvas id="flat" width="0" height="8"></canvas>"#,
    )
    .unwrap()
}

// ============================================================================
// Empty selections
// ============================================================================

#[test]
fn test_empty_selection_readers() {
    let q = page();
    let none = q.select(".missing").unwrap();
    assert!(none.is_empty());
    assert_eq!(none.html(), Normalized::Many(vec![]));
    assert_eq!(none.attr("id"), Normalized::Many(vec![]));
    assert_eq!(none.styles("display"), Normalized::Many(vec![]));
    assert!(!none.has_class("a"));
}

#[test]
fn test_empty_selection_writers_are_no_ops() {
    let q = page();
    let none = q.select(".missing").unwrap();
    none.set_attr("title", "x")
        .unwrap()
        .css(&[("color", "red")])
        .unwrap()
        .add_class("c")
        .unwrap()
        .hide()
        .unwrap()
        .append("<b>x</b>")
        .unwrap()
        .detach()
        .unwrap();
    assert_eq!(none.find("p").unwrap().len(), 0);
    assert_eq!(none.parent(None).unwrap().len(), 0);
}

#[test]
fn test_null_targets_rejected() {
    let q = page();
    assert!(matches!(
        q.select(NodeId::NONE),
        Err(QueryError::Dom(DomError::NotFound(_)))
    ));
    assert!(q.select(vec![NodeId::NONE, NodeId::NONE]).is_err());

    // The document node itself is a valid target
    assert_eq!(q.select(NodeId::ROOT).unwrap().len(), 1);
}

#[test]
fn test_style_on_empty_selection() {
    let q = page();
    let err = q.select(".missing").unwrap().style("display").unwrap_err();
    assert!(matches!(err, QueryError::EmptySelection { operation: "style" }));
    assert!(matches!(
        q.select(".missing").unwrap().first(),
        Err(QueryError::EmptySelection { operation: "first" })
    ));
    assert!(matches!(
        q.select(".missing").unwrap().last(),
        Err(QueryError::EmptySelection { operation: "last" })
    ));
}

#[test]
fn test_transition_on_empty_selection() {
    let q = page();
    q.select(".missing")
        .unwrap()
        .transition(&[("opacity", "0")], &[], None)
        .unwrap();
    q.window().run_until_idle();
}

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn test_index_out_of_range() {
    let q = page();
    let ps = q.select("p").unwrap();
    assert!(matches!(ps.nth(Some(2)), Err(QueryError::IndexOutOfRange { index: 2, len: 2 })));
    assert!(matches!(ps.native(Some(5)), Err(QueryError::IndexOutOfRange { index: 5, len: 2 })));
    assert_eq!(ps.nth(None).unwrap(), ps);
    assert_eq!(ps.nth(Some(1)).unwrap().text(), Normalized::Single("two".into()));
}

#[test]
fn test_native_of_empty_selection() {
    let q = page();
    assert_eq!(q.select("h1").unwrap().native(None).unwrap(), Normalized::Many(vec![]));
}

// ============================================================================
// Falsy arguments
// ============================================================================

#[test]
fn test_empty_names_and_values_skip_writes() {
    let q = page();
    let p = q.select("p.a").unwrap();
    p.set_attr("", "x").unwrap().set_attr("title", "").unwrap();
    assert_eq!(p.attr("title"), Normalized::Single(None));

    p.set_data("", "x").unwrap();
    assert!(p.dataset().into_single().unwrap().is_empty());

    p.add_class("   ").unwrap();
    assert_eq!(p.attr("class"), Normalized::Single(Some("a b".into())));
}

#[test]
fn test_unsupported_content_channel() {
    let q = page();
    let p = q.select("p").unwrap();
    assert!(matches!(p.content_named("outerHTML"), Err(QueryError::UnsupportedChannel(c)) if c == "outerHTML"));
    assert!(p.set_content_named("value", "x").is_err());
    assert_eq!(
        p.content_named("textContent").unwrap(),
        p.content(ContentKind::Text)
    );
}

#[test]
fn test_remove_all_classes() {
    let q = page();
    let p = q.select("p.a").unwrap();
    p.remove_class(None).unwrap();
    assert!(!p.has_class("a"));
    assert!(!p.has_class("b"));
    p.replace_class("x y").unwrap();
    assert!(p.has_class("x") && p.has_class("y"));
}

// ============================================================================
// Tree errors
// ============================================================================

#[test]
fn test_parent_selector_without_match() {
    let q = page();
    let err = q.select("p").unwrap().parent(Some("section")).unwrap_err();
    assert!(matches!(err, QueryError::NoMatchingAncestor { ref selector } if selector == "section"));
}

#[test]
fn test_detached_node_has_no_parent() {
    let q = page();
    let p = q.select("p.a").unwrap();
    p.detach().unwrap();
    assert!(matches!(p.parent(None), Err(QueryError::Orphan(_))));
    assert!(p.detach().is_err());
}

#[test]
fn test_prepend_nodes_keep_order() {
    let q = page();
    let sources = q.select("p").unwrap();
    let target = q.select("#box").unwrap();
    target.prepend(&sources).unwrap();
    assert_eq!(
        q.select("#box p").unwrap().text(),
        Normalized::Many(vec!["one".into(), "two".into(), "one".into(), "two".into()])
    );
}

#[test]
fn test_invalid_selector_in_find() {
    let q = page();
    assert!(matches!(q.select("#box").unwrap().find("p["), Err(QueryError::Selector(_))));
}

// ============================================================================
// Canvas
// ============================================================================

#[test]
fn test_contexts_on_non_canvas() {
    let q = page();
    let err = q.select("#box").unwrap().contexts().unwrap_err();
    assert!(matches!(err, QueryError::NotACanvas(_)));
}

#[test]
fn test_zero_sized_canvas_export() {
    let q = page();
    let flat = q.select("#flat").unwrap().contexts().unwrap();
    assert_eq!(flat.to_data_url(None).unwrap(), Normalized::Single("data:,".into()));
    assert!(matches!(
        flat.to_blob(None),
        Err(QueryError::Canvas(CanvasError::EmptyCanvas { width: 0, height: 8 }))
    ));
}

#[test]
fn test_drawing_on_zero_sized_canvas() {
    let q = page();
    let flat = q.select("#flat").unwrap().contexts().unwrap();
    flat.begin_path().rect(0.0, 0.0, 2.0, 2.0).fill();
    assert!(flat.targets()[0].borrow().pixel(0, 0).is_none());
}

#[test]
fn test_setting_coercion() {
    let q = page();
    let art = q.select("#art").unwrap().contexts().unwrap();
    art.apply(&[
        ("lineWidth", SettingValue::from("3")),
        ("globalAlpha", SettingValue::from(true)),
        ("imageSmoothingEnabled", SettingValue::from(0.0)),
    ]);
    let settings = art.settings(Some(0)).unwrap().into_single().unwrap();
    assert_eq!(settings["lineWidth"], SettingValue::Number(3.0));
    assert_eq!(settings["globalAlpha"], SettingValue::Number(1.0));
    assert_eq!(settings["imageSmoothingEnabled"], SettingValue::Bool(false));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_normalized_serializes_untagged() {
    let q = page();
    let one = serde_json::to_value(q.select("p.a").unwrap().text()).unwrap();
    let many = serde_json::to_value(q.select("p").unwrap().text()).unwrap();
    assert_eq!(one, serde_json::json!("one"));
    assert_eq!(many, serde_json::json!(["one", "two"]));
}

#[test]
fn test_settings_serialize_as_object() {
    let q = page();
    let art = q.select("#art").unwrap().contexts().unwrap();
    art.apply(&[("fillStyle", "#00ff00")]);
    let json = serde_json::to_value(art.settings(None).unwrap()).unwrap();
    assert_eq!(json["lineWidth"], serde_json::json!(1.0));
    assert_eq!(json["lineCap"], serde_json::json!("butt"));
    assert!(json["fillStyle"].is_string());
}

// ============================================================================
// Configuration
// ============================================================================

static NO_PREFIXES: VendorMap = VendorMap {
    prefixes: &[],
    properties: &[],
    events: &[],
};

fn configured() -> Query {
    let base = page();
    let config = QueryConfig {
        vendor: &NO_PREFIXES,
        transition_delay_ms: 50,
        fallback_display: "flex".to_string(),
    };
    Query::with_config(base.window().clone(), config)
}

#[test]
fn test_custom_vendor_map() {
    let q = configured();
    let p = q.select("p.a").unwrap();
    p.css(&[("transform", "rotate(1deg)")]).unwrap();
    let node = p.targets()[0];
    let doc = q.window().document();
    let style = doc.inline_style(node).unwrap();
    assert_eq!(style.get_property("transform"), Some("rotate(1deg)"));
    assert_eq!(style.get_property("webkitTransform"), None);
    drop(doc);

    let listener = EventListener::new(|_| {});
    p.listen(TRANSITION_END, &listener, false);
    assert_eq!(q.window().document().listeners().count(node, None), 1);
}

#[test]
fn test_custom_transition_delay() {
    let q = configured();
    let p = q.select("p.a").unwrap();
    p.transition(&[("opacity", "0")], &[], None).unwrap();
    q.window().advance(49);
    assert_eq!(p.styles("opacity"), Normalized::Single("1".into()));
    q.window().advance(1);
    assert_eq!(p.styles("opacity"), Normalized::Single("0".into()));
}

#[test]
fn test_custom_fallback_display() {
    let q = configured();
    let p = q.select("p.a").unwrap();
    p.css(&[("display", "none")]).unwrap();
    p.show().unwrap();
    assert_eq!(p.style("display").unwrap(), "flex");
}

#[test]
fn test_transition_outlives_collection() {
    let q = page();
    let p = q.select("p.a").unwrap();
    let node = p.targets()[0];
    p.transition(&[("opacity", "0")], &[], None).unwrap();
    let window: Window = q.window().clone();
    drop(p);
    drop(q);
    window.run_until_idle();
    let doc = window.document();
    assert_eq!(doc.inline_style(node).unwrap().get_property("opacity"), Some("0"));
}

// ============================================================================
// Custom primitives
// ============================================================================

#[derive(Default)]
struct Recording {
    calls: Rc<RefCell<Vec<String>>>,
}

impl TargetOps for Recording {
    fn modify_class(&self, window: &Window, node: NodeId, op: ClassOp<'_>) -> fos_query::QueryResult<()> {
        self.calls.borrow_mut().push(format!("{op:?}"));
        fos_query::DefaultOps.modify_class(window, node, op)
    }

    fn set_style(&self, window: &Window, node: NodeId, property: &str, value: &str) -> fos_query::QueryResult<()> {
        self.calls.borrow_mut().push(format!("{property}={value}"));
        fos_query::DefaultOps.set_style(window, node, property, value)
    }
}

#[test]
fn test_custom_primitives_see_every_call() {
    let recording = Recording::default();
    let calls = recording.calls.clone();
    let q = page().with_ops(recording);

    let p = q.select("p").unwrap();
    p.add_class("x y").unwrap();
    p.css(&[("borderRadius", "2px")]).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.iter().filter(|c| c.starts_with("Add")).count(), 4);
    assert_eq!(calls.iter().filter(|c| c.ends_with("=2px")).count(), 2 * 5);
    assert!(p.has_class("y"));
}

#[test]
fn test_transition_uses_custom_primitives() {
    let recording = Recording::default();
    let calls = recording.calls.clone();
    let q = page().with_ops(recording);
    q.select("p.a").unwrap().transition(&[("opacity", "1")], &[], None).unwrap();
    assert!(calls.borrow().is_empty());
    q.window().run_until_idle();
    assert_eq!(calls.borrow().as_slice(), ["opacity=1"]);
}

#[test]
fn test_listener_removed_during_dispatch() {
    let q = page();
    let hits = Rc::new(RefCell::new(0));
    let counter = hits.clone();
    let on_complete = EventListener::new(move |_| *counter.borrow_mut() += 1);
    let p = q.select("p.a").unwrap();
    p.transition(&[("opacity", "0")], &[], Some(&on_complete)).unwrap();
    let node = p.targets()[0];
    q.window().dispatch_event(node, &Event::transition_end("transitionend", "opacity"));
    q.window().dispatch_event(node, &Event::transition_end("msTransitionEnd", "opacity"));
    assert_eq!(*hits.borrow(), 1);
}
