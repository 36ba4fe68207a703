//! Comprehensive tests for fos-query
//!
//! Runs the classic article page through every collection operation:
//! a container with three articles (headline + paragraph each), a hidden
//! div and a small form.

use fos_dom::NodeId;
use fos_query::{Normalized, Query, Selection};

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Query test page</title><style>
  .hidden { display: none }
  #article-2 span { display: inline-block }
</style></head><body>
<div id="container">
  <article id="article-1" title="Article 1">
    <h3 class="headline" data-id="one">Headline 1</h3>
    <p>First paragraph with <span>a span</span></p>
  </article>
  <article id="article-2" title="Article 2">
    <h3 class="headline" data-id="two">Headline 2</h3>
    <p>Second paragraph with <span>another span</span></p>
  </article>
  <article id="article-3" title="Article 3">
    <h3 class="headline" data-id="three">Headline 3</h3>
    <p>Third paragraph</p>
  </article>
  <div class="hidden">Hidden content</div>
  <form><p><input name="name" value="Default Value"></p></form>
</div>
</body></html>"#;

fn setup() -> Query {
    Query::from_html(PAGE).unwrap()
}

fn container(q: &Query) -> NodeId {
    q.window().document().get_element_by_id("container").unwrap()
}

fn node_names(q: &Query, selection: &Selection) -> Vec<String> {
    let doc = q.window().document();
    selection.iter().map(|&n| doc.node_name(n)).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Factory
// ============================================================================

#[test]
fn test_selector_string() {
    let q = setup();
    let results = q.select("#container").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.targets()[0], container(&q));
}

#[test]
fn test_single_node_source() {
    let q = setup();
    let results = q.select(container(&q)).unwrap();
    assert_eq!(results.targets(), &[container(&q)]);
}

#[test]
fn test_existing_selection_source() {
    let q = setup();
    let results = q.select(q.select("#container").unwrap()).unwrap();
    assert_eq!(results.targets(), &[container(&q)]);

    let headlines = q.select(q.select("#container h3").unwrap()).unwrap();
    assert_eq!(headlines.len(), 3);
}

#[test]
fn test_node_list_source() {
    let q = setup();
    let list = q
        .window()
        .document()
        .query_selector_all(NodeId::ROOT, ".headline")
        .unwrap();
    let results = q.select(list).unwrap();
    assert_eq!(node_names(&q, &results), ["H3", "H3", "H3"]);
}

#[test]
fn test_scoped_to_alternate_root() {
    let q = setup();
    let root = container(&q);
    let articles = q.select_in("article", root).unwrap();
    assert_eq!(articles.len(), 3);
    assert!(articles.parent(None).unwrap().iter().all(|&p| p == root));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_find_with_one_selector() {
    let q = setup();
    assert_eq!(q.select("#container article h3").unwrap().len(), 3);
}

#[test]
fn test_find_function() {
    let q = setup();
    let articles = q.select("#container article").unwrap();
    assert_eq!(articles.find("h3").unwrap().len(), 3);
    assert_eq!(articles.find("h3[data-id=two]").unwrap().len(), 1);
}

#[test]
fn test_parent_node() {
    let q = setup();
    let results = q.select("#article-2").unwrap().parent(None).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.attr("id"), q.select("#container").unwrap().attr("id"));
}

#[test]
fn test_parent_nodes() {
    let q = setup();
    let results = q.select("p").unwrap().parent(None).unwrap();
    assert_eq!(results.len(), 4);
    let articles = node_names(&q, &results)
        .into_iter()
        .filter(|n| n == "ARTICLE")
        .count();
    assert_eq!(articles, 3);
}

#[test]
fn test_parent_with_selector() {
    let q = setup();
    let results = q.select("#article-2 p span").unwrap().parent(Some("article")).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.attr("id"), Normalized::Single(Some("article-2".into())));
}

#[test]
fn test_multiple_parents_with_selector() {
    let q = setup();
    let results = q.select("p span").unwrap().parent(Some("article")).unwrap();
    assert_eq!(node_names(&q, &results), ["ARTICLE", "ARTICLE"]);
}

#[test]
fn test_native_targets() {
    let q = setup();
    let expected = q
        .window()
        .document()
        .query_selector_all(NodeId::ROOT, "#container article")
        .unwrap();

    let all = q.select("#container article").unwrap();
    assert_eq!(all.native(None).unwrap(), Normalized::Many(expected.clone()));
    assert_eq!(all.native(Some(0)).unwrap(), Normalized::Single(expected[0]));

    let one = q.select("#container #article-1").unwrap();
    assert_eq!(one.native(None).unwrap(), Normalized::Single(expected[0]));
}

#[test]
fn test_iterate() {
    let q = setup();
    let mut out = Vec::new();
    q.select("#container article h3").unwrap().each(|&h, _| {
        out.push(q.window().document().tree().text_content(h));
    });
    assert_eq!(out, ["Headline 1", "Headline 2", "Headline 3"]);
}

#[test]
fn test_filter() {
    let q = setup();
    let two = q.select("#container article h3").unwrap().filter(|&h, _| {
        q.window().document().dataset_get(h, "id") == Some("two")
    });
    assert_eq!(two.len(), 1);
}

#[test]
fn test_map_keeps_membership() {
    let q = setup();
    let headlines = q.select("#container article h3").unwrap();
    let results = headlines.map(|&h, _| {
        let one = q.select(h).unwrap();
        let html = one.html().into_single().unwrap();
        one.set_html(&format!("{html} yeah")).unwrap();
    });
    assert_eq!(results.len(), 3);
    assert!(results.html().into_vec().iter().all(|h| h.ends_with(" yeah")));
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn test_get_html() {
    let q = setup();
    let item = q.select("#container #article-1").unwrap();
    let doc_html = {
        let doc = q.window().document();
        let article = doc.get_element_by_id("article-1").unwrap();
        fos_html::inner_html(doc.tree(), article)
    };
    assert_eq!(item.html(), Normalized::Single(doc_html));
}

#[test]
fn test_get_html_multiple() {
    let q = setup();
    let html = q.select("#container article p").unwrap().html();
    let many = html.many().unwrap();
    assert_eq!(many.len(), 3);
    assert_eq!(many[0], "First paragraph with <span>a span</span>");
    assert_eq!(many[2], "Third paragraph");
}

#[test]
fn test_get_text() {
    let q = setup();
    let text = q.select("#container #article-1").unwrap().text();
    let expected = {
        let doc = q.window().document();
        doc.tree().text_content(doc.get_element_by_id("article-1").unwrap())
    };
    assert_eq!(text, Normalized::Single(expected));
}

#[test]
fn test_set_html() {
    let q = setup();
    let item = q.select("#container #article-2").unwrap();
    item.set_html("<p>New HTML Content</p>").unwrap();
    assert_eq!(item.html(), Normalized::Single("<p>New HTML Content</p>".into()));
    assert_eq!(item.find("p").unwrap().len(), 1);
    assert_eq!(item.find("h3").unwrap().len(), 0);
}

#[test]
fn test_set_text() {
    let q = setup();
    let item = q.select("#container #article-2 h3").unwrap();
    item.set_text("New text Content").unwrap();
    assert_eq!(item.text(), Normalized::Single("New text Content".into()));
}

#[test]
fn test_append_to_all_articles() {
    let q = setup();
    q.select("#container article").unwrap().append("<p>New Content</p>").unwrap();
    let added = q
        .select("#container article p")
        .unwrap()
        .text()
        .into_vec()
        .into_iter()
        .filter(|t| t == "New Content")
        .count();
    assert_eq!(added, 3);
}

#[test]
fn test_prepend_to_all_headlines() {
    let q = setup();
    q.select("#container article h3").unwrap().prepend("Modified ").unwrap();
    assert_eq!(
        q.select("#container article h3").unwrap().text(),
        Normalized::Many(strings(&[
            "Modified Headline 1",
            "Modified Headline 2",
            "Modified Headline 3"
        ]))
    );
}

#[test]
fn test_remove_nodes() {
    let q = setup();
    let items = q.select("#container article h3").unwrap();
    assert_eq!(items.len(), 3);
    items.detach().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(q.select("#container article h3").unwrap().len(), 0);
}

#[test]
fn test_append_then_detach_last_round_trip() {
    let q = setup();
    let article = q.select("#article-1").unwrap();
    let before = q.select("#article-1 > *").unwrap().len();

    article.append("<footer>note</footer>").unwrap();
    assert_eq!(q.select("#article-1 > *").unwrap().len(), before + 1);

    q.select("#article-1 > *").unwrap().last().unwrap().detach().unwrap();
    assert_eq!(q.select("#article-1 > *").unwrap().len(), before);
}

// ============================================================================
// Style
// ============================================================================

#[test]
fn test_set_basic_css() {
    let q = setup();
    let headlines = q.select("#container article h3").unwrap();
    headlines
        .css(&[("color", "#F00"), ("borderBottom", "2px solid #CCC")])
        .unwrap();
    let doc = q.window().document();
    for &h in headlines.iter() {
        let style = doc.inline_style(h).unwrap();
        assert_eq!(style.get_property("color"), Some("#F00"));
        assert_eq!(style.get_property("borderBottom"), Some("2px solid #CCC"));
    }
}

#[test]
fn test_no_vendor_prefixes_for_plain_properties() {
    let q = setup();
    let headlines = q.select("#container article h3").unwrap();
    headlines.css(&[("color", "#FFF")]).unwrap();
    let doc = q.window().document();
    for &h in headlines.iter() {
        let style = doc.inline_style(h).unwrap();
        for prefixed in ["MozColor", "webkitColor", "OColor", "msColor"] {
            assert_eq!(style.get_property(prefixed), None);
        }
    }
}

#[test]
fn test_vendor_prefixes_for_registry_properties() {
    let q = setup();
    let headlines = q.select("#container article h3").unwrap();
    headlines.css(&[("transform", "scale(1.5)")]).unwrap();
    let doc = q.window().document();
    for &h in headlines.iter() {
        let style = doc.inline_style(h).unwrap();
        for prefixed in ["MozTransform", "webkitTransform", "OTransform", "msTransform"] {
            assert_eq!(style.get_property(prefixed), Some("scale(1.5)"));
        }
    }
}

#[test]
fn test_hide_elements() {
    let q = setup();
    let headlines = q.select("#container article h3").unwrap();
    headlines.hide().unwrap();
    assert_eq!(headlines.styles("display"), Normalized::Many(strings(&["none", "none", "none"])));
}

#[test]
fn test_show_elements() {
    let q = setup();
    let hidden = q.select("#container div.hidden").unwrap();
    assert_eq!(hidden.style("display").unwrap(), "none");
    assert_eq!(hidden.show().unwrap().style("display").unwrap(), "block");
}

#[test]
fn test_show_inline_element() {
    let q = setup();
    let span = q.select("#container article p span").unwrap().hide().unwrap().first().unwrap();
    assert_eq!(span.style("display").unwrap(), "none");
    let again = q.select(span.targets()[0]).unwrap();
    assert_eq!(again.show().unwrap().style("display").unwrap(), "inline");
}

#[test]
fn test_show_inline_block_element() {
    let q = setup();
    let span = q.select("#container #article-2 p span").unwrap();
    assert_eq!(span.style("display").unwrap(), "inline-block");
    assert_eq!(span.show().unwrap().style("display").unwrap(), "inline-block");
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_add_class() {
    let q = setup();
    q.select("#container article").unwrap().add_class("new-class").unwrap();
    assert_eq!(q.select("#container article.new-class").unwrap().len(), 3);
}

#[test]
fn test_remove_class() {
    let q = setup();
    q.select("#container article").unwrap().add_class("new-class").unwrap();
    assert_eq!(q.select("#container article.new-class").unwrap().len(), 3);
    q.select("#container article.new-class")
        .unwrap()
        .remove_class(Some("new-class"))
        .unwrap();
    assert_eq!(q.select("#container article.new-class").unwrap().len(), 0);
}

#[test]
fn test_toggle_class() {
    let q = setup();
    q.select("#container article").unwrap().toggle_class("new-class").unwrap();
    assert_eq!(q.select("#container article.new-class").unwrap().len(), 3);
    q.select("#container article.new-class")
        .unwrap()
        .toggle_class("new-class")
        .unwrap();
    assert_eq!(q.select("#container article.new-class").unwrap().len(), 0);
}

// ============================================================================
// Attributes, data and values
// ============================================================================

#[test]
fn test_get_attribute() {
    let q = setup();
    let title = q.select("#container #article-1").unwrap().attr("title");
    assert_eq!(title, Normalized::Single(Some("Article 1".into())));
}

#[test]
fn test_set_attribute_per_element() {
    let q = setup();
    let titles = ["a", "b", "c"];
    q.select("#container article")
        .unwrap()
        .try_each(|&a, i| q.select(a)?.set_attr("title", titles[i]).map(|_| ()))
        .unwrap();
    let read = q.select("#container article").unwrap().attr("title");
    assert_eq!(read, Normalized::Many(titles.iter().map(|t| Some(t.to_string())).collect()));
}

#[test]
fn test_set_attribute_on_multiple_elements() {
    let q = setup();
    assert_eq!(q.select("#container article[title=\"new-title\"]").unwrap().len(), 0);
    q.select("#container article").unwrap().set_attr("title", "new-title").unwrap();
    assert_eq!(q.select("#container article[title=\"new-title\"]").unwrap().len(), 3);
}

#[test]
fn test_get_data() {
    let q = setup();
    let id = q.select("#container #article-1 h3").unwrap().data("id");
    assert_eq!(id, Normalized::Single(Some("one".into())));
}

#[test]
fn test_get_data_multiple() {
    let q = setup();
    let ids = q.select("#container article h3").unwrap().data("id");
    assert_eq!(
        ids,
        Normalized::Many(vec![Some("one".into()), Some("two".into()), Some("three".into())])
    );
}

#[test]
fn test_set_data_per_element() {
    let q = setup();
    let titles = ["a", "b", "c"];
    let articles = q.select("#container article").unwrap();
    articles
        .try_each(|&a, i| q.select(a)?.set_data("title", titles[i]).map(|_| ()))
        .unwrap();
    assert_eq!(
        articles.data("title").into_vec(),
        titles.iter().map(|t| Some(t.to_string())).collect::<Vec<_>>()
    );
}

#[test]
fn test_set_data_on_multiple_elements() {
    let q = setup();
    assert_eq!(q.select("#container article[data-title=new-title]").unwrap().len(), 0);
    q.select("#container article").unwrap().set_data("title", "new-title").unwrap();
    assert_eq!(q.select("#container article[data-title=new-title]").unwrap().len(), 3);
}

#[test]
fn test_full_dataset_single_element() {
    let q = setup();
    let data = q.select("#container #article-1 h3").unwrap().dataset();
    let map = data.into_single().unwrap();
    assert_eq!(map.get("id").map(String::as_str), Some("one"));
}

#[test]
fn test_set_input_value() {
    let q = setup();
    q.select("form input[name=name]").unwrap().set_val("Test Value").unwrap();
    let doc = q.window().document();
    let input = doc.query_selector(NodeId::ROOT, "form input[name=name]").unwrap().unwrap();
    assert_eq!(doc.value(input).as_deref(), Some("Test Value"));
}

#[test]
fn test_get_input_value() -> anyhow::Result<()> {
    let q = setup();
    let value = q.select("form input[name=name]")?.val();
    assert_eq!(value, Normalized::Single(Some("Default Value".into())));
    Ok(())
}
