//! Example: batched DOM and canvas operations

use std::cell::Cell;
use std::rc::Rc;

use fos_query::{Event, EventListener, Query, TRANSITION_END};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><style>.note { display: none }</style></head><body>
<ul id="list"><li data-id="1">One</li><li data-id="2">Two</li></ul>
<p class="note">Saved</p>
<canvas id="chart" width="64" height="32"></canvas>
</body></html>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let q = Query::from_html(PAGE)?;

    let items = q.select("#list li")?;
    items.add_class("item")?.css(&[("transform", "translateX(4px)")])?;
    items.append(" (edited)")?;
    println!("items: {:?}", items.text());
    println!("ids: {:?}", items.data("id"));

    let note = q.select(".note")?;
    note.show()?;
    println!("note display: {}", note.style("display")?);

    let finished = Rc::new(Cell::new(0));
    let counter = finished.clone();
    let on_complete = EventListener::new(move |_| counter.set(counter.get() + 1));
    note.transition(&[("opacity", "0")], &[("duration", "200ms")], Some(&on_complete))?;
    q.window().run_until_idle();
    for &node in note.iter() {
        q.window().dispatch_event(node, &Event::transition_end("transitionend", "opacity"));
    }
    println!(
        "opacity after transition: {:?}, {TRANSITION_END} callbacks: {}",
        note.styles("opacity"),
        finished.get()
    );

    let chart = q.select("#chart")?.contexts()?;
    chart
        .apply(&[("fillStyle", "#3366ff")])
        .fill_rect(0.0, 0.0, 32.0, 32.0)
        .apply(&[("strokeStyle", "black")])
        .apply(&[("lineWidth", 2.0)])
        .begin_path()
        .move_to(0.0, 31.0)
        .line_to(63.0, 0.0)
        .stroke();
    let url = chart.to_data_url(None)?.into_single().unwrap_or_default();
    println!("chart: {} bytes of data URL", url.len());
    println!("settings: {}", serde_json::to_string_pretty(&chart.settings(Some(0))?)?);

    Ok(())
}
