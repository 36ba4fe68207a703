//! fOS Query
//!
//! Chainable, batched operations over groups of DOM nodes and canvas
//! contexts. A [`Query`] resolves selectors (or existing nodes) into a
//! [`Selection`]; mutators return the selection for chaining and readers
//! return a [`Normalized`] value: the bare value for one target, a sequence
//! otherwise.
//!
//! # Example
//! ```rust,ignore
//! use fos_query::Query;
//!
//! let q = Query::from_html("<ul><li>a</li><li>b</li></ul>")?;
//! q.select("li")?.add_class("item")?.css(&[("transform", "scale(1.5)")])?;
//! let texts = q.select("li")?.text(); // Normalized::Many(["a", "b"])
//! ```

mod canvas;
mod collection;
mod config;
mod error;
mod events;
mod normalize;
mod ops;
mod query;
mod selection;
mod vendor;

pub use canvas::{CanvasSetting, SettingValue, Settings, DRAWING_OPERATIONS};
pub use collection::{Collection, ContextSet, Selection};
pub use config::QueryConfig;
pub use error::{QueryError, QueryResult};
pub use events::TRANSITION_END;
pub use normalize::Normalized;
pub use ops::{ClassOp, ContentKind, DefaultOps, Position, TargetOps};
pub use query::{Query, Source};
pub use selection::{Content, Visibility};
pub use vendor::{VendorMap, DEFAULT_VENDOR_MAP};

// Host types that appear in this crate's signatures
pub use fos_canvas::{Blob, ContextHandle};
pub use fos_dom::{Event, EventListener, NodeId, Window};
