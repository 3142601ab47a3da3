//! Chat front-end for the inventory valuation pipeline.
//!
//! The transport itself stays external: this crate classifies free-text
//! messages, resolves them to account ids, queries the inventory service,
//! and renders the text replies the transport sends back.

pub mod dispatcher;
pub mod format;
pub mod query;

pub use dispatcher::RequestDispatcher;
pub use format::format_report;
pub use query::{HttpQueryClient, InventoryQuery};
