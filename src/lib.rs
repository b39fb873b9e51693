//! Folio - a minimal personal wiki over flat text files
//!
//! Pages live as plain `.txt` files in a data directory, editable and
//! viewable through a browser. Bodies are rendered as Markdown (or simply
//! HTML-escaped, by configuration), and bracketed `[Tokens]` in the
//! rendered output become links to other pages.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod links;
pub mod logger;
pub mod render;
pub mod route;
pub mod store;
pub mod templates;
pub mod types;
pub mod utils;

pub use config::Config;
pub use errors::WikiError;
pub use render::{RenderPolicy, SafeHtml};
pub use store::PageStore;
pub use templates::TemplateSet;
pub use types::{AppState, Page, Title};
