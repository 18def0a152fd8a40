//! Report rendering for laborcheck diagnosis results.

pub mod html;

pub use html::{generate_html, write_html_report};
