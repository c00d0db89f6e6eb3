//! Report rendering.
//!
//! This module turns markdown reports into HTML and reads the
//! success-probability score out of them.

pub mod html;
pub mod score;

pub use html::{generate_report_page, markdown_to_html};
pub use score::{badge_for_report, Badge};
