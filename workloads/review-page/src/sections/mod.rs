//! Page sections for the review landing page.

mod hero;
mod wizard;

pub use hero::*;
pub use wizard::*;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
