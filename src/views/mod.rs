//! Server-rendered pages. Every value interpolated into markup goes
//! through `escape_html` first; post bodies are rendered from Markdown.

pub mod admin;
pub mod auth;
pub mod layout;
pub mod pages;
pub mod posts;

pub use layout::render_page;
