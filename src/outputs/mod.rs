//! Digest output: Markdown rendering and file persistence.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders a [`crate::models::NewsSnapshot`] into a Hugo
//!   Markdown document (front matter + per-region/per-source sections)
//! - [`writer`]: Persists a rendered digest to a date-stamped file,
//!   creating directories as needed
//!
//! # Output Structure
//!
//! ```text
//! content/Chinese/posts/news/
//! └── daily-news-summary-20250610.md   # variant 0 (Chinese title)
//! content/English/posts/news/
//! └── daily-news-summary-20250610.md   # variant 1 (English title)
//! ```

pub mod markdown;
pub mod writer;
