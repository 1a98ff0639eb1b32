//! Translation of diff locations into source line spans.

mod line_span;
mod resolver;

pub use line_span::LineSpan;
pub use resolver::{resolve, resolve_location, ResolveError, SpanResolution};
