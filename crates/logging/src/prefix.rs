//! crates/logging/src/prefix.rs
//! Hierarchical name segments identifying a logger's position.

use logging_sink::color::{paint, segment_color};

/// Ordered name segments owned by one logger instance.
///
/// A root logger carries zero or more seed segments; a child extends its
/// parent's chain by value. The copy matters: mutating or extending one
/// chain never affects loggers created from an earlier state of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixChain {
    segments: Vec<String>,
    separator: String,
}

impl PrefixChain {
    /// Creates a chain from seed segments and a separator.
    pub fn new<I, S>(segments: I, separator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            separator: separator.into(),
        }
    }

    /// Returns a new chain with `segments` appended; `self` is untouched.
    #[must_use]
    pub fn push<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extended = self.segments.clone();
        extended.extend(segments.into_iter().map(Into::into));
        Self {
            segments: extended,
            separator: self.separator.clone(),
        }
    }

    /// Reports whether the chain has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the configured separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Joins the segments with the separator, without color.
    ///
    /// An empty chain renders as the empty string.
    #[must_use]
    pub fn render_plain(&self) -> String {
        self.segments.join(&self.separator)
    }

    /// Joins the segments with the separator, each painted in its
    /// name-derived color.
    #[must_use]
    pub fn render_colored(&self) -> String {
        self.segments
            .iter()
            .map(|segment| paint(segment_color(segment), segment))
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

impl Default for PrefixChain {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), crate::LoggerConfig::DEFAULT_SEPARATOR)
    }
}
