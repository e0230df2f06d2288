//! Text measurement capability.
//!
//! Text boxes need line widths, which only a font rasterizer can supply. The
//! host passes an implementation of [`TextMetrics`] into every call that may
//! compute a text box; [`FixedAdvanceMetrics`] is a headless stand-in.

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

use crate::element::{FontStyle, TextBlock};

/// Font description handed to a [`TextMetrics`] provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec<'a> {
    pub size: f64,
    pub style: FontStyle,
    pub family: Option<&'a str>,
}

impl<'a> FontSpec<'a> {
    #[must_use]
    pub fn of(block: &'a TextBlock) -> Self {
        Self { size: block.font_size, style: block.font_style, family: block.font_family.as_deref() }
    }
}

/// Synchronous text-width measurement.
pub trait TextMetrics {
    /// Advance width of a single line of `text` set in `font`.
    fn measure_text_width(&self, text: &str, font: &FontSpec<'_>) -> f64;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &FontSpec<'_>) -> f64,
{
    fn measure_text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        self(text, font)
    }
}

/// Every character advances by `font.size * advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance: f64,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn measure_text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let chars = text.chars().count() as f64;
        chars * font.size * self.advance
    }
}
