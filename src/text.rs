//! Text layout and font resolution boundaries.
//!
//! The core never shapes text. It asks an injected [`TextMeasurer`] for
//! paragraph metrics (text layer sizing, artboard label hit rects) and an
//! injected [`FontProvider`] for font data, both queried synchronously over
//! already-cached results. The host owns construction and teardown of the
//! implementations; nothing here is a process-wide singleton.

use crate::geometry::{Rect, Size};
use crate::model::TextStyle;

/// The measured layout of one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphMetrics {
    pub size: Size,
    /// One rect per glyph, in paragraph-local coordinates.
    pub glyph_rects: Vec<Rect>,
}

impl ParagraphMetrics {
    /// The caret rect before the glyph at `index`. An index at or past the
    /// end returns a zero-width rect after the last glyph.
    pub fn cursor_rect(&self, index: usize) -> Rect {
        match self.glyph_rects.get(index) {
            Some(rect) => Rect::new(rect.x, rect.y, 0.0, rect.height),
            None => match self.glyph_rects.last() {
                Some(last) => Rect::new(last.x + last.width, last.y, 0.0, last.height),
                None => Rect::new(0.0, 0.0, 0.0, self.size.height),
            },
        }
    }
}

/// Measures and lays out paragraphs. Implemented by the rendering host.
pub trait TextMeasurer {
    fn measure_paragraph(
        &self,
        style: &TextStyle,
        text: &str,
        max_width: Option<f64>,
    ) -> ParagraphMetrics;
}

/// Font data for a resolved family, opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontData(pub Vec<u8>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResolution {
    Resolved(FontData),
    /// The family is known but its data has not arrived yet. The host
    /// re-renders once it has; the core never waits.
    Pending,
}

pub trait FontProvider {
    fn resolve(&self, family: &str) -> Option<FontResolution>;
}

/// A fixed-advance measurer for tests and headless use.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 7.0,
            line_height: 14.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_paragraph(
        &self,
        _style: &TextStyle,
        text: &str,
        max_width: Option<f64>,
    ) -> ParagraphMetrics {
        let per_line = match max_width {
            Some(width) if width >= self.advance => (width / self.advance) as usize,
            Some(_) => 1,
            None => usize::MAX,
        };

        let mut glyph_rects = Vec::new();
        let mut line = 0usize;
        let mut column = 0usize;
        let mut max_columns = 0usize;

        for _ in text.chars() {
            if column >= per_line {
                line += 1;
                column = 0;
            }
            glyph_rects.push(Rect::new(
                column as f64 * self.advance,
                line as f64 * self.line_height,
                self.advance,
                self.line_height,
            ));
            column += 1;
            max_columns = max_columns.max(column);
        }

        ParagraphMetrics {
            size: Size::new(
                max_columns as f64 * self.advance,
                (line + 1) as f64 * self.line_height,
            ),
            glyph_rects,
        }
    }
}
