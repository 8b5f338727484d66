//! Element implementations the upstream `genpdf` crate does not ship with.

use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Element, Mm, RenderResult, Size};

/// A vertical gap of a fixed height in millimetres.
///
/// `genpdf::elements::Break` measures gaps in lines of the current font; this
/// element keeps section spacing independent of the font size. A gap that
/// does not fit the remaining page area is clipped instead of being carried
/// over to the next page.
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    /// Creates a gap of `height` millimetres.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}
