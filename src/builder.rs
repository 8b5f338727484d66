//! Document construction with per-page header and footer bands.

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{self, Element, Margins, Mm, PageDecorator, Position, Size};

/// Builder for `genpdf::Document` instances with decorated pages.
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    font_size: Option<u8>,
    line_spacing: Option<f64>,
    header: Option<HeaderSpec>,
    footer: Option<FooterSpec>,
}

type BandFactory = dyn Fn(usize) -> Box<dyn Element>;

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the default font size for body text.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the line spacing factor for body text.
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = Some(line_spacing);
        self
    }

    /// Configures a header callback that is invoked for every page, followed
    /// by `gap` of empty space before the body starts.
    pub fn with_header<F, E>(mut self, gap: impl Into<Mm>, header: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.header = Some(HeaderSpec::new(gap, header));
        self
    }

    /// Configures a footer callback with a fixed height that is invoked for every page.
    pub fn with_footer<F, E>(mut self, height: impl Into<Mm>, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height, footer));
        self
    }

    /// Builds a configured `genpdf::Document` using `font_family`.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }
        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }
        if let Some(font_size) = self.font_size {
            document.set_font_size(font_size);
        }
        if let Some(line_spacing) = self.line_spacing {
            document.set_line_spacing(line_spacing);
        }

        document.set_page_decorator(BandPageDecorator {
            page: 0,
            margins: self.margins,
            header: self.header,
            footer: self.footer,
        });

        document
    }
}

fn boxed_factory<F, E>(factory: F) -> Box<BandFactory>
where
    F: Fn(usize) -> E + 'static,
    E: Element + 'static,
{
    Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>)
}

/// Band drawn at the top of every page.
pub struct HeaderSpec {
    gap: Mm,
    factory: Box<BandFactory>,
}

impl HeaderSpec {
    /// Creates a header that leaves `gap` below its content.
    pub fn new<F, E>(gap: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            gap: gap.into(),
            factory: boxed_factory(factory),
        }
    }

    /// Renders the header and moves the top of `area` below it.
    fn draw(
        &self,
        page: usize,
        context: &genpdf::Context,
        area: &mut genpdf::render::Area<'_>,
        style: style::Style,
    ) -> Result<(), Error> {
        let mut element = (self.factory)(page);
        let result = element.render(context, area.clone(), style)?;
        if result.has_more {
            return Err(Error::new(
                format!("Header of page {} does not fit on the page", page),
                ErrorKind::PageSizeExceeded,
            ));
        }
        area.add_offset(Position::new(0, result.size.height + self.gap));
        Ok(())
    }
}

/// Band of fixed height drawn at the bottom of every page.
///
/// The top edge of the band is where body content breaks onto the next page.
pub struct FooterSpec {
    height: Mm,
    factory: Box<BandFactory>,
}

impl FooterSpec {
    /// Creates a new footer specification.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: boxed_factory(factory),
        }
    }

    /// Renders the footer into the bottom band and shrinks `area` above it.
    fn draw(
        &self,
        page: usize,
        context: &genpdf::Context,
        area: &mut genpdf::render::Area<'_>,
        style: style::Style,
    ) -> Result<(), Error> {
        let available = area.size().height;
        if self.height > available {
            return Err(Error::new(
                "Footer height exceeds available space",
                ErrorKind::InvalidData,
            ));
        }

        let body_height = available - self.height;
        let mut band = area.clone();
        band.add_offset(Position::new(0, body_height));
        let result = (self.factory)(page).render(context, band, style)?;
        if result.has_more {
            return Err(Error::new(
                "Footer element does not fit into the reserved space",
                ErrorKind::PageSizeExceeded,
            ));
        }

        area.set_height(body_height);
        Ok(())
    }
}

/// Applies the margins, then the header and footer bands, leaving the body
/// area in between for document content.
struct BandPageDecorator {
    page: usize,
    margins: Option<Margins>,
    header: Option<HeaderSpec>,
    footer: Option<FooterSpec>,
}

impl PageDecorator for BandPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }
        if let Some(header) = &self.header {
            header.draw(self.page, context, &mut area, style)?;
        }
        if let Some(footer) = &self.footer {
            footer.draw(self.page, context, &mut area, style)?;
        }

        if area.size().height <= Mm::default() {
            return Err(Error::new(
                "Header and footer leave no room for page content",
                ErrorKind::PageSizeExceeded,
            ));
        }

        Ok(area)
    }
}
