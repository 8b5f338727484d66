//! Turns a [`ReportLayout`] into a PDF file.
//!
//! Body blocks become `genpdf` elements pushed onto a single document; genpdf
//! moves whatever does not fit onto a new page and the page decorator from
//! [`crate::builder`] draws the title band and the page number on each one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use genpdf::elements::{FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Element, Margins, PaperSize};
use log::info;

use crate::builder::DocumentBuilder;
use crate::config::DEFAULT_TITLE;
use crate::elements::VerticalSpace;
use crate::error::{RenderError, RenderResult};
use crate::fonts;
use crate::layout::{
    Block, Emphasis, HorizontalAlignment, MarksTable, ReportLayout, TextLine, BODY_FONT_SIZE,
    DETAIL_FONT_SIZE,
};
use crate::loader::Table;
use crate::summary::Summary;

const TITLE_FONT_SIZE: u8 = 14;
const FOOTER_FONT_SIZE: u8 = 8;
const LINE_SPACING: f64 = 1.4;

const TITLE_GAP_MM: f64 = 5.0;
/// Height of the footer band; together with the bottom margin it is the
/// distance at which body content breaks onto a new page.
const FOOTER_HEIGHT_MM: f64 = 10.0;
const PAGE_MARGINS_MM: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 10.0);

/// Relative widths of the `Name` and `Marks` columns.
const TABLE_COLUMN_WEIGHTS: [usize; 2] = [5, 2];

/// Renders the report for `table` to `output_path`, stamped with the current
/// local time.
pub fn compose(table: &Table, output_path: impl AsRef<Path>) -> RenderResult<PathBuf> {
    compose_at(
        table,
        output_path,
        DEFAULT_TITLE,
        Local::now().naive_local(),
    )
}

/// Renders the report with an explicit title and generation time.
pub fn compose_at(
    table: &Table,
    output_path: impl AsRef<Path>,
    title: &str,
    generated_at: NaiveDateTime,
) -> RenderResult<PathBuf> {
    let output_path = output_path.as_ref();
    let summary = Summary::from_table(table);
    let layout = ReportLayout::build(title, table, &summary, generated_at);

    let bytes = render_layout(&layout)?;
    fs::write(output_path, &bytes).map_err(|source| RenderError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        "Wrote {} ({} bytes, {} rows)",
        output_path.display(),
        bytes.len(),
        table.len()
    );
    Ok(output_path.to_path_buf())
}

/// Renders `layout` into PDF bytes.
pub fn render_layout(layout: &ReportLayout) -> RenderResult<Vec<u8>> {
    let font_family = fonts::default_font_family().map_err(RenderError::Font)?;

    let title_line = TextLine::new(layout.title())
        .bold()
        .with_font_size(TITLE_FONT_SIZE)
        .with_alignment(HorizontalAlignment::Center);
    let (top, right, bottom, left) = PAGE_MARGINS_MM;

    let mut document = DocumentBuilder::new()
        .with_title(layout.title())
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::trbl(top, right, bottom, left))
        .with_font_size(BODY_FONT_SIZE)
        .with_line_spacing(LINE_SPACING)
        .with_header(TITLE_GAP_MM, move |_| paragraph(&title_line))
        .with_footer(FOOTER_HEIGHT_MM, |page| {
            paragraph(
                &TextLine::new(format!("Page {page}"))
                    .italic()
                    .with_font_size(FOOTER_FONT_SIZE)
                    .with_alignment(HorizontalAlignment::Center),
            )
        })
        .build(font_family);

    for block in layout.blocks() {
        match block {
            Block::Text(line) => document.push(paragraph(line)),
            Block::Spacer(height) => document.push(VerticalSpace::new(*height)),
            Block::Table(table) => document.push(marks_table(table)?),
        }
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

fn text_style(emphasis: Emphasis, font_size: u8) -> Style {
    let mut style = Style::new();
    style.set_font_size(font_size);
    match emphasis {
        Emphasis::Regular => {}
        Emphasis::Bold => {
            style.set_bold();
        }
        Emphasis::Italic => {
            style.set_italic();
        }
    }
    style
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
    }
}

fn paragraph(line: &TextLine) -> Paragraph {
    let style = text_style(line.emphasis(), line.font_size());
    let mut paragraph = Paragraph::new(StyledString::new(line.text().to_owned(), style));
    paragraph.set_alignment(alignment(line.alignment()));
    paragraph
}

fn table_cell(text: &str, emphasis: Emphasis, font_size: u8) -> impl Element {
    let style = text_style(emphasis, font_size);
    Paragraph::new(StyledString::new(text.to_owned(), style)).padded(Margins::all(1))
}

fn marks_table(table: &MarksTable) -> Result<TableLayout, genpdf::error::Error> {
    let mut layout = TableLayout::new(TABLE_COLUMN_WEIGHTS.to_vec());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let [name_header, marks_header] = MarksTable::HEADER;
    layout
        .row()
        .element(table_cell(name_header, Emphasis::Bold, BODY_FONT_SIZE))
        .element(table_cell(marks_header, Emphasis::Bold, BODY_FONT_SIZE))
        .push()?;

    for row in table.rows() {
        layout
            .row()
            .element(table_cell(&row.name, Emphasis::Regular, DETAIL_FONT_SIZE))
            .element(table_cell(&row.marks, Emphasis::Regular, DETAIL_FONT_SIZE))
            .push()?;
    }

    Ok(layout)
}
