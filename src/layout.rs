//! Abstract description of the report content.
//!
//! The layout is a flat list of blocks produced from the table, the summary
//! and the generation time. It carries no reference to the rendering crate so
//! the ordering and wording of the report can be checked without fonts; the
//! [`crate::composer`] module maps each block onto `genpdf` elements.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::loader::Table;
use crate::summary::Summary;

/// Names longer than this are shortened in the table.
pub const MAX_NAME_CHARS: usize = 30;

const ELLIPSIS: &str = "...";

/// Format of the generation timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Font size of regular body lines and headings.
pub const BODY_FONT_SIZE: u8 = 12;

/// Font size of summary lines, table rows and the analysis sentence.
pub const DETAIL_FONT_SIZE: u8 = 11;
const SECTION_GAP_MM: f64 = 8.0;
const HEADER_GAP_MM: f64 = 5.0;

/// Horizontal alignment of a text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
}

/// Font variant of a text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// A single line of text with its styling.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    text: String,
    emphasis: Emphasis,
    font_size: u8,
    alignment: HorizontalAlignment,
}

impl TextLine {
    /// Creates a regular, left aligned line in the body font size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Regular,
            font_size: BODY_FONT_SIZE,
            alignment: HorizontalAlignment::Left,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Marks the line as bold and returns it.
    pub fn bold(mut self) -> Self {
        self.emphasis = Emphasis::Bold;
        self
    }

    /// Marks the line as italic and returns it.
    pub fn italic(mut self) -> Self {
        self.emphasis = Emphasis::Italic;
        self
    }

    /// Sets the font size and returns the updated line.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the alignment and returns the updated line.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// One display row of the marks table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub marks: String,
}

/// The two-column `Name | Marks` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarksTable {
    rows: Vec<TableRow>,
}

impl MarksTable {
    /// Header cells of the table.
    pub const HEADER: [&'static str; 2] = ["Name", "Marks"];

    /// Builds display rows from `table`, keeping the input order.
    pub fn from_table(table: &Table) -> Self {
        let rows = table
            .records()
            .iter()
            .map(|record| TableRow {
                name: truncate_name(&record.name).into_owned(),
                marks: (record.marks.trunc() as i64).to_string(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}

/// Content blocks of the report body.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// A line of text.
    Text(TextLine),
    /// Vertical gap in millimetres.
    Spacer(f64),
    /// The per-student table.
    Table(MarksTable),
}

/// Ordered body content plus the title drawn in every page header.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLayout {
    title: String,
    blocks: Vec<Block>,
}

impl ReportLayout {
    /// Lays out the report sections in their fixed order.
    pub fn build(
        title: impl Into<String>,
        table: &Table,
        summary: &Summary,
        generated_at: NaiveDateTime,
    ) -> Self {
        let mut blocks = vec![
            Block::Text(TextLine::new(format!(
                "Generated: {}",
                generated_at.format(TIMESTAMP_FORMAT)
            ))),
            Block::Spacer(HEADER_GAP_MM),
            Block::Text(TextLine::new("Summary").bold()),
        ];
        blocks.extend(
            summary
                .lines()
                .into_iter()
                .map(|line| Block::Text(TextLine::new(line).with_font_size(DETAIL_FONT_SIZE))),
        );

        blocks.push(Block::Spacer(SECTION_GAP_MM));
        blocks.push(Block::Table(MarksTable::from_table(table)));

        blocks.push(Block::Spacer(SECTION_GAP_MM));
        blocks.push(Block::Text(TextLine::new("Analysis").bold()));
        blocks.push(Block::Text(
            TextLine::new(summary.analysis_sentence()).with_font_size(DETAIL_FONT_SIZE),
        ));

        Self {
            title: title.into(),
            blocks,
        }
    }

    /// Title shown in the header band of each page.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the marks table block, if present.
    pub fn table(&self) -> Option<&MarksTable> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Iterates over the text of all line blocks in order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Text(line) => Some(line.text()),
            _ => None,
        })
    }
}

/// Shortens names longer than [`MAX_NAME_CHARS`] to exactly that many characters,
/// the last three being an ellipsis.
pub fn truncate_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() <= MAX_NAME_CHARS {
        return Cow::Borrowed(name);
    }

    let keep = MAX_NAME_CHARS - ELLIPSIS.len();
    let mut shortened: String = name.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    Cow::Owned(shortened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Record;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(9, 4, 7))
            .expect("valid timestamp")
    }

    fn sample_table() -> Table {
        Table::new(vec![Record::new("Alice", 90.0), Record::new("Bob", 30.0)])
    }

    fn layout_for(table: &Table) -> ReportLayout {
        ReportLayout::build("Grades", table, &Summary::from_table(table), timestamp())
    }

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(truncate_name("Alice"), "Alice");
        let exact = "a".repeat(30);
        assert!(matches!(truncate_name(&exact), Cow::Borrowed(_)));
    }

    #[test]
    fn long_names_are_cut_to_thirty_characters() {
        let name = "Maximilian Alexander Fitzgerald-Smythe";
        let truncated = truncate_name(name);
        assert_eq!(truncated.chars().count(), 30);
        assert_eq!(truncated, "Maximilian Alexander Fitzge...");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let name = "é".repeat(31);
        let truncated = truncate_name(&name);
        assert_eq!(truncated.chars().count(), 30);
        assert!(truncated.starts_with(&"é".repeat(27)));
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let layout = layout_for(&sample_table());
        let lines: Vec<_> = layout.text_lines().collect();
        assert_eq!(
            lines,
            [
                "Generated: 2024-03-05 09:04:07",
                "Summary",
                "Total Students: 2",
                "Average Marks: 60.0",
                "Highest Marks: 90",
                "Lowest Marks: 30",
                "Analysis",
                "Out of 2 students, 1 passed (50.0%).",
            ]
        );

        let table_index = layout
            .blocks()
            .iter()
            .position(|block| matches!(block, Block::Table(_)))
            .unwrap();
        let analysis_index = layout
            .blocks()
            .iter()
            .position(|block| matches!(block, Block::Text(line) if line.text() == "Analysis"))
            .unwrap();
        assert!(table_index < analysis_index);
    }

    #[test]
    fn table_has_one_row_per_record_in_order() {
        let records: Vec<_> = (0..57)
            .map(|index| Record::new(format!("Student {index:02}"), index as f64 + 0.9))
            .collect();
        let table = Table::new(records);
        let layout = layout_for(&table);
        let rows = layout.table().unwrap().rows();

        assert_eq!(rows.len(), 57);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row.name, format!("Student {index:02}"));
            assert_eq!(row.marks, index.to_string());
        }
    }

    #[test]
    fn table_rows_use_truncated_names() {
        let table = Table::new(vec![Record::new("X".repeat(45), 50.0)]);
        let layout = layout_for(&table);
        assert_eq!(
            layout.table().unwrap().rows()[0].name,
            format!("{}...", "X".repeat(27))
        );
    }

    #[test]
    fn empty_table_renders_header_only() {
        let layout = layout_for(&Table::default());
        assert!(layout.table().unwrap().rows().is_empty());
        assert!(layout.text_lines().any(|line| line == "Total Students: 0"));
        assert!(!layout.text_lines().any(|line| line.starts_with("Average")));
        assert!(layout
            .text_lines()
            .any(|line| line == "Out of 0 students, 0 passed (0%)."));
    }

    #[test]
    fn headings_are_bold() {
        let layout = layout_for(&sample_table());
        for block in layout.blocks() {
            if let Block::Text(line) = block {
                if line.text() == "Summary" || line.text() == "Analysis" {
                    assert_eq!(line.emphasis(), Emphasis::Bold);
                }
            }
        }
    }
}
