use chrono::{NaiveDate, NaiveDateTime};
use genpdf::elements::Paragraph;
use grade_report::builder::DocumentBuilder;
use grade_report::composer;
use grade_report::fonts;
use grade_report::layout::ReportLayout;
use grade_report::{Record, Summary, Table};
use sha2::{Digest, Sha256};

const SKIP_NOTE: &str =
    "no fonts found. Set GRADE_REPORT_FONTS_DIR or copy Roboto into assets/fonts.";

fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 12)
        .and_then(|date| date.and_hms_opt(14, 30, 0))
        .expect("valid timestamp")
}

fn student_table(rows: usize) -> Table {
    (0..rows)
        .map(|index| Record::new(format!("Student {index}"), (index * 7 % 100) as f64))
        .collect()
}

fn render_table(table: &Table) -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        return None;
    }

    let summary = Summary::from_table(table);
    let layout = ReportLayout::build("Grades", table, &summary, fixed_timestamp());
    Some(composer::render_layout(&layout).expect("render report pdf"))
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse rendered pdf")
        .get_pages()
        .len()
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    for tag in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ] {
        let start = format!("<{tag}>");
        let end = format!("</{tag}>");
        scrub_xml(&mut normalized, start.as_bytes(), end.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_a_pdf_document() {
    let Some(bytes) = render_table(&student_table(2)) else {
        eprintln!("Skipping renders_a_pdf_document: {SKIP_NOTE}");
        return;
    };
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn empty_table_still_renders_one_page() {
    let Some(bytes) = render_table(&Table::default()) else {
        eprintln!("Skipping empty_table_still_renders_one_page: {SKIP_NOTE}");
        return;
    };
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn long_tables_continue_on_new_pages() {
    let Some(short) = render_table(&student_table(10)) else {
        eprintln!("Skipping long_tables_continue_on_new_pages: {SKIP_NOTE}");
        return;
    };
    let Some(long) = render_table(&student_table(150)) else {
        return;
    };

    assert_eq!(page_count(&short), 1);
    assert!(
        page_count(&long) >= 3,
        "150 table rows should span several pages, got {}",
        page_count(&long)
    );
}

#[test]
fn rendering_is_deterministic() {
    let table = student_table(40);
    let Some(bytes_a) = render_table(&table) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_NOTE}");
        return;
    };
    let Some(bytes_b) = render_table(&table) else {
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn footers_taller_than_the_page_are_rejected() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping footers_taller_than_the_page_are_rejected: {SKIP_NOTE}");
        return;
    }

    let render_with_footer = |footer_height: f64| {
        let mut document = DocumentBuilder::new()
            .with_paper_size(genpdf::PaperSize::A4)
            .with_header(5.0, |_| Paragraph::new("Title"))
            .with_footer(footer_height, |page| Paragraph::new(format!("Page {page}")))
            .build(fonts::default_font_family().expect("load fonts"));
        document.push(Paragraph::new("Body"));
        let mut bytes = Vec::new();
        document.render(&mut bytes).map(|_| bytes)
    };

    assert!(render_with_footer(10.0).is_ok());
    assert!(render_with_footer(400.0).is_err(), "footer taller than A4");
}
