//! Minimal Office Open XML workbook: one worksheet of inline-string cells.

use crate::domain::model::{ExportFormat, Table};
use crate::domain::ports::SheetEncoder;
use crate::utils::error::Result;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

type XmlResult = quick_xml::Result<()>;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl SheetEncoder for XlsxEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let workbook = workbook_xml(&table.sheet_name)?;
        let sheet = sheet_xml(table)?;

        // Fixed timestamps keep repeated exports byte-identical.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", ROOT_RELS.as_bytes()),
            ("xl/workbook.xml", &workbook),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
            ("xl/styles.xml", STYLES.as_bytes()),
            ("xl/worksheets/sheet1.xml", &sheet),
        ];
        for (name, data) in parts {
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Spreadsheet column name for a zero-based index: 0 → A, 26 → AA.
pub fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

fn new_writer() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn workbook_xml(sheet_name: &str) -> Result<Vec<u8>> {
    let mut writer = new_writer()?;
    writer
        .create_element("workbook")
        .with_attribute(("xmlns", NS_MAIN))
        .with_attribute(("xmlns:r", NS_REL))
        .write_inner_content(|w| -> XmlResult {
            w.create_element("sheets").write_inner_content(|w| -> XmlResult {
                w.create_element("sheet")
                    .with_attribute(("name", sheet_name))
                    .with_attribute(("sheetId", "1"))
                    .with_attribute(("r:id", "rId1"))
                    .write_empty()?;
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(writer.into_inner())
}

fn sheet_xml(table: &Table) -> Result<Vec<u8>> {
    let width = table.header.len().max(1);
    let height = table.rows.len() + 1;
    let dimension = format!("A1:{}{}", column_name(width - 1), height);

    let mut writer = new_writer()?;
    writer
        .create_element("worksheet")
        .with_attribute(("xmlns", NS_MAIN))
        .with_attribute(("xmlns:r", NS_REL))
        .write_inner_content(|w| -> XmlResult {
            w.create_element("dimension")
                .with_attribute(("ref", dimension.as_str()))
                .write_empty()?;
            w.create_element("sheetData").write_inner_content(|w| -> XmlResult {
                let header = table.header.iter().map(|h| Some(h.as_str()));
                write_row(w, 1, header)?;
                for (i, row) in table.rows.iter().enumerate() {
                    write_row(w, i + 2, row.iter().map(|cell| cell.as_deref()))?;
                }
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(writer.into_inner())
}

fn write_row<'c>(
    w: &mut Writer<Vec<u8>>,
    row_number: usize,
    cells: impl Iterator<Item = Option<&'c str>>,
) -> quick_xml::Result<()> {
    let r = row_number.to_string();
    w.create_element("row")
        .with_attribute(("r", r.as_str()))
        .write_inner_content(|w| -> XmlResult {
            for (col, cell) in cells.enumerate() {
                // Absent values stay empty cells.
                let Some(text) = cell else { continue };
                let cell_ref = format!("{}{}", column_name(col), row_number);
                w.create_element("c")
                    .with_attribute(("r", cell_ref.as_str()))
                    .with_attribute(("t", "inlineStr"))
                    .write_inner_content(|w| -> XmlResult {
                        w.create_element("is").write_inner_content(|w| -> XmlResult {
                            let t = w.create_element("t");
                            let t = if text.trim() != text {
                                t.with_attribute(("xml:space", "preserve"))
                            } else {
                                t
                            };
                            t.write_text_content(BytesText::new(text))?;
                            Ok(())
                        })?;
                        Ok(())
                    })?;
            }
            Ok(())
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn table() -> Table {
        Table {
            sheet_name: "Sheet1".to_string(),
            header: vec!["URL".into(), "Title".into(), "BookmarkPath".into()],
            rows: vec![
                vec![Some("https://a.com/?x=1&y=2".into()), Some("<A>".into()), Some("/a".into())],
                vec![Some("https://b.com".into()), Some(" B ".into()), None],
            ],
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(2), "C");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = XlsxEncoder.encode(&table()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_sheet_cells_are_escaped_and_empty_cells_omitted() {
        let bytes = XlsxEncoder.encode(&table()).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains(r#"<dimension ref="A1:C3"/>"#));
        assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t>URL</t></is></c>"#));
        assert!(sheet.contains("https://a.com/?x=1&amp;y=2"));
        assert!(sheet.contains("&lt;A&gt;"));
        assert!(sheet.contains(r#"<t xml:space="preserve"> B </t>"#));
        assert!(sheet.contains(r#"<c r="B3""#));
        assert!(!sheet.contains(r#"<c r="C3""#));
    }

    #[test]
    fn test_workbook_names_the_sheet() {
        let bytes = XlsxEncoder.encode(&table()).unwrap();
        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = XlsxEncoder.encode(&table()).unwrap();
        let second = XlsxEncoder.encode(&table()).unwrap();
        assert_eq!(first, second);
    }
}
