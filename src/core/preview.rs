use crate::core::document::{Element, Node, ParsedDocument};
use crate::domain::model::{BookmarkField, BookmarkRecord};
use crate::utils::error::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Header line plus one tab-separated line per record, in the export's
/// column order. Absent values print as nothing.
pub fn render_table(records: &[BookmarkRecord]) -> String {
    let header: Vec<&str> = BookmarkField::ALL.iter().map(|f| f.key()).collect();
    let mut lines = vec![header.join("\t")];
    for record in records {
        let cells: Vec<&str> = BookmarkField::ALL
            .iter()
            .map(|f| record.get(*f).unwrap_or(""))
            .collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

pub fn render_json(records: &[BookmarkRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// The parsed document written back out from its root element. Prolog,
/// DOCTYPE and comments are not part of the tree and do not reappear.
pub fn render_source(document: &ParsedDocument) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, document.root())?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(element.name());
    for attribute in element.attributes() {
        start.push_attribute(attribute);
    }

    if element.children().is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))
}
