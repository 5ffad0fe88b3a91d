use crate::core::document::ParsedDocument;
use crate::core::plist::{Lookup, Value};
use crate::domain::model::{BookmarkCollection, BookmarkField, BookmarkRecord};
use crate::utils::error::{Result, ShapeError};

pub const PAYLOAD_CONTENT: &str = "PayloadContent";
pub const ALLOW_LIST_BOOKMARKS: &str = "AllowListBookmarks";

/// Reads `PayloadContent[0].AllowListBookmarks` into records.
///
/// Either every bookmark is extracted or an error is returned; an empty
/// bookmark array is a valid, empty collection.
pub fn extract(doc: &ParsedDocument) -> Result<BookmarkCollection> {
    let top = plist_root(doc)?;

    let payloads = expect(
        top.get(PAYLOAD_CONTENT, PAYLOAD_CONTENT)?,
        "",
        "dictionary",
        PAYLOAD_CONTENT,
    )?;

    let first_path = format!("{}[0]", PAYLOAD_CONTENT);
    let first = expect(
        payloads.index(0, &first_path)?,
        PAYLOAD_CONTENT,
        "array",
        &first_path,
    )?;

    let bookmarks_path = format!("{}.{}", first_path, ALLOW_LIST_BOOKMARKS);
    let bookmarks = expect(
        first.get(ALLOW_LIST_BOOKMARKS, &bookmarks_path)?,
        &first_path,
        "dictionary",
        &bookmarks_path,
    )?;
    let items = bookmarks
        .items()
        .ok_or_else(|| wrong_type(&bookmarks_path, "array", &bookmarks))?;

    let mut records = Vec::new();
    for (index, element) in items.enumerate() {
        let item_path = format!("{}[{}]", bookmarks_path, index);
        let item = Value::decode(element, &item_path)?;
        records.push(read_record(&item, &item_path)?);
    }

    tracing::debug!("Extracted {} bookmark records", records.len());
    Ok(records)
}

fn plist_root(doc: &ParsedDocument) -> std::result::Result<Value<'_>, ShapeError> {
    let root = doc.root();
    let not_a_plist = || ShapeError::NotAPlist {
        root: root.name().to_string(),
    };

    if root.name() != "plist" {
        return Err(not_a_plist());
    }

    let mut values = root.child_elements();
    let (Some(element), None) = (values.next(), values.next()) else {
        return Err(not_a_plist());
    };

    match Value::decode(element, "")? {
        top @ Value::Dictionary(_) => Ok(top),
        _ => Err(not_a_plist()),
    }
}

/// Turns one navigation step into a value. A wrong-type step blames the
/// container at `parent`, which should have been a `container`.
fn expect<'a>(
    lookup: Lookup<'a>,
    parent: &str,
    container: &'static str,
    path: &str,
) -> std::result::Result<Value<'a>, ShapeError> {
    match lookup {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound => Err(ShapeError::Missing {
            path: path.to_string(),
        }),
        Lookup::WrongType { found } => Err(ShapeError::WrongType {
            path: parent.to_string(),
            expected: container,
            found,
        }),
    }
}

fn wrong_type(path: &str, expected: &'static str, value: &Value<'_>) -> ShapeError {
    ShapeError::WrongType {
        path: path.to_string(),
        expected,
        found: value.kind(),
    }
}

fn read_record(item: &Value<'_>, path: &str) -> std::result::Result<BookmarkRecord, ShapeError> {
    if !matches!(item, Value::Dictionary(_)) {
        return Err(wrong_type(path, "dictionary", item));
    }

    let mut record = BookmarkRecord::default();
    for field in BookmarkField::ALL {
        let field_path = format!("{}.{}", path, field.key());
        if let Lookup::Found(value) = item.get(field.key(), &field_path)? {
            let text = value
                .to_cell_text()
                .ok_or_else(|| wrong_type(&field_path, "string", &value))?;
            record.set(field, text);
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::parse;
    use crate::utils::error::ConvertError;

    fn plist(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
{}
</plist>"#,
            body
        )
    }

    fn bookmarks(items: &str) -> String {
        plist(&format!(
            "<dict>
  <key>PayloadContent</key>
  <array>
    <dict>
      <key>PayloadType</key><string>com.apple.webcontent-filter</string>
      <key>AllowListBookmarks</key>
      <array>{}</array>
    </dict>
  </array>
</dict>",
            items
        ))
    }

    fn shape_error(xml: &str) -> ShapeError {
        match extract(&parse(xml).unwrap()) {
            Err(ConvertError::ExtractError(shape)) => shape,
            other => panic!("expected an extract error, got {:?}", other),
        }
    }

    #[test]
    fn test_extracts_records_in_order_with_missing_fields() {
        let xml = bookmarks(
            "<dict><key>URL</key><string>https://a.com</string><key>Title</key><string>A</string><key>BookmarkPath</key><string>/a</string></dict>
             <dict><key>Title</key><string>B</string><key>URL</key><string>https://b.com</string></dict>",
        );
        let records = extract(&parse(&xml).unwrap()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url.as_deref(), Some("https://a.com"));
        assert_eq!(records[0].bookmark_path.as_deref(), Some("/a"));
        assert_eq!(records[1].title.as_deref(), Some("B"));
        assert_eq!(records[1].bookmark_path, None);
    }

    #[test]
    fn test_n_records_preserve_source_order() {
        for n in [0usize, 1, 5, 40] {
            let items: String = (0..n)
                .map(|i| format!("<dict><key>URL</key><string>https://{}.example</string></dict>", i))
                .collect();
            let records = extract(&parse(&bookmarks(&items)).unwrap()).unwrap();
            assert_eq!(records.len(), n);
            for (i, record) in records.iter().enumerate() {
                assert_eq!(record.url, Some(format!("https://{}.example", i)));
            }
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let xml = bookmarks(
            "<dict><key>URL</key><string>https://a.com</string><key>Extra</key><dict/></dict>",
        );
        let records = extract(&parse(&xml).unwrap()).unwrap();
        assert_eq!(
            records,
            vec![BookmarkRecord {
                url: Some("https://a.com".to_string()),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_non_string_scalars_become_text() {
        let xml = bookmarks(
            "<dict><key>URL</key><string>https://a.com</string><key>Title</key><integer>7</integer><key>BookmarkPath</key><true/></dict>",
        );
        let records = extract(&parse(&xml).unwrap()).unwrap();
        assert_eq!(records[0].title.as_deref(), Some("7"));
        assert_eq!(records[0].bookmark_path.as_deref(), Some("true"));
    }

    #[test]
    fn test_unsigned_64_bit_title_is_kept() {
        let xml = bookmarks(
            "<dict><key>URL</key><string>https://a.com</string><key>Title</key><integer>18446744073709551615</integer></dict>",
        );
        let records = extract(&parse(&xml).unwrap()).unwrap();
        assert_eq!(records[0].title.as_deref(), Some("18446744073709551615"));
    }

    #[test]
    fn test_missing_payload_content() {
        let err = shape_error(&plist("<dict><key>Other</key><string>x</string></dict>"));
        assert_eq!(
            err,
            ShapeError::Missing {
                path: "PayloadContent".to_string()
            }
        );
    }

    #[test]
    fn test_empty_payload_array() {
        let err = shape_error(&plist("<dict><key>PayloadContent</key><array/></dict>"));
        assert_eq!(
            err,
            ShapeError::Missing {
                path: "PayloadContent[0]".to_string()
            }
        );
    }

    #[test]
    fn test_payload_content_wrong_type() {
        let err = shape_error(&plist("<dict><key>PayloadContent</key><string>x</string></dict>"));
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "PayloadContent".to_string(),
                expected: "array",
                found: "string",
            }
        );
    }

    #[test]
    fn test_first_payload_not_a_dictionary() {
        let err = shape_error(&plist(
            "<dict><key>PayloadContent</key><array><string>x</string></array></dict>",
        ));
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "PayloadContent[0]".to_string(),
                expected: "dictionary",
                found: "string",
            }
        );
    }

    #[test]
    fn test_missing_allow_list_bookmarks() {
        let err = shape_error(&plist(
            "<dict><key>PayloadContent</key><array><dict/></array></dict>",
        ));
        assert_eq!(
            err,
            ShapeError::Missing {
                path: "PayloadContent[0].AllowListBookmarks".to_string()
            }
        );
    }

    #[test]
    fn test_only_first_payload_is_read() {
        let err = shape_error(&plist(
            "<dict><key>PayloadContent</key><array>
               <dict/>
               <dict><key>AllowListBookmarks</key><array/></dict>
             </array></dict>",
        ));
        assert!(matches!(err, ShapeError::Missing { .. }));
    }

    #[test]
    fn test_allow_list_bookmarks_wrong_type() {
        let err = shape_error(&plist(
            "<dict><key>PayloadContent</key><array><dict><key>AllowListBookmarks</key><dict/></dict></array></dict>",
        ));
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "PayloadContent[0].AllowListBookmarks".to_string(),
                expected: "array",
                found: "dictionary",
            }
        );
    }

    #[test]
    fn test_bookmark_item_not_a_dictionary_fails_whole_extraction() {
        let err = shape_error(&bookmarks(
            "<dict><key>URL</key><string>https://a.com</string></dict><string>loose</string>",
        ));
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "PayloadContent[0].AllowListBookmarks[1]".to_string(),
                expected: "dictionary",
                found: "string",
            }
        );
    }

    #[test]
    fn test_container_field_value_is_rejected() {
        let err = shape_error(&bookmarks("<dict><key>URL</key><array/></dict>"));
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "PayloadContent[0].AllowListBookmarks[0].URL".to_string(),
                expected: "string",
                found: "array",
            }
        );
    }

    #[test]
    fn test_unrelated_malformed_scalar_is_not_visited() {
        let xml = plist(
            "<dict>
               <key>PayloadVersion</key><integer>not-a-number</integer>
               <key>PayloadContent</key><array><dict><key>AllowListBookmarks</key><array/></dict></array>
             </dict>",
        );
        assert!(extract(&parse(&xml).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_non_plist_xml_is_rejected() {
        let err = shape_error("<catalog><book/></catalog>");
        assert_eq!(
            err,
            ShapeError::NotAPlist {
                root: "catalog".to_string()
            }
        );
    }

    #[test]
    fn test_plist_with_array_root_is_rejected() {
        let err = shape_error(&plist("<array/>"));
        assert!(matches!(err, ShapeError::NotAPlist { .. }));
    }
}
