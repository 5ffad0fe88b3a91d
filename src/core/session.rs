use crate::core::document::parse;
use crate::core::export::TabularExporter;
use crate::core::extract::extract;
use crate::domain::model::{Conversion, ExportArtifact, ExportFormat, RawDocument};
use crate::utils::error::{ConvertError, Result};

/// Holds the current conversion. Every load replaces it as a whole.
#[derive(Debug, Default)]
pub struct Converter {
    current: Option<Conversion>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and extracts `raw`. The previous conversion is dropped first, so
    /// a failed load leaves nothing behind to export.
    pub fn load(&mut self, raw: RawDocument) -> Result<&Conversion> {
        self.clear();

        let doc = parse(raw.text())?;
        let records = extract(&doc)?;
        tracing::info!("Loaded {} bookmarks from {}", records.len(), raw.name());

        Ok(&*self.current.insert(Conversion {
            base_name: raw.base_name(),
            source_name: raw.name().to_string(),
            records,
            document: doc,
        }))
    }

    pub fn current(&self) -> Option<&Conversion> {
        self.current.as_ref()
    }

    /// Forgets the current conversion, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn can_export(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|conversion| !conversion.records.is_empty())
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact> {
        self.export_with(&TabularExporter::new(format))
    }

    pub fn export_with(&self, exporter: &TabularExporter) -> Result<ExportArtifact> {
        let conversion = self
            .current
            .as_ref()
            .ok_or(ConvertError::NothingToExportError)?;
        exporter.export_table(&conversion.records, &conversion.base_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
  <key>PayloadContent</key>
  <array>
    <dict>
      <key>AllowListBookmarks</key>
      <array>
        <dict><key>URL</key><string>https://a.com</string><key>Title</key><string>A</string></dict>
      </array>
    </dict>
  </array>
</dict>
</plist>"#;

    const EMPTY_PROFILE: &str = r#"<plist><dict><key>PayloadContent</key><array><dict><key>AllowListBookmarks</key><array/></dict></array></dict></plist>"#;

    #[test]
    fn test_load_then_export() {
        let mut converter = Converter::new();
        let conversion = converter.load(RawDocument::new("profile.plist", PROFILE)).unwrap();
        assert_eq!(conversion.base_name, "profile");
        assert_eq!(conversion.records.len(), 1);
        assert!(converter.can_export());

        let artifact = converter.export(ExportFormat::Xlsx).unwrap();
        assert_eq!(artifact.file_name, "profile.xlsx");
        assert_eq!(converter.current().unwrap().records.len(), 1);
    }

    #[test]
    fn test_failed_load_supersedes_previous_conversion() {
        let mut converter = Converter::new();
        converter.load(RawDocument::new("profile.plist", PROFILE)).unwrap();

        let err = converter
            .load(RawDocument::new("broken.plist", "<plist><dict>"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::ParseError { .. }));
        assert!(converter.current().is_none());
        assert!(!converter.can_export());
        assert!(matches!(
            converter.export(ExportFormat::Xlsx),
            Err(ConvertError::NothingToExportError)
        ));
    }

    #[test]
    fn test_new_load_replaces_records() {
        let mut converter = Converter::new();
        converter.load(RawDocument::new("profile.plist", PROFILE)).unwrap();
        converter.load(RawDocument::new("empty.plist", EMPTY_PROFILE)).unwrap();

        let current = converter.current().unwrap();
        assert_eq!(current.source_name, "empty.plist");
        assert!(current.records.is_empty());
        assert!(!converter.can_export());
        assert!(matches!(
            converter.export(ExportFormat::Csv),
            Err(ConvertError::NothingToExportError)
        ));
    }
}
