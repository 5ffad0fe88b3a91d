use crate::core::export::TabularExporter;
use crate::core::session::Converter;
use crate::core::Storage;
use crate::domain::model::{Conversion, RawDocument};
use crate::utils::error::Result;
use crate::utils::validation::validate_source_file_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub conversion: Conversion,
    /// Name the artifact was stored under; `None` when there was nothing to export.
    pub artifact_name: Option<String>,
}

/// Reads a plist through `source`, converts it and writes the artifact
/// through `sink`.
pub struct ConversionEngine<S: Storage> {
    source: S,
    sink: S,
    exporter: TabularExporter,
    converter: Converter,
}

impl<S: Storage> ConversionEngine<S> {
    pub fn new(source: S, sink: S, exporter: TabularExporter) -> Self {
        Self {
            source,
            sink,
            exporter,
            converter: Converter::new(),
        }
    }

    pub fn current(&self) -> Option<&Conversion> {
        self.converter.current()
    }

    /// Loads a new selection. Whatever was loaded before is gone as soon as
    /// this is called, even if the new file is rejected.
    pub async fn load_file(&mut self, path: &str) -> Result<&Conversion> {
        self.converter.clear();
        validate_source_file_name(path)?;

        tracing::info!("Reading {}", path);
        let bytes = self.source.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let raw = RawDocument::from_bytes(path, &bytes)?;
        self.converter.load(raw)
    }

    /// Exports the current conversion and stores it. An empty collection
    /// leaves export disabled and writes nothing.
    pub async fn save(&self) -> Result<Option<String>> {
        if !self.converter.can_export() {
            let source = self
                .converter
                .current()
                .map(|c| c.source_name.as_str())
                .unwrap_or("document");
            tracing::warn!("{} has no bookmarks, nothing to export", source);
            return Ok(None);
        }

        let artifact = self.converter.export_with(&self.exporter)?;
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            artifact.file_name,
            artifact.bytes.len()
        );
        self.sink
            .write_file(&artifact.file_name, &artifact.bytes)
            .await?;

        tracing::info!("Exported {}", artifact.file_name);
        Ok(Some(artifact.file_name))
    }

    pub async fn convert_file(&mut self, path: &str) -> Result<ConversionOutcome> {
        let conversion = self.load_file(path).await?.clone();
        let artifact_name = self.save().await?;
        Ok(ConversionOutcome {
            conversion,
            artifact_name,
        })
    }
}
