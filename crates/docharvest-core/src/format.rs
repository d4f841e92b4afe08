//! Input format tags for batch ingestion
//!
//! Formats are selected purely by file extension (case-insensitive), the
//! same lookup the dispatcher's registry is keyed on.

use serde::{Deserialize, Serialize};

/// Extension-derived document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileKind {
    /// Microsoft Word document (.docx)
    Docx,
    /// PDF document
    Pdf,
    /// Microsoft Excel workbook (.xlsx)
    Xlsx,
    /// PNG image
    Png,
    /// JPEG image (.jpg, .jpeg)
    Jpeg,
    /// Plain text file
    Txt,
    /// Email message (.eml)
    Eml,
    /// JSON data file
    Json,
    /// XML data file
    Xml,
    /// CSV data file
    Csv,
    /// ZIP archive, expanded rather than extracted directly
    Zip,
}

impl FileKind {
    /// Look up the format for a file extension (without the leading dot).
    ///
    /// Matching is case-insensitive. Returns `None` for extensions with no
    /// registered extractor.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "xlsx" => Some(Self::Xlsx),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "txt" => Some(Self::Txt),
            "eml" => Some(Self::Eml),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "csv" => Some(Self::Csv),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }

    /// Look up the format for a path's extension.
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension for this format, with the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Docx => ".docx",
            Self::Pdf => ".pdf",
            Self::Xlsx => ".xlsx",
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Txt => ".txt",
            Self::Eml => ".eml",
            Self::Json => ".json",
            Self::Xml => ".xml",
            Self::Csv => ".csv",
            Self::Zip => ".zip",
        }
    }

    /// Whether this format is routed through the OCR stack.
    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }

    /// Whether this format is a meta-format expanded into child documents.
    #[must_use]
    pub const fn is_archive(self) -> bool {
        matches!(self, Self::Zip)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
