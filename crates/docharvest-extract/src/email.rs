//! EML (email message) extractor
//!
//! Parses RFC 5322 messages with mail-parser. The content string embeds the
//! subject, sender, recipient, and date headers followed by the
//! concatenated plain-text body parts; HTML-only parts are ignored.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};
use mail_parser::{Addr, MessageParser};

/// Email message extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmlExtractor;

impl EmlExtractor {
    /// Create a new EML extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for EmlExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Eml
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let message = MessageParser::default().parse(&doc.bytes).ok_or_else(|| {
            ExtractError::ParseFailure("could not parse email message".to_string())
        })?;

        let subject = message.subject().unwrap_or_default().to_string();
        let sender = message
            .from()
            .and_then(|addrs| addrs.first())
            .map(format_address)
            .unwrap_or_default();
        let recipient = message
            .to()
            .and_then(|addrs| addrs.first())
            .map(format_address)
            .unwrap_or_default();
        // Raw Date header preserved as written; parsed form only as backup
        let date = message
            .header_raw("Date")
            .map(|d| d.trim().to_string())
            .or_else(|| message.date().map(mail_parser::DateTime::to_rfc3339))
            .unwrap_or_default();

        let body: String = message
            .text_bodies()
            .filter_map(|part| part.text_contents())
            .collect::<Vec<_>>()
            .join("");

        let content = format!(
            "Subject: {subject}\nFrom: {sender}\nTo: {recipient}\nDate: {date}\n\nBody:\n{body}"
        );

        let mut result = ExtractionResult::with_content(content);
        result.set_meta("subject", subject);
        result.set_meta("sender", sender);
        result.set_meta("recipient", recipient);
        Ok(result)
    }
}

/// Render an address as `Name <addr>` when both parts are present.
fn format_address(addr: &Addr<'_>) -> String {
    match (addr.name(), addr.address()) {
        (Some(name), Some(address)) => format!("{name} <{address}>"),
        (None, Some(address)) => address.to_string(),
        (Some(name), None) => name.to_string(),
        (None, None) => String::new(),
    }
}
