use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the file to look for an XML declaration.
const PROLOG_WINDOW: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExport {
    pub xml: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode export bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw export bytes into UTF-8 using: BOM -> XML declaration encoding -> chardetng fallback.
pub fn decode_export(bytes: &[u8]) -> Result<DecodedExport, DecodeError> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    // 2) <?xml version="1.0" encoding="..."?>
    if let Some(label) = declared_encoding(bytes) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // 3) chardetng detection over the whole file
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(PROLOG_WINDOW)];
    let head = String::from_utf8_lossy(window);
    let decl_start = head.find("<?xml")?;
    let decl = &head[decl_start..];
    let decl = &decl[..decl.find("?>")?];
    let after = &decl[decl.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let end = value.find(quote)?;
    Some(value[..end].trim().to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedExport, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedExport {
        xml: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}
