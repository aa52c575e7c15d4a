use crate::{JsonValue, Record, record, statics};
use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

/// A loaded parameters file. Keeps the source bytes so an unmodified document
/// saves back byte-for-byte.
#[derive(Debug, Clone)]
pub struct ParamsDocument {
    pub source_path: Option<PathBuf>,
    pub line_ending: LineEnding,
    pub original_bytes: Vec<u8>,
    pub root: JsonValue,
    pub dirty: bool,
}

impl ParamsDocument {
    /// Read and parse `path`, then decode its records. Nothing is kept if any
    /// step fails.
    pub fn load_path(path: &Path) -> anyhow::Result<(Self, Vec<Record>)> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let mut doc = Self::from_bytes(bytes)?;
        doc.source_path = Some(path.to_path_buf());
        let records = record::decode(&doc.root).context("reading parameters")?;
        Ok((doc, records))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let line_ending = detect_line_ending(&bytes);
        let text = std::str::from_utf8(&bytes).context("file is not valid UTF-8")?;
        // Tolerate the BOM some Windows editors write.
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let root = JsonValue::parse(text).context("parsing JSON")?;

        Ok(Self {
            source_path: None,
            line_ending,
            original_bytes: bytes,
            root,
            dirty: false,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the source document carried a `Parameters` list at all.
    pub fn has_parameters(&self) -> bool {
        self.root.get(statics::P_PARAMETERS).is_some()
    }

    /// Write `records` into the root value and render it.
    pub fn generate_bytes(&mut self, records: &[Record]) -> Vec<u8> {
        record::encode(&mut self.root, records);
        let newline = match self.line_ending {
            LineEnding::Lf => statics::NL_LF,
            LineEnding::CrLf => statics::NL_CRLF,
        };
        self.root.to_pretty_json_with_newline(newline).into_bytes()
    }

    /// Bytes to write for `records`: the original bytes when nothing changed.
    pub fn save_bytes(&mut self, records: &[Record]) -> Vec<u8> {
        if !self.dirty {
            return self.original_bytes.clone();
        }
        self.generate_bytes(records)
    }

    pub fn save_to_path(&mut self, path: &Path, records: &[Record]) -> anyhow::Result<()> {
        let bytes = self.save_bytes(records);
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;

        self.source_path = Some(path.to_path_buf());
        self.original_bytes = bytes;
        self.dirty = false;
        Ok(())
    }
}

fn detect_line_ending(text_bytes: &[u8]) -> LineEnding {
    // Count actual newline terminators; a stray CRLF in an LF file should not
    // flip the whole document.
    let mut lf_count = 0usize;
    let mut crlf_count = 0usize;

    for (i, b) in text_bytes.iter().enumerate() {
        if *b != b'\n' {
            continue;
        }
        if i > 0 && text_bytes[i - 1] == b'\r' {
            crlf_count += 1;
        } else {
            lf_count += 1;
        }
    }

    if crlf_count > lf_count {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

#[cfg(test)]
mod tests {
    use super::{LineEnding, ParamsDocument, detect_line_ending};

    #[test]
    fn detect_line_ending_uses_majority() {
        let mostly_lf = b"{\n  \"a\": 1,\n  \"b\": 2,\r\n  \"c\": 3\n}\n";
        assert_eq!(detect_line_ending(mostly_lf), LineEnding::Lf);

        let mostly_crlf = b"{\r\n  \"a\": 1,\r\n  \"b\": 2,\n  \"c\": 3\r\n}\r\n";
        assert_eq!(detect_line_ending(mostly_crlf), LineEnding::CrLf);
    }

    #[test]
    fn from_bytes_accepts_bom_and_rejects_garbage() {
        let doc = ParamsDocument::from_bytes(b"\xEF\xBB\xBF{\"Parameters\": []}".to_vec()).unwrap();
        assert!(doc.has_parameters());
        assert!(!doc.dirty);

        assert!(ParamsDocument::from_bytes(b"{ not json".to_vec()).is_err());
        assert!(ParamsDocument::from_bytes(vec![0xFF, 0xFE, 0x00]).is_err());
    }

    #[test]
    fn clean_document_saves_original_bytes() {
        let input = b"{\"Parameters\":[],\"Other\":1}".to_vec();
        let mut doc = ParamsDocument::from_bytes(input.clone()).unwrap();
        assert_eq!(doc.save_bytes(&[]), input);

        doc.mark_dirty();
        let out = String::from_utf8(doc.save_bytes(&[])).unwrap();
        assert_eq!(out, "{\n    \"Parameters\": [],\n    \"Other\": 1\n}");
    }
}
