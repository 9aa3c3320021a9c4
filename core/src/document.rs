use crate::error::{Error, Result};
use crate::tokenizer;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A single text of the corpus together with its token stream.
///
/// A document starts out raw; `process` runs tokenize, clean and dedupe in that order
/// and then releases the raw text. Only its byte length is kept, see [`Document::size`].
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    raw_text: String,
    size: usize,
    tokens: Vec<String>,
    unique_tokens: HashSet<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            title: title.into(),
            size: raw_text.len(),
            raw_text,
            tokens: Vec::new(),
            unique_tokens: HashSet::new(),
        }
    }

    /// Read a UTF-8 file; the title is the file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw_text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(title, raw_text))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Byte length of the text the document was built from.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn unique_tokens(&self) -> &HashSet<String> {
        &self.unique_tokens
    }

    pub fn tokenize(&mut self) -> &[String] {
        self.set_tokens(tokenizer::tokenize(&self.raw_text));
        &self.tokens
    }

    pub fn clean(&mut self) -> Result<&[String]> {
        let cleaned = tokenizer::clean(&self.tokens)?;
        self.set_tokens(cleaned);
        Ok(&self.tokens)
    }

    pub fn process(&mut self) -> Result<&HashSet<String>> {
        self.tokenize();
        self.clean()?;
        self.raw_text = String::new();
        Ok(&self.unique_tokens)
    }

    fn set_tokens(&mut self, tokens: Vec<String>) {
        self.unique_tokens = tokenizer::unique(&tokens);
        self.tokens = tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_runs_full_pipeline() {
        let mut doc = Document::new("d", "The cat sat. The cat!");
        let unique = doc.process().unwrap().clone();
        assert_eq!(doc.tokens(), ["the", "cat", "sat", "the", "cat"]);
        assert_eq!(unique.len(), 3);
        assert!(unique.contains("sat"));
    }

    #[test]
    fn processing_releases_text_but_keeps_size() {
        let mut doc = Document::new("d", "Café au lait.");
        doc.process().unwrap();
        assert_eq!(doc.size(), "Café au lait.".len());
        assert!(doc.raw_text.is_empty());
        assert_eq!(doc.tokens(), ["café", "au", "lait"]);
    }

    #[test]
    fn clean_before_tokenize_fails() {
        let mut doc = Document::new("d", "some text");
        assert!(matches!(doc.clean(), Err(Error::EmptyTokenState)));
    }

    #[test]
    fn blank_text_fails_processing() {
        let mut doc = Document::new("blank", "   \n");
        assert!(matches!(doc.process(), Err(Error::EmptyTokenState)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Document::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
