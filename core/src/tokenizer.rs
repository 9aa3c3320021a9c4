use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Words may be joined by `-`, `.` or `'` (well-known, 3.14, it's); any other
    // non-space character stands on its own.
    static ref RE: Regex = Regex::new(r"(?u)\w+(?:[-.']\w+)*|[^\w\s]").expect("valid regex");
}

/// Contraction endings split off into their own token.
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'re", "'ve", "'ll"];

fn clitic_at(word: &str) -> Option<usize> {
    CLITICS.iter().find_map(|clitic| {
        let at = word.len().checked_sub(clitic.len())?;
        (at > 0 && word.is_char_boundary(at) && word[at..].eq_ignore_ascii_case(clitic)).then_some(at)
    })
}

fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

/// Split text into word and punctuation tokens, keeping their original order and case.
///
/// Hyphenated words and decimals stay whole; contractions become two tokens
/// ("It's" -> "It", "'s"; "don't" -> "do", "n't").
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in RE.find_iter(text) {
        let word = m.as_str();
        match clitic_at(word) {
            Some(at) => {
                tokens.push(word[..at].to_string());
                tokens.push(word[at..].to_string());
            }
            None => tokens.push(word.to_string()),
        }
    }
    tokens
}

/// Drop single-character punctuation tokens and lowercase the rest.
///
/// Order and duplicates are preserved. Fails with [`Error::EmptyTokenState`] when there is
/// nothing to clean, which is the state of a document that was never tokenized.
pub fn clean(tokens: &[String]) -> Result<Vec<String>> {
    if tokens.is_empty() {
        return Err(Error::EmptyTokenState);
    }
    Ok(tokens
        .iter()
        .filter(|t| !is_punctuation(t))
        .map(|t| t.to_lowercase())
        .collect())
}

pub fn unique(tokens: &[String]) -> HashSet<String> {
    tokens.iter().cloned().collect()
}
