/*!
 * Tag/text span scanner for HTML page text.
 *
 * This is not an HTML parser. It only splits a document into tags, text
 * runs and the raw bodies of `<script>`/`<style>` elements, so callers can
 * rewrite text without touching markup. Concatenating every span's text
 * reproduces the input exactly.
 */

use crate::errors::TransformError;

/// Elements whose bodies are raw text rather than markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A contiguous slice of the scanned document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// A tag, comment or declaration, including its angle brackets
    Tag(&'a str),
    /// Character data between tags
    Text(&'a str),
    /// Body of a raw text element, never a translation candidate
    RawText(&'a str),
}

impl<'a> Span<'a> {
    /// Source text of the span
    pub fn as_str(&self) -> &'a str {
        match self {
            Span::Tag(s) | Span::Text(s) | Span::RawText(s) => s,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Span::Tag(_))
    }
}

/// Iterator over the spans of a document
pub struct MarkupScanner<'a> {
    input: &'a str,
    pos: usize,
    // Set after an opening raw text tag until its body has been emitted.
    raw_element: Option<&'static str>,
}

impl<'a> MarkupScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_element: None,
        }
    }

    fn scan_tag(&mut self) -> Result<Span<'a>, TransformError> {
        let start = self.pos;
        let rest = &self.input[start..];

        let (closer, skip) = if rest.starts_with("<!--") { ("-->", 4) } else { (">", 1) };
        let Some(found) = rest[skip..].find(closer) else {
            self.pos = self.input.len();
            return Err(TransformError::UnterminatedTag { offset: start });
        };

        let end = start + skip + found + closer.len();
        self.pos = end;
        let tag = &self.input[start..end];
        self.raw_element = opening_raw_element(tag);
        Ok(Span::Tag(tag))
    }

    fn scan_raw_text(&mut self, element: &str) -> Span<'a> {
        let start = self.pos;
        let closing = format!("</{}", element);
        let end = find_ascii_case_insensitive(&self.input[start..], &closing)
            .map_or(self.input.len(), |found| start + found);
        self.pos = end;
        Span::RawText(&self.input[start..end])
    }

    fn scan_text(&mut self) -> Span<'a> {
        let start = self.pos;
        let end = self.input[start..]
            .find('<')
            .map_or(self.input.len(), |found| start + found);
        self.pos = end;
        Span::Text(&self.input[start..end])
    }
}

impl<'a> Iterator for MarkupScanner<'a> {
    type Item = Result<Span<'a>, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        if let Some(element) = self.raw_element.take() {
            let span = self.scan_raw_text(element);
            if !span.as_str().is_empty() {
                return Some(Ok(span));
            }
        }

        if self.input[self.pos..].starts_with('<') {
            Some(self.scan_tag())
        } else {
            Some(Ok(self.scan_text()))
        }
    }
}

/// Split a whole document into spans, failing on the first malformed tag.
pub fn scan(input: &str) -> Result<Vec<Span<'_>>, TransformError> {
    MarkupScanner::new(input).collect()
}

/// Lowercased element name of a start or end tag, with its closing flag.
pub fn tag_name(tag: &str) -> Option<(bool, String)> {
    let inner = tag.strip_prefix('<')?;
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        return None;
    }
    Some((closing, name.to_ascii_lowercase()))
}

fn opening_raw_element(tag: &str) -> Option<&'static str> {
    let (closing, name) = tag_name(tag)?;
    if closing || tag.ends_with("/>") {
        return None;
    }
    RAW_TEXT_ELEMENTS.iter().copied().find(|element| *element == name)
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
