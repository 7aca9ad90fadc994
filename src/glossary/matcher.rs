/*!
 * Longest-first glossary substitution with case mirroring.
 *
 * Keys are applied from longest to shortest. Text produced by a replacement
 * is protected: later, shorter keys never rescan it within the same call.
 */

use log::trace;
use regex::{Regex, RegexBuilder};

use super::Glossary;
use crate::errors::GlossaryError;

/// One glossary key compiled into its match pattern
#[derive(Debug, Clone)]
struct CompiledTerm {
    pattern: Regex,
    target: String,
}

/// A run of text that is either still open to matching or already replaced
#[derive(Debug)]
struct Segment {
    text: String,
    replaced: bool,
}

/// Applies a glossary to free text.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms: Vec<CompiledTerm>,
}

impl TermMatcher {
    /// Compile every glossary key, ordered by descending character length.
    ///
    /// Keys of equal length keep their glossary order.
    pub fn new(glossary: &Glossary) -> Result<Self, GlossaryError> {
        let mut entries: Vec<_> = glossary.entries().iter().collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.source.chars().count()));

        let terms = entries
            .into_iter()
            .map(|entry| -> Result<CompiledTerm, GlossaryError> {
                let pattern = RegexBuilder::new(&Self::pattern_for(&entry.source))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| GlossaryError::Pattern {
                        term: entry.source.clone(),
                        source,
                    })?;
                Ok(CompiledTerm {
                    pattern,
                    target: entry.target.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { terms })
    }

    /// Multi-word keys match as literal substrings; single words only on
    /// word boundaries (at edges that are themselves word characters).
    fn pattern_for(source: &str) -> String {
        let escaped = regex::escape(source);
        if source.chars().any(char::is_whitespace) {
            return escaped;
        }

        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let lead = if source.chars().next().is_some_and(is_word) { r"\b" } else { "" };
        let tail = if source.chars().last().is_some_and(is_word) { r"\b" } else { "" };
        format!("{}{}{}", lead, escaped, tail)
    }

    /// Number of compiled keys
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Substitute every glossary key found in `text`.
    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut segments = vec![Segment {
            text: text.to_string(),
            replaced: false,
        }];

        for term in &self.terms {
            let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
            if !term.pattern.is_match(&joined) {
                continue;
            }
            trace!("Glossary hit for pattern '{}'", term.pattern.as_str());
            segments = Self::substitute(segments, &joined, term);
        }

        segments.into_iter().map(|s| s.text).collect()
    }

    /// Replace matches of one term that lie wholly inside open segments.
    ///
    /// Each open segment is searched on its own, with the joined text kept as
    /// context for word boundaries. A hit crossing the segment's end is
    /// retried one character after its start.
    fn substitute(segments: Vec<Segment>, joined: &str, term: &CompiledTerm) -> Vec<Segment> {
        let mut next = Vec::with_capacity(segments.len());
        let mut offset = 0;

        for segment in segments {
            let start = offset;
            let end = offset + segment.text.len();
            offset = end;

            let mut accepted = Vec::new();
            let mut pos = start;
            while !segment.replaced && pos < end {
                let Some(hit) = term.pattern.find_at(joined, pos) else {
                    break;
                };
                if hit.start() >= end {
                    break;
                }
                if hit.end() <= end && hit.end() > hit.start() {
                    accepted.push((hit.start() - start)..(hit.end() - start));
                    pos = hit.end();
                } else {
                    pos = hit.start()
                        + joined[hit.start()..].chars().next().map_or(1, char::len_utf8);
                }
            }

            if accepted.is_empty() {
                next.push(segment);
                continue;
            }

            let mut cursor = 0;
            for range in accepted {
                if range.start > cursor {
                    next.push(Segment {
                        text: segment.text[cursor..range.start].to_string(),
                        replaced: false,
                    });
                }
                next.push(Segment {
                    text: mirror_case(&segment.text[range.clone()], &term.target),
                    replaced: true,
                });
                cursor = range.end;
            }
            if cursor < segment.text.len() {
                next.push(Segment {
                    text: segment.text[cursor..].to_string(),
                    replaced: false,
                });
            }
        }

        next
    }
}

/// Shape `target` after the casing of the matched source span.
fn mirror_case(matched: &str, target: &str) -> String {
    if is_all_uppercase(matched) {
        target.to_uppercase()
    } else if matched.chars().next().is_some_and(char::is_uppercase) {
        capitalize(target)
    } else {
        target.to_string()
    }
}

// True when the span has at least one cased letter and none are lowercase.
fn is_all_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
