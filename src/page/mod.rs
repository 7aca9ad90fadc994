/*!
 * Page transform: turns one English page into a Romanian skeleton.
 *
 * A transform runs in two steps:
 * - fixed structural replacements (document language, page header,
 *   breadcrumb, section headings)
 * - glossary substitution over the inline text spans found by the
 *   markup scanner
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::collections::HashSet;

use crate::errors::TransformError;
use crate::glossary::TermMatcher;

pub mod markup;

use self::markup::Span;

/// Page header such as `<h1>Page 7 of 457</h1>`
static PAGE_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h1>Page \d+ of \d+</h1>").unwrap());

const LANG_ATTRIBUTE: (&str, &str) = (r#"<html lang="en">"#, r#"<html lang="ro">"#);

const BREADCRUMB: (&str, &str) = (
    "📖 Guns, Germs, and Steel: The Fates of Human Societies",
    "📖 Arme, Germeni și Oțel: Soarta Societăților Umane",
);

const SECTION_HEADINGS: &[(&str, &str)] = &[
    ("Original Content", "Conținut Original"),
    ("Educational Analysis", "Analiză Educațională"),
    ("Summary", "Rezumat"),
    ("Key Concepts", "Concepte Cheie"),
    ("Historical & Geographic Context", "Context Istoric și Geografic"),
    ("Connection to Main Thesis", "Conexiune cu Teza Principală"),
];

/// Structural and glossary transform for single pages
#[derive(Debug, Clone)]
pub struct PageTransform {
    matcher: TermMatcher,
    total_pages: u32,
}

impl PageTransform {
    /// Create a transform; `total_pages` is the count shown in page headers.
    pub fn new(matcher: TermMatcher, total_pages: u32) -> Self {
        Self {
            matcher,
            total_pages,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Transform a whole document. On failure no partial output is produced.
    pub fn translate(&self, document: &str, page_number: u32) -> Result<String, TransformError> {
        let mut localized = HashSet::new();
        let structured = self.apply_structure(document, page_number, &mut localized);
        self.apply_glossary(&structured, &localized)
    }

    fn apply_structure(
        &self,
        document: &str,
        page_number: u32,
        localized: &mut HashSet<String>,
    ) -> String {
        let mut result = document.replace(LANG_ATTRIBUTE.0, LANG_ATTRIBUTE.1);

        let header = format!("Pagina {} din {}", page_number, self.total_pages);
        result = PAGE_HEADER_REGEX
            .replace_all(&result, NoExpand(&format!("<h1>{}</h1>", header)))
            .into_owned();
        localized.insert(header);

        result = result.replace(
            &format!(r#"<p class="breadcrumb">{}</p>"#, BREADCRUMB.0),
            &format!(r#"<p class="breadcrumb">{}</p>"#, BREADCRUMB.1),
        );
        localized.insert(BREADCRUMB.1.to_string());

        for (english, romanian) in SECTION_HEADINGS {
            result = result.replace(
                &format!("<h2>{}</h2>", english),
                &format!("<h2>{}</h2>", romanian),
            );
            result = result.replace(
                &format!("<h3>{}</h3>", english),
                &format!("<h3>{}</h3>", romanian),
            );
            result = result.replace(
                &format!("<h2>📚 {}</h2>", english),
                &format!("<h2>📚 {}</h2>", romanian),
            );
            localized.insert((*romanian).to_string());
            localized.insert(format!("📚 {}", romanian));
        }

        result
    }

    fn apply_glossary(
        &self,
        document: &str,
        localized: &HashSet<String>,
    ) -> Result<String, TransformError> {
        let spans = markup::scan(document)?;
        let mut output = String::with_capacity(document.len() + document.len() / 4);
        let mut translated_spans = 0;

        for (i, span) in spans.iter().enumerate() {
            match span {
                Span::Text(text) if Self::is_inline(&spans, i) && Self::is_candidate(text, localized) => {
                    output.push_str(&self.matcher.apply(text));
                    translated_spans += 1;
                }
                other => output.push_str(other.as_str()),
            }
        }

        debug!("Applied glossary to {} text spans", translated_spans);
        Ok(output)
    }

    // Text counts as inline only when enclosed by a `>` before and a `<` after.
    fn is_inline(spans: &[Span<'_>], index: usize) -> bool {
        let after_tag = index > 0 && spans[index - 1].is_tag();
        let before_tag = spans.get(index + 1).is_some_and(Span::is_tag);
        after_tag && before_tag
    }

    fn is_candidate(text: &str, localized: &HashSet<String>) -> bool {
        let trimmed = text.trim();
        !trimmed.is_empty() && !trimmed.starts_with('{') && !localized.contains(trimmed)
    }
}
