/*!
 * Tests for the page transform on full page documents
 */

use anyhow::Result;
use pagegloss::errors::TransformError;
use pagegloss::glossary::{Glossary, TermMatcher};
use pagegloss::page::PageTransform;
use crate::common;

fn builtin_transform() -> Result<PageTransform> {
    Ok(PageTransform::new(TermMatcher::new(&Glossary::builtin())?, 457))
}

/// Test the page header is localized with the configured total
#[test]
fn test_translate_samplePage_shouldLocalizeStructure() -> Result<()> {
    let transform = builtin_transform()?;
    let page = common::sample_page(7, "Agriculture flourished in the Fertile Crescent.");

    let result = transform.translate(&page, 7)?;

    assert!(result.contains("<html lang=\"ro\">"));
    assert!(result.contains("<h1>Pagina 7 din 457</h1>"));
    assert!(result.contains("<p class=\"breadcrumb\">📖 Arme, Germeni și Oțel: Soarta Societăților Umane</p>"));
    assert!(result.contains("<h2>Conținut Original</h2>"));
    assert!(result.contains("<h2>📚 Analiză Educațională</h2>"));
    assert!(result.contains("<h3>Rezumat</h3>"));
    assert!(result.contains("<p>Agricultură a prosperat în the Fertile Crescent.</p>"));
    assert!(result.contains("<div class=\"text-content\">"));
    assert!(result.starts_with("<!DOCTYPE html>"));
    Ok(())
}

/// Test that only the header line changes when nothing else matches
#[test]
fn test_translate_headerOnly_shouldLeaveRestByteIdentical() -> Result<()> {
    let transform = PageTransform::new(TermMatcher::new(&Glossary::new())?, 457);
    let page = "<div id=\"page\">\n  <h1>Page 7 of 457</h1>\n  <span data-x=\"Page 7 of 457\"></span>\n</div>\n";

    let result = transform.translate(page, 7)?;

    assert_eq!(
        result,
        "<div id=\"page\">\n  <h1>Pagina 7 din 457</h1>\n  <span data-x=\"Page 7 of 457\"></span>\n</div>\n"
    );
    Ok(())
}

/// Test the total page count comes from the transform, not the input
#[test]
fn test_translate_customTotal_shouldAppearInHeader() -> Result<()> {
    let transform = PageTransform::new(TermMatcher::new(&Glossary::new())?, 460);

    let result = transform.translate("<h1>Page 99 of 457</h1>", 99)?;

    assert_eq!(result, "<h1>Pagina 99 din 460</h1>");
    assert_eq!(transform.total_pages(), 460);
    Ok(())
}

/// Test that malformed markup fails the whole page
#[test]
fn test_translate_unterminatedTag_shouldFailWithoutOutput() -> Result<()> {
    let transform = builtin_transform()?;

    let result = transform.translate("<h1>Page 1 of 457</h1><p class=\"x\"", 1);

    assert!(matches!(result, Err(TransformError::UnterminatedTag { .. })));
    Ok(())
}
