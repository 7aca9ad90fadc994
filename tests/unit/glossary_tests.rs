/*!
 * Tests for glossary loading and term matching
 */

use anyhow::Result;
use pagegloss::errors::GlossaryError;
use pagegloss::glossary::{Glossary, TermMatcher};
use crate::common;

fn matcher(pairs: &[(&str, &str)]) -> Result<TermMatcher> {
    let glossary = Glossary::from_pairs(pairs.iter().copied())?;
    Ok(TermMatcher::new(&glossary)?)
}

/// Test that a JSON glossary file keeps entry order and resolves duplicates
#[test]
fn test_from_json_file_withDuplicates_shouldKeepLastTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "glossary.json",
        r#"[
            {"source": "war", "target": "luptă"},
            {"source": "steel", "target": "oțel"},
            {"source": "war", "target": "război"}
        ]"#,
    )?;

    let glossary = Glossary::from_json_file(&path)?;

    assert_eq!(glossary.len(), 2);
    assert_eq!(glossary.entries()[0].source, "war");
    assert_eq!(glossary.entries().iter().find(|e| e.source == "war").map(|e| e.target.as_str()), Some("război"));
    Ok(())
}

/// Test that an invalid glossary file is reported as a parse error
#[test]
fn test_from_json_file_withObjectInsteadOfList_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "glossary.json", r#"{"war": "război"}"#)?;

    let result = Glossary::from_json_file(&path);

    assert!(matches!(result, Err(GlossaryError::Parse { .. })));
    Ok(())
}

/// Test that a missing glossary file is reported as a read error
#[test]
fn test_from_json_file_withMissingFile_shouldFail() {
    let result = Glossary::from_json_file("no_such_glossary.json");

    assert!(matches!(result, Err(GlossaryError::Read { .. })));
}

/// Test that empty sources in a glossary file are rejected
#[test]
fn test_from_json_file_withEmptySource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "glossary.json",
        r#"[{"source": "", "target": "x"}]"#,
    )?;

    let result = Glossary::from_json_file(&path);

    assert!(matches!(result, Err(GlossaryError::EmptySource { index: 0 })));
    Ok(())
}

/// Test the longest-match preference with a capitalized span
#[test]
fn test_apply_catsExample_shouldPreferLongerKey() -> Result<()> {
    let m = matcher(&[("cat", "pisică"), ("cats", "pisici")])?;

    assert_eq!(m.apply("The Cats"), "The Pisici");
    assert_eq!(m.apply("one cat, two cats"), "one pisică, two pisici");
    Ok(())
}

/// Test full uppercase mirroring with a non-ASCII target
#[test]
fn test_apply_upperCaseWord_shouldUppercaseDiacritics() -> Result<()> {
    let m = matcher(&[("war", "război")])?;

    assert_eq!(m.apply("WAR"), "RĂZBOI");
    Ok(())
}

/// Test the built-in glossary on a realistic sentence
#[test]
fn test_apply_builtinGlossary_shouldTranslatePhrasesBeforeWords() -> Result<()> {
    let m = TermMatcher::new(&Glossary::builtin())?;

    let result = m.apply("Geography determines the fate of human societies");

    assert_eq!(result, "Geografie determină the fate din societăți umane");
    Ok(())
}

/// Test the chosen policy: one call never re-translates its own output,
/// but a second call may
#[test]
fn test_apply_policy_singlePassButNotIdempotent() -> Result<()> {
    let m = matcher(&[("published", "publicată"), ("Published by", "Publicată de"), ("by", "de")])?;

    let once = m.apply("Published by Norton");
    assert_eq!(once, "Publicată de Norton");

    let m = matcher(&[("landmark work on", "lucrare de referință despre"), ("work", "muncă")])?;
    let once = m.apply("a landmark work on");
    assert_eq!(once, "a lucrare de referință despre");
    assert_eq!(m.apply(&once), once);

    let m = matcher(&[("central inquiry", "investigația centrală"), ("centrală", "x")])?;
    let once = m.apply("central inquiry");
    assert_eq!(once, "investigația centrală");
    assert_ne!(m.apply(&once), once);
    Ok(())
}
