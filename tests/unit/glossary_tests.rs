/*!
 * Tests for glossary construction and keyword resolution
 */

use anyhow::Result;
use texsub::errors::GlossaryError;
use texsub::glossary::{Glossary, column_index};

fn pair(source: &str, canonical: &str) -> (Option<String>, Option<String>) {
    (Some(source.to_string()), Some(canonical.to_string()))
}

/// Test that cleaning removes exactly the pairs with missing canonical values
#[test]
fn test_from_pairs_withMissingCanonicals_shouldDropInvalidRows() {
    let glossary = Glossary::from_pairs(vec![
        pair("城市", "city"),
        (Some("街道".to_string()), None),
        pair("姓名", "name"),
        (Some("电话".to_string()), None),
    ]);

    // 4 raw pairs, 2 invalid: cleaned mapping has exactly 2 entries
    assert_eq!(glossary.len(), 2);
    assert_eq!(glossary.resolve("城市"), Some("city"));
    assert_eq!(glossary.resolve("姓名"), Some("name"));
    assert_eq!(glossary.resolve("街道"), None);
}

/// Test that duplicate source keywords are last-write-wins
#[test]
fn test_from_pairs_withDuplicateSource_shouldKeepLastValue() {
    let glossary = Glossary::from_pairs(vec![pair("城市", "town"), pair("城市", "city")]);

    assert_eq!(glossary.len(), 1);
    assert_eq!(glossary.resolve("城市"), Some("city"));
}

/// Test that fully empty rows are skipped without creating entries
#[test]
fn test_from_pairs_withEmptyRows_shouldSkipThem() {
    let glossary = Glossary::from_pairs(vec![(None, None), pair("城市", "city"), (None, None)]);

    assert_eq!(glossary.len(), 1);
}

/// Test that the sentinel keyword never resolves, even when present as a key
#[test]
fn test_resolve_withSentinelKeyword_shouldReturnNone() {
    let glossary = Glossary::from_pairs(vec![pair("None", "nothing"), pair("城市", "city")]);

    assert_eq!(glossary.resolve("None"), None);
    assert_eq!(glossary.resolve("城市"), Some("city"));
}

/// Test that an unknown keyword resolves to nothing
#[test]
fn test_resolve_withUnknownKeyword_shouldReturnNone() {
    let glossary = Glossary::from_pairs(vec![pair("城市", "city")]);

    assert_eq!(glossary.resolve("街道"), None);
}

/// Test column letter conversion for single and double letters
#[test]
fn test_column_index_withValidLetters_shouldReturnZeroBasedIndex() -> Result<()> {
    assert_eq!(column_index("A")?, 0);
    assert_eq!(column_index("N")?, 13);
    assert_eq!(column_index("O")?, 14);
    assert_eq!(column_index("Z")?, 25);
    assert_eq!(column_index("AA")?, 26);
    assert_eq!(column_index("o")?, 14);
    Ok(())
}

/// Test that malformed column identifiers are rejected
#[test]
fn test_column_index_withInvalidLetters_shouldReturnError() {
    assert!(matches!(
        column_index(""),
        Err(GlossaryError::InvalidColumn(_))
    ));
    assert!(matches!(
        column_index("1"),
        Err(GlossaryError::InvalidColumn(_))
    ));
    assert!(matches!(
        column_index("A1"),
        Err(GlossaryError::InvalidColumn(_))
    ));
}

/// Test that a missing workbook is a structural (fatal) error
#[test]
fn test_from_workbook_withMissingFile_shouldReturnError() {
    let result = Glossary::from_workbook("./does_not_exist.xlsx", "变量名词", "O", "N");

    assert!(matches!(result, Err(GlossaryError::WorkbookOpen(_))));
}
