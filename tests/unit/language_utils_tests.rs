/*!
 * Tests for ISO language code utilities
 */

use archivist::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1_or_part2t, normalize_to_part2t,
    validate_language_code,
};

#[test]
fn test_validateLanguageCode_withIsoCodes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("deu").is_ok());
    assert!(validate_language_code("FR").is_ok());
}

#[test]
fn test_validateLanguageCode_withGarbage_shouldReject() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("abcd").is_err());
}

#[test]
fn test_validateLanguageCode_withIso6393OnlyCode_shouldReject() {
    // Ambala Ayta exists in ISO 639-3 but not in 639-1 or 639-2
    assert!(validate_language_code("abc").is_err());
    assert!(get_language_name("abc").is_err());
    assert!(validate_language_code("deu").is_ok());
    assert!(validate_language_code("fre").is_ok());
}

#[test]
fn test_normalizeToPart2t_shouldMapBibliographicCodes() {
    assert_eq!(normalize_to_part2t("de").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
}

#[test]
fn test_normalizeToPart1OrPart2t_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_to_part1_or_part2t("deu").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t("en").unwrap(), "en");
}

#[test]
fn test_languageCodesMatch_acrossCodeForms() {
    assert!(language_codes_match("de", "ger"));
    assert!(language_codes_match("fra", "fr"));
    assert!(!language_codes_match("en", "de"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fre").unwrap(), "French");
    assert_eq!(get_language_name("en").unwrap(), "English");
}
