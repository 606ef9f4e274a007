//! Property tests for the field validators.

use blog_core::model::author::{validate_name, validate_phone_number};
use blog_core::model::post::{
    validate_category, validate_content, validate_summary, validate_title, CLICKBAIT_MARKERS,
    CONTENT_MIN_CHARS, SUMMARY_MAX_CHARS,
};
use proptest::prelude::*;

/// Decimal digits (Unicode `Nd`) among the scripts the generators draw from:
/// ASCII, Arabic-Indic and full-width.
fn is_decimal_digit_in_sample_alphabet(c: char) -> bool {
    c.is_ascii_digit() || ('٠'..='٩').contains(&c) || ('０'..='９').contains(&c)
}

proptest! {
    #[test]
    fn phone_number_accepts_iff_ten_decimal_digits(value in "[0-9٠-٩０-９a-zＡ-Ｚ() .\\-]{8,12}") {
        let expected =
            value.chars().count() == 10 && value.chars().all(is_decimal_digit_in_sample_alphabet);
        prop_assert_eq!(validate_phone_number(&value).is_ok(), expected);
    }

    #[test]
    fn any_ten_digit_string_is_a_phone_number(value in "[0-9٠-٩０-９]{10}") {
        prop_assert_eq!(validate_phone_number(&value), Ok(value.as_str()));
    }

    #[test]
    fn content_accepts_iff_at_least_min_chars(value in "\\PC{200,300}") {
        let expected = value.chars().count() >= CONTENT_MIN_CHARS;
        prop_assert_eq!(validate_content(&value).is_ok(), expected);
    }

    #[test]
    fn summary_accepts_iff_at_most_max_chars(value in "\\PC{200,300}") {
        let expected = value.chars().count() <= SUMMARY_MAX_CHARS;
        prop_assert_eq!(validate_summary(&value).is_ok(), expected);
    }

    #[test]
    fn title_accepts_iff_it_contains_a_marker(value in "\\PC{0,40}") {
        let expected = CLICKBAIT_MARKERS.iter().any(|marker| value.contains(marker));
        prop_assert_eq!(validate_title(&value).is_ok(), expected);
    }

    #[test]
    fn marker_anywhere_in_title_is_accepted(
        prefix in "\\PC{0,20}",
        suffix in "\\PC{0,20}",
        marker in prop::sample::select(CLICKBAIT_MARKERS.to_vec()),
    ) {
        let title = format!("{prefix}{marker}{suffix}");
        prop_assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn category_accepts_only_exact_names(value in "\\PC{0,12}") {
        let expected = value == "Fiction" || value == "Non-Fiction";
        prop_assert_eq!(validate_category(&value).is_ok(), expected);
    }

    #[test]
    fn non_empty_names_pass_through_unchanged(value in "\\PC{1,30}") {
        prop_assert_eq!(validate_name(&value), Ok(value.as_str()));
    }
}
