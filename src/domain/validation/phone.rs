//! Phone number normalization and validation.
//!
//! Numbers are stored in the canonical `+998XXXXXXXXX` shape: the country
//! code followed by a 9-digit subscriber body whose first two digits are the
//! operator prefix.

use std::collections::HashSet;

/// Country calling code every accepted number carries.
pub const COUNTRY_CODE: &str = "998";

/// Digits in the subscriber body after the country code.
pub const SUBSCRIBER_DIGITS: usize = 9;

/// Operator prefixes (first two body digits) that are in service.
pub const VALID_OPERATORS: [&str; 31] = [
    "90", "91", "92", "93", "94", "95", "97", "98", "99", // mobile
    "88", "89", // alternative codes
    "50", "51", "55", "60", "61", "62", "65", "66", "67", "68", "69", // mobile operators
    "71", "72", "73", "74", "75", "76", "77", "78", "79", // additional codes
];

/// Normalizes free-form phone input to `+998XXXXXXXXX`.
///
/// Everything except digits and `+` is discarded. Recognised shapes:
///
/// - `+998` or `998` followed by at least 9 digits; the first 9 are kept
/// - a bare subscriber body starting with `9` (no `+`), at least 9 digits;
///   the first 9 are kept
///
/// Any other input with at least 9 digits contributes its trailing 9
/// digits. A recognised shape that is too short yields `None` rather than
/// borrowing digits from the country code.
///
/// The result is not guaranteed to be valid; run it through
/// [`validate_phone`].
pub fn normalize_phone(text: &str) -> Option<String> {
    let has_plus = text.contains('+');
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    let body = if let Some(rest) = digits.strip_prefix(COUNTRY_CODE) {
        rest.get(..SUBSCRIBER_DIGITS)?
    } else if !has_plus && digits.starts_with('9') {
        digits.get(..SUBSCRIBER_DIGITS)?
    } else {
        digits.get(digits.len().checked_sub(SUBSCRIBER_DIGITS)?..)?
    };

    Some(format!("+{}{}", COUNTRY_CODE, body))
}

/// Strict validation of a normalized number.
///
/// True iff the input is exactly `+998` plus 9 digits, the operator prefix is
/// in [`VALID_OPERATORS`], the body is not one repeated digit, and a body with
/// fewer than 3 distinct digits still has at least 2 distinct digits after
/// the operator prefix.
pub fn validate_phone(phone: &str) -> bool {
    let Some(body) = phone
        .trim()
        .strip_prefix('+')
        .and_then(|rest| rest.strip_prefix(COUNTRY_CODE))
    else {
        return false;
    };

    if body.len() != SUBSCRIBER_DIGITS || !body.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    if !VALID_OPERATORS.contains(&&body[..2]) {
        return false;
    }

    let body_distinct = distinct_digits(body);
    if body_distinct == 1 {
        return false;
    }

    // Repeated operator digits are fine as long as the rest varies.
    if body_distinct < 3 && distinct_digits(&body[2..]) < 2 {
        return false;
    }

    true
}

fn distinct_digits(digits: &str) -> usize {
    digits.bytes().collect::<HashSet<u8>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalizes_to_valid(input: &str) -> bool {
        normalize_phone(input).is_some_and(|p| validate_phone(&p))
    }

    mod normalize {
        use super::*;

        #[test]
        fn keeps_canonical_number() {
            assert_eq!(
                normalize_phone("+998901234567").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn adds_missing_plus() {
            assert_eq!(
                normalize_phone("998901234567").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn adds_missing_country_code() {
            assert_eq!(
                normalize_phone("901234567").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn strips_separators() {
            assert_eq!(
                normalize_phone("+998 (90) 123-45-67").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn truncates_surplus_after_country_code() {
            assert_eq!(
                normalize_phone("+99890123456789").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn falls_back_to_trailing_nine_digits() {
            assert_eq!(
                normalize_phone("8 (90) 123 45 67").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn short_body_after_country_code_is_not_padded() {
            assert_eq!(normalize_phone("+998 90 123 45 6"), None);
            assert_eq!(normalize_phone("998 90 123 45 6"), None);
        }

        #[test]
        fn bare_body_keeps_leading_digits() {
            assert_eq!(
                normalize_phone("9012345678").as_deref(),
                Some("+998901234567")
            );
            assert_eq!(normalize_phone("90123456"), None);
        }

        #[test]
        fn other_prefixes_keep_trailing_digits() {
            assert_eq!(
                normalize_phone("+7 90 123 45 67").as_deref(),
                Some("+998901234567")
            );
        }

        #[test]
        fn returns_none_below_nine_digits() {
            assert_eq!(normalize_phone("+99890123"), None);
            assert_eq!(normalize_phone(""), None);
            assert_eq!(normalize_phone("send contact"), None);
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn accepts_each_input_shape_after_normalization() {
            assert!(normalizes_to_valid("+998901234567"));
            assert!(normalizes_to_valid("998901234567"));
            assert!(normalizes_to_valid("901234567"));
        }

        #[test]
        fn rejects_all_zero_body() {
            assert!(!validate_phone("+998000000000"));
        }

        #[test]
        fn rejects_repeated_digit_body_with_valid_operator() {
            assert!(!validate_phone("+998999999999"));
            assert!(!validate_phone("+998777777777"));
            assert!(!normalizes_to_valid("888888888"));
        }

        #[test]
        fn rejects_operator_followed_by_one_repeated_digit() {
            // two distinct digits overall, last seven all the same
            assert!(!validate_phone("+998900000000"));
            assert!(!validate_phone("+998991111111"));
        }

        #[test]
        fn accepts_low_entropy_number_with_varied_tail() {
            assert!(validate_phone("+998909090909"));
            assert!(validate_phone("+998990000009"));
        }

        #[test]
        fn accepts_three_distinct_digits_even_if_tail_repeats() {
            assert!(validate_phone("+998901111111"));
        }

        #[test]
        fn rejects_unknown_operator() {
            assert!(!validate_phone("+998001234567"));
            assert!(!validate_phone("+998961234567"));
        }

        #[test]
        fn rejects_wrong_country_or_length() {
            assert!(!validate_phone("+997901234567"));
            assert!(!validate_phone("+99890123456"));
            assert!(!validate_phone("+9989012345678"));
            assert!(!validate_phone("998901234567"));
            assert!(!validate_phone(""));
        }

        #[test]
        fn rejects_non_digit_body() {
            assert!(!validate_phone("+99890123456a"));
        }

        #[test]
        fn tolerates_surrounding_whitespace() {
            assert!(validate_phone("  +998901234567 "));
        }
    }

    proptest! {
        #[test]
        fn normalize_is_total_and_canonical(input in ".{0,40}") {
            if let Some(phone) = normalize_phone(&input) {
                prop_assert_eq!(phone.len(), 1 + COUNTRY_CODE.len() + SUBSCRIBER_DIGITS);
                prop_assert!(phone.starts_with("+998"));
                prop_assert!(phone[1..].bytes().all(|b| b.is_ascii_digit()));
            }
        }

        #[test]
        fn normalize_is_none_below_nine_digits(input in "[0-9 +()-]{0,20}") {
            let digit_count = input.chars().filter(|c| c.is_ascii_digit()).count();
            if digit_count < SUBSCRIBER_DIGITS {
                prop_assert_eq!(normalize_phone(&input), None);
            }
        }

        #[test]
        fn normalize_keeps_body_after_country_code(body in "[0-9]{9,12}") {
            let phone = normalize_phone(&format!("+998{}", body));
            prop_assert_eq!(phone, Some(format!("+998{}", &body[..SUBSCRIBER_DIGITS])));
        }

        #[test]
        fn normalize_is_idempotent(input in "[0-9]{9,15}") {
            if let Some(phone) = normalize_phone(&input) {
                prop_assert_eq!(normalize_phone(&phone), Some(phone.clone()));
            }
        }

        #[test]
        fn validate_never_panics(input in ".{0,20}") {
            let _ = validate_phone(&input);
        }
    }
}
