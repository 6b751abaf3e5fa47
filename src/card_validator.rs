use crate::models::{FormatTables, ValidationResult, STANDARD_TABLES};
use crate::validation::*;

/// Whether any of the checkers is valid
pub fn is_checker_valid<const N: usize>(checkers: [bool; N]) -> bool {
    checkers.into_iter().any(|checker| checker)
}

/// Runs every document syntax check against one identifier.
///
/// Holds only a reference to the format tables, so one instance can be
/// shared across threads and cloned freely.
#[derive(Debug, Clone, Copy)]
pub struct CardValidator<'a> {
    tables: &'a FormatTables,
}

impl CardValidator<'static> {
    /// Validator over the built-in tables
    pub fn standard() -> Self {
        CardValidator::new(&STANDARD_TABLES)
    }
}

impl Default for CardValidator<'static> {
    fn default() -> Self {
        CardValidator::standard()
    }
}

impl<'a> CardValidator<'a> {
    pub fn new(tables: &'a FormatTables) -> Self {
        CardValidator { tables }
    }

    pub fn tables(&self) -> &'a FormatTables {
        self.tables
    }

    pub fn is_personal_id(&self, card_id: &str) -> bool {
        PersonalIdValidator::new(self.tables).is_valid_card(card_id)
    }

    pub fn is_passport(&self, card_id: &str) -> bool {
        PassportValidator::new(self.tables).is_valid_card(card_id)
    }

    pub fn is_driver_license(&self, card_id: &str) -> bool {
        DriverLicenseValidator::new(self.tables).is_valid_card(card_id)
    }

    /// Classify one trimmed identifier. The three checks are independent;
    /// no kind takes priority over another.
    pub fn validate(&self, card_id: &str) -> ValidationResult {
        let is_personal_id = self.is_personal_id(card_id);
        let is_passport = self.is_passport(card_id);
        let is_driver_license = self.is_driver_license(card_id);

        ValidationResult {
            is_valid: is_checker_valid([is_personal_id, is_passport, is_driver_license]),
            is_personal_id,
            is_passport,
            is_driver_license,
        }
    }
}

pub fn validate_personal_id(card_id: &str) -> bool {
    CardValidator::standard().is_personal_id(card_id)
}

pub fn validate_passport(card_id: &str) -> bool {
    CardValidator::standard().is_passport(card_id)
}

pub fn validate_driver_license(card_id: &str) -> bool {
    CardValidator::standard().is_driver_license(card_id)
}

pub fn validate_identifier(card_id: &str) -> ValidationResult {
    CardValidator::standard().validate(card_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentKind, TableConfig};
    use proptest::prelude::*;

    #[test]
    fn test_is_checker_valid() {
        assert!(!is_checker_valid([false, false, false]));
        assert!(is_checker_valid([false, true, false]));
        assert!(is_checker_valid([true, true, true, false]));
        assert!(!is_checker_valid([]));
    }

    #[test]
    fn test_validate_identifier() {
        let result = validate_identifier("079203001234");
        assert!(result.is_valid);
        assert!(result.is_personal_id);
        assert!(!result.is_passport);

        let result = validate_identifier("C1234567");
        assert_eq!(result.kinds(), vec![DocumentKind::Passport]);
        assert!(result.is_valid);

        let result = validate_identifier("790151234567");
        assert_eq!(result.kinds(), vec![DocumentKind::DriverLicense]);

        assert_eq!(validate_identifier("hello"), ValidationResult::default());
        assert_eq!(validate_identifier(""), ValidationResult::default());
    }

    #[test]
    fn test_id_can_be_several_kinds() {
        // 010 / 01 regions, gender 2, year 21: personal id and driver license
        let result = validate_identifier("010212345678");
        assert!(result.is_personal_id);
        assert!(result.is_driver_license);
        assert!(result.is_valid);

        // Passing year 09 is not trusted when the id reads as a personal id
        let result = validate_identifier("010091234567");
        assert!(result.is_personal_id);
        assert!(!result.is_driver_license);
        assert!(result.is_valid);
    }

    #[test]
    fn test_free_functions_match_validator() {
        let validator = CardValidator::default();
        for id in ["020000000", "20000000", "C1234567", "011981234567", "abc"] {
            assert_eq!(validate_personal_id(id), validator.is_personal_id(id));
            assert_eq!(validate_passport(id), validator.is_passport(id));
            assert_eq!(validate_driver_license(id), validator.is_driver_license(id));
        }
    }

    #[test]
    fn test_old_code_round_trip_through_truncation() {
        // Any old region code padded with zeros is valid, and stays valid
        // with its leading digit dropped
        for code in ["01", "02", "38"] {
            let id = format!("{}{}", code, "0".repeat(7));
            assert!(validate_personal_id(&id), "{} should be valid", id);
            if code.starts_with('0') {
                assert!(validate_personal_id(&id[1..]), "{} should be valid", &id[1..]);
            }
        }
    }

    #[test]
    fn test_custom_tables() {
        let tables = FormatTables::from_config(TableConfig {
            passport_length: 9,
            ..TableConfig::default()
        })
        .unwrap();
        let validator = CardValidator::new(&tables);
        assert!(validator.is_passport("C12345678"));
        assert!(!validator.is_passport("C1234567"));
    }

    fn new_personal_id() -> impl Strategy<Value = String> {
        let codes: Vec<&'static str> = vec!["001", "010", "046", "079", "096"];
        (
            prop::sample::select(codes),
            prop::sample::select(vec!['0', '1', '2', '3']),
            "[0-9]{8}",
        )
            .prop_map(|(code, gender, rest)| format!("{}{}{}", code, gender, rest))
    }

    proptest! {
        #[test]
        fn prop_non_digit_rejected(
            prefix in "[0-9]{0,6}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,6}"
        ) {
            let id = format!("{}{}{}", prefix, bad, suffix);
            prop_assert!(!validate_personal_id(&id));
            prop_assert!(!validate_driver_license(&id));
        }

        #[test]
        fn prop_validation_is_pure(id in "\\PC{0,14}") {
            prop_assert_eq!(validate_identifier(&id), validate_identifier(&id));
        }

        #[test]
        fn prop_valid_is_any_kind(id in "[a-zA-Z0-9]{0,13}") {
            let result = validate_identifier(&id);
            prop_assert_eq!(
                result.is_valid,
                result.is_personal_id || result.is_passport || result.is_driver_license
            );
        }

        #[test]
        fn prop_new_format_accepted(id in new_personal_id()) {
            prop_assert!(validate_personal_id(&id));
        }

        #[test]
        fn prop_semi_correct_matches_padded(id in "[0-9]{11}") {
            let padded = format!("0{}", id);
            let validator = PersonalIdValidator::new(&STANDARD_TABLES);
            prop_assert_eq!(validate_personal_id(&id), validator.is_valid_new_card(&padded));
        }

        #[test]
        fn prop_semi_correct_old_matches_padded(id in "[0-9]{8}") {
            let padded = format!("0{}", id);
            let validator = PersonalIdValidator::new(&STANDARD_TABLES);
            prop_assert_eq!(validate_personal_id(&id), validator.is_valid_old_card(&padded));
        }

        #[test]
        fn prop_ambiguous_license_needs_year(
            gender in "[0-3]",
            year in "[0-9]",
            serial in "[0-9]{7}"
        ) {
            let tables = FormatTables::from_config(TableConfig {
                invalid_driver_license_years: Vec::new(),
                invalid_first_year_chars: vec!["3".to_string()],
                valid_last_year_chars: vec!["0".to_string(), "1".to_string()],
                ..TableConfig::default()
            })
            .unwrap();
            let validator = CardValidator::new(&tables);
            // "01" license region, "0" gender digit, "010" personal id region
            let id = format!("010{}{}{}", gender, year, serial);
            prop_assert!(validator.is_personal_id(&id));

            let plausible = gender != "3" && (year == "0" || year == "1");
            prop_assert_eq!(validator.is_driver_license(&id), plausible);
        }

        #[test]
        fn prop_never_panics(id in "\\PC{0,20}") {
            let _ = validate_identifier(&id);
        }
    }
}
