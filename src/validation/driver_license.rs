use super::{char_at, prefix, CardSyntax, PersonalIdValidator};
use crate::models::{DocumentKind, FormatTables};
use crate::utils::check_contain_all_digit;

/// Driver license syntax: 2 digit region code, gender digit, 2 digit
/// passing year, then the serial.
///
/// The layout overlaps the 12 digit personal id, so ids that also pass the
/// new personal id rule must carry a plausible passing year as well.
pub struct DriverLicenseValidator<'a> {
    tables: &'a FormatTables,
}

impl<'a> DriverLicenseValidator<'a> {
    pub fn new(tables: &'a FormatTables) -> Self {
        DriverLicenseValidator { tables }
    }

    fn is_valid_length(&self, card_id: &str) -> bool {
        card_id.len() == self.tables.driver_license_length
    }

    fn is_valid_region_code(&self, card_id: &str) -> bool {
        prefix(card_id, 2).is_some_and(|code| self.tables.is_driver_license_region_code(code))
    }

    fn is_valid_gender_code(&self, card_id: &str) -> bool {
        char_at(card_id, 2).is_some_and(|gender_code| self.tables.is_valid_gender(gender_code))
    }

    fn is_valid_passing_year(&self, card_id: &str) -> bool {
        card_id
            .get(3..5)
            .is_some_and(|passing_year| !self.tables.is_invalid_passing_year(passing_year))
    }

    /// Extra year check, applied only when the id also reads as a new
    /// format personal id
    pub fn is_real_driver_license(&self, card_id: &str) -> bool {
        if !PersonalIdValidator::new(self.tables).is_valid_new_card(card_id) {
            return true;
        }

        match (char_at(card_id, 3), char_at(card_id, 4)) {
            (Some(first_year_char), Some(second_year_char)) => {
                !self.tables.is_invalid_first_year_char(first_year_char)
                    && self.tables.is_valid_last_year_char(second_year_char)
            }
            _ => false,
        }
    }
}

impl CardSyntax for DriverLicenseValidator<'_> {
    fn kind(&self) -> DocumentKind {
        DocumentKind::DriverLicense
    }

    fn is_valid_card(&self, card_id: &str) -> bool {
        if !check_contain_all_digit(card_id) {
            return false;
        }

        self.is_valid_length(card_id)
            && self.is_valid_region_code(card_id)
            && self.is_valid_gender_code(card_id)
            && self.is_valid_passing_year(card_id)
            && self.is_real_driver_license(card_id)
    }
}
