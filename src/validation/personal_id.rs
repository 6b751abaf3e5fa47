use super::{char_at, prefix, CardSyntax};
use crate::models::{DocumentKind, FormatTables};
use crate::utils::check_contain_all_digit;

/// Personal ID syntax: the 9 digit identity card and the 12 digit citizen
/// identity card.
///
/// Ids one digit short of either length are accepted when prepending a
/// `'0'` makes them valid. Numeric storage tends to drop the leading zero,
/// so this recovers those ids, at the cost of also accepting unrelated 8
/// and 11 digit strings that happen to pad into a valid one.
pub struct PersonalIdValidator<'a> {
    tables: &'a FormatTables,
}

impl<'a> PersonalIdValidator<'a> {
    pub fn new(tables: &'a FormatTables) -> Self {
        PersonalIdValidator { tables }
    }

    fn is_old_card(&self, card_id: &str) -> bool {
        card_id.len() == self.tables.old_personal_id_length
    }

    fn is_new_card(&self, card_id: &str) -> bool {
        card_id.len() == self.tables.new_personal_id_length
    }

    /// Old format: either the 2 or the 3 digit prefix is a known region code
    pub fn is_valid_old_card(&self, card_id: &str) -> bool {
        if !self.is_old_card(card_id) {
            return false;
        }

        [prefix(card_id, 2), prefix(card_id, 3)]
            .into_iter()
            .flatten()
            .any(|code| self.tables.is_old_region_code(code))
    }

    /// New format: 3 digit region code followed by a gender digit
    pub fn is_valid_new_card(&self, card_id: &str) -> bool {
        if !self.is_new_card(card_id) {
            return false;
        }

        match (prefix(card_id, 3), char_at(card_id, 3)) {
            (Some(region_code), Some(gender_code)) => {
                self.tables.is_new_region_code(region_code)
                    && self.tables.is_valid_gender(gender_code)
            }
            _ => false,
        }
    }

    fn is_semi_correct_length(&self, card_id: &str) -> bool {
        let length = card_id.len();
        length + 1 == self.tables.old_personal_id_length
            || length + 1 == self.tables.new_personal_id_length
    }

    /// Id one digit short that becomes valid once a leading `'0'` is restored
    pub fn is_valid_semi_card(&self, card_id: &str) -> bool {
        if !self.is_semi_correct_length(card_id) {
            return false;
        }

        let modified_card_id = format!("0{}", card_id);
        self.is_valid_old_card(&modified_card_id) || self.is_valid_new_card(&modified_card_id)
    }
}

impl CardSyntax for PersonalIdValidator<'_> {
    fn kind(&self) -> DocumentKind {
        DocumentKind::PersonalId
    }

    fn is_valid_card(&self, card_id: &str) -> bool {
        if !check_contain_all_digit(card_id) {
            return false;
        }

        self.is_valid_new_card(card_id)
            || self.is_valid_old_card(card_id)
            || self.is_valid_semi_card(card_id)
    }
}
