use super::CardSyntax;
use crate::models::{DocumentKind, FormatTables};

/// Passport syntax: one leading letter followed by digits, e.g. `C1234567`
pub struct PassportValidator<'a> {
    tables: &'a FormatTables,
}

impl<'a> PassportValidator<'a> {
    pub fn new(tables: &'a FormatTables) -> Self {
        PassportValidator { tables }
    }

    fn is_valid_length(&self, card_id: &str) -> bool {
        card_id.chars().count() == self.tables.passport_length
    }

    fn is_valid_syntax(&self, card_id: &str) -> bool {
        self.tables
            .matches_passport_pattern(&card_id.to_lowercase())
    }
}

impl CardSyntax for PassportValidator<'_> {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Passport
    }

    fn is_valid_card(&self, card_id: &str) -> bool {
        self.is_valid_length(card_id) && self.is_valid_syntax(card_id)
    }
}
