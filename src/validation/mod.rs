pub mod driver_license;
pub mod passport;
pub mod personal_id;

pub use driver_license::DriverLicenseValidator;
pub use passport::PassportValidator;
pub use personal_id::PersonalIdValidator;

use crate::models::DocumentKind;

/// Syntax check for one kind of identity document.
///
/// Implementations are pure: they read only their format tables and never
/// fail. Anything that does not match classifies as `false`.
pub trait CardSyntax {
    fn kind(&self) -> DocumentKind;

    fn is_valid_card(&self, card_id: &str) -> bool;
}

/// Prefix of `len` bytes, or `None` when the id is too short
pub(crate) fn prefix(card_id: &str, len: usize) -> Option<&str> {
    card_id.get(..len)
}

/// Single character at byte `index` as a string slice
pub(crate) fn char_at(card_id: &str, index: usize) -> Option<&str> {
    card_id.get(index..index + 1)
}
