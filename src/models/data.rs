use serde::Serialize;
use std::fmt;

/// Kinds of identity documents recognized by syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PersonalId,
    Passport,
    DriverLicense,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::PersonalId,
        DocumentKind::Passport,
        DocumentKind::DriverLicense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::PersonalId => "PERSONAL ID",
            DocumentKind::Passport => "PASSPORT",
            DocumentKind::DriverLicense => "DRIVER LICENSE",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one identifier.
///
/// The per-kind flags are independent: a 12 digit identifier may be flagged
/// both as a personal id and as a driver license. `is_valid` is true when
/// any of them is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub is_personal_id: bool,
    pub is_passport: bool,
    pub is_driver_license: bool,
}

impl ValidationResult {
    pub fn is_kind(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::PersonalId => self.is_personal_id,
            DocumentKind::Passport => self.is_passport,
            DocumentKind::DriverLicense => self.is_driver_license,
        }
    }

    /// Document kinds this identifier satisfies, in declaration order
    pub fn kinds(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| self.is_kind(*kind))
            .collect()
    }
}
