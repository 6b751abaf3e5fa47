pub mod card_validator;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use card_validator::{
    is_checker_valid, validate_driver_license, validate_identifier, validate_passport,
    validate_personal_id, CardValidator,
};
pub use models::{DocumentKind, FormatTables, ValidationResult};
