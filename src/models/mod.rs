pub mod data;
pub mod rules;

pub use data::{DocumentKind, ValidationResult};
pub use rules::{FormatTables, TableConfig, STANDARD_TABLES};
