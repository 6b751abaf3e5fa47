use crate::utils::CardError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub const OLD_PID_CODE_LENGTH: usize = 9;
pub const NEW_PID_CODE_LENGTH: usize = 12;
pub const PASSPORT_LENGTH: usize = 8;
pub const DRIVER_LICENSE_LENGTH: usize = 12;

// Province prefixes of the 9 digit identity card. Split provinces kept
// their parent's two digit code and were given a three digit one.
const OLD_PID_REGION_CODES: &[&str] = &[
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30",
    "31", "32", "33", "34", "35", "36", "37", "38", "245", "285", "331", "334", "341", "351",
    "365", "366", "385",
];

// Province codes of the 12 digit citizen identity card
const NEW_PID_REGION_CODES: &[&str] = &[
    "001", "002", "004", "006", "008", "010", "011", "012", "014", "015", "017", "019", "020",
    "022", "024", "025", "026", "027", "030", "031", "033", "034", "035", "036", "037", "038",
    "040", "042", "044", "045", "046", "048", "049", "051", "052", "054", "056", "058", "060",
    "062", "064", "066", "067", "068", "070", "072", "074", "075", "077", "079", "080", "082",
    "083", "084", "086", "087", "089", "091", "092", "093", "094", "095", "096",
];

const DRIVER_LICENSE_REGION_CODES: &[&str] = &[
    "01", "02", "04", "06", "08", "10", "11", "12", "14", "15", "17", "19", "20", "22", "24",
    "25", "26", "27", "30", "31", "33", "34", "35", "36", "37", "38", "40", "42", "44", "45",
    "46", "48", "49", "51", "52", "54", "56", "58", "60", "62", "64", "66", "67", "68", "70",
    "72", "74", "75", "77", "79", "80", "82", "83", "84", "86", "87", "89", "91", "92", "93",
    "94", "95", "96",
];

// Century and gender: 0/1 born 1900-1999, 2/3 born 2000-2099
const POSSIBLE_GENDER_NUM: &[&str] = &["0", "1", "2", "3"];

// Two digit passing years no license can carry: 2030-2069 or 1930-1969
const INVALID_DRIVER_LICENSE_PASSING_YEAR: &[&str] = &[
    "30", "31", "32", "33", "34", "35", "36", "37", "38", "39", "40", "41", "42", "43", "44",
    "45", "46", "47", "48", "49", "50", "51", "52", "53", "54", "55", "56", "57", "58", "59",
    "60", "61", "62", "63", "64", "65", "66", "67", "68", "69",
];

// A license number that also reads as a new personal id is only trusted
// with a passing year in 2020-2025
const INVALID_DRIVER_LICENSE_FIRST_YEAR_CHAR: &[&str] =
    &["0", "1", "3", "4", "5", "6", "7", "8", "9"];

const VALID_DRIVER_LICENSE_LAST_YEAR_CHAR: &[&str] = &["0", "1", "2", "3", "4", "5"];

lazy_static! {
    /// Built-in tables shared by every validator that is not given its own
    pub static ref STANDARD_TABLES: FormatTables = FormatTables::standard();
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Raw table options, as read from a JSON table file.
///
/// Every field is optional; missing ones fall back to the built-in tables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub old_personal_id_length: usize,
    pub new_personal_id_length: usize,
    pub passport_length: usize,
    pub driver_license_length: usize,
    pub old_region_codes: Vec<String>,
    pub new_region_codes: Vec<String>,
    pub driver_license_region_codes: Vec<String>,
    pub valid_gender_digits: Vec<String>,
    pub invalid_driver_license_years: Vec<String>,
    pub invalid_first_year_chars: Vec<String>,
    pub valid_last_year_chars: Vec<String>,
    /// Matched against the lower-cased identifier. Derived from
    /// `passport_length` when absent.
    pub passport_pattern: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            old_personal_id_length: OLD_PID_CODE_LENGTH,
            new_personal_id_length: NEW_PID_CODE_LENGTH,
            passport_length: PASSPORT_LENGTH,
            driver_license_length: DRIVER_LICENSE_LENGTH,
            old_region_codes: to_owned_list(OLD_PID_REGION_CODES),
            new_region_codes: to_owned_list(NEW_PID_REGION_CODES),
            driver_license_region_codes: to_owned_list(DRIVER_LICENSE_REGION_CODES),
            valid_gender_digits: to_owned_list(POSSIBLE_GENDER_NUM),
            invalid_driver_license_years: to_owned_list(INVALID_DRIVER_LICENSE_PASSING_YEAR),
            invalid_first_year_chars: to_owned_list(INVALID_DRIVER_LICENSE_FIRST_YEAR_CHAR),
            valid_last_year_chars: to_owned_list(VALID_DRIVER_LICENSE_LAST_YEAR_CHAR),
            passport_pattern: None,
        }
    }
}

/// One letter followed by `length - 1` digits
pub fn passport_pattern_for(length: usize) -> String {
    format!("^[a-z][0-9]{{{}}}$", length.saturating_sub(1))
}

/// Validated, immutable membership tables used by the card validators
#[derive(Debug, Clone)]
pub struct FormatTables {
    pub(crate) old_personal_id_length: usize,
    pub(crate) new_personal_id_length: usize,
    pub(crate) passport_length: usize,
    pub(crate) driver_license_length: usize,
    old_region_codes: HashSet<String>,
    new_region_codes: HashSet<String>,
    driver_license_region_codes: HashSet<String>,
    valid_gender_digits: HashSet<String>,
    invalid_driver_license_years: HashSet<String>,
    invalid_first_year_chars: HashSet<String>,
    valid_last_year_chars: HashSet<String>,
    passport_pattern: Regex,
}

impl FormatTables {
    fn standard() -> Self {
        Self::from_config(TableConfig::default()).expect("built-in format tables are valid")
    }

    /// Build tables from raw options, rejecting anything the validators
    /// could not evaluate safely
    pub fn from_config(config: TableConfig) -> Result<Self, CardError> {
        check_length("old_personal_id_length", config.old_personal_id_length, 2)?;
        check_length("new_personal_id_length", config.new_personal_id_length, 4)?;
        check_length("driver_license_length", config.driver_license_length, 5)?;
        check_length("passport_length", config.passport_length, 2)?;
        if config.old_personal_id_length == config.new_personal_id_length {
            return Err(CardError::InvalidTable(
                "old and new personal id lengths must differ".to_string(),
            ));
        }
        if config.old_personal_id_length - 1 == config.new_personal_id_length
            || config.new_personal_id_length - 1 == config.old_personal_id_length
        {
            return Err(CardError::InvalidTable(
                "personal id lengths must not be one digit apart".to_string(),
            ));
        }

        let old_region_codes = digit_set("old_region_codes", config.old_region_codes, &[2, 3])?;
        let new_region_codes = digit_set("new_region_codes", config.new_region_codes, &[3])?;
        let driver_license_region_codes = digit_set(
            "driver_license_region_codes",
            config.driver_license_region_codes,
            &[2],
        )?;
        let valid_gender_digits =
            digit_set("valid_gender_digits", config.valid_gender_digits, &[1])?;
        let invalid_driver_license_years = digit_set(
            "invalid_driver_license_years",
            config.invalid_driver_license_years,
            &[2],
        )?;
        let invalid_first_year_chars =
            digit_set("invalid_first_year_chars", config.invalid_first_year_chars, &[1])?;
        let valid_last_year_chars =
            digit_set("valid_last_year_chars", config.valid_last_year_chars, &[1])?;

        let pattern = match config.passport_pattern {
            Some(pattern) => pattern,
            None => passport_pattern_for(config.passport_length),
        };
        let passport_pattern = Regex::new(&pattern)?;

        Ok(FormatTables {
            old_personal_id_length: config.old_personal_id_length,
            new_personal_id_length: config.new_personal_id_length,
            passport_length: config.passport_length,
            driver_license_length: config.driver_license_length,
            old_region_codes,
            new_region_codes,
            driver_license_region_codes,
            valid_gender_digits,
            invalid_driver_license_years,
            invalid_first_year_chars,
            valid_last_year_chars,
            passport_pattern,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CardError> {
        let config: TableConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CardError> {
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading format tables from {}", path.display());
        Self::from_json_str(&contents)
    }

    pub fn old_personal_id_length(&self) -> usize {
        self.old_personal_id_length
    }

    pub fn new_personal_id_length(&self) -> usize {
        self.new_personal_id_length
    }

    pub fn passport_length(&self) -> usize {
        self.passport_length
    }

    pub fn driver_license_length(&self) -> usize {
        self.driver_license_length
    }

    pub fn is_old_region_code(&self, code: &str) -> bool {
        self.old_region_codes.contains(code)
    }

    pub fn is_new_region_code(&self, code: &str) -> bool {
        self.new_region_codes.contains(code)
    }

    pub fn is_driver_license_region_code(&self, code: &str) -> bool {
        self.driver_license_region_codes.contains(code)
    }

    pub fn is_valid_gender(&self, gender_code: &str) -> bool {
        self.valid_gender_digits.contains(gender_code)
    }

    pub fn is_invalid_passing_year(&self, passing_year: &str) -> bool {
        self.invalid_driver_license_years.contains(passing_year)
    }

    pub fn is_invalid_first_year_char(&self, year_char: &str) -> bool {
        self.invalid_first_year_chars.contains(year_char)
    }

    pub fn is_valid_last_year_char(&self, year_char: &str) -> bool {
        self.valid_last_year_chars.contains(year_char)
    }

    pub fn matches_passport_pattern(&self, lowered: &str) -> bool {
        self.passport_pattern.is_match(lowered)
    }
}

fn check_length(name: &str, value: usize, minimum: usize) -> Result<(), CardError> {
    if value < minimum {
        return Err(CardError::InvalidTable(format!(
            "{} must be at least {}, got {}",
            name, minimum, value
        )));
    }
    Ok(())
}

fn digit_set(
    name: &str,
    values: Vec<String>,
    widths: &[usize],
) -> Result<HashSet<String>, CardError> {
    let mut set = HashSet::with_capacity(values.len());
    for value in values {
        let is_digits = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
        if !is_digits || !widths.contains(&value.len()) {
            return Err(CardError::InvalidTable(format!(
                "{} entry {:?} must be {:?} ASCII digits wide",
                name, value, widths
            )));
        }
        set.insert(value);
    }
    if set.is_empty() {
        log::warn!("{} is empty, every check against it will fail", name);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_tables() {
        let tables = &*STANDARD_TABLES;
        assert_eq!(tables.old_personal_id_length(), 9);
        assert_eq!(tables.new_personal_id_length(), 12);
        assert_eq!(tables.passport_length(), 8);
        assert_eq!(tables.driver_license_length(), 12);
        assert!(tables.is_new_region_code("079"));
        assert!(tables.is_old_region_code("02"));
        assert!(tables.is_old_region_code("385"));
        assert!(tables.is_driver_license_region_code("79"));
        assert!(tables.is_valid_gender("3"));
        assert!(!tables.is_valid_gender("4"));
        assert!(tables.matches_passport_pattern("c1234567"));
        assert!(!tables.matches_passport_pattern("C1234567"));
    }

    #[test]
    fn test_standard_tables_pass_their_own_validation() {
        assert!(FormatTables::from_config(TableConfig::default()).is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tables = FormatTables::from_json_str(
            r#"{ "passport_length": 9, "valid_gender_digits": ["0", "1"] }"#,
        )
        .unwrap();
        assert_eq!(tables.passport_length(), 9);
        assert!(tables.matches_passport_pattern("b12345678"));
        assert!(!tables.matches_passport_pattern("b1234567"));
        assert!(!tables.is_valid_gender("2"));
        assert!(tables.is_new_region_code("001"));
    }

    #[test]
    fn test_rejects_malformed_region_code() {
        let result = FormatTables::from_json_str(r#"{ "new_region_codes": ["01"] }"#);
        assert!(matches!(result, Err(CardError::InvalidTable(_))));

        let result = FormatTables::from_json_str(r#"{ "driver_license_region_codes": ["7a"] }"#);
        assert!(matches!(result, Err(CardError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_unusable_lengths() {
        let result = FormatTables::from_json_str(r#"{ "new_personal_id_length": 3 }"#);
        assert!(matches!(result, Err(CardError::InvalidTable(_))));

        let result = FormatTables::from_json_str(
            r#"{ "old_personal_id_length": 12, "new_personal_id_length": 12 }"#,
        );
        assert!(matches!(result, Err(CardError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_lengths_one_digit_apart() {
        let result = FormatTables::from_json_str(
            r#"{ "old_personal_id_length": 13, "new_personal_id_length": 12 }"#,
        );
        assert!(matches!(result, Err(CardError::InvalidTable(_))));

        let result = FormatTables::from_json_str(
            r#"{ "old_personal_id_length": 9, "new_personal_id_length": 10 }"#,
        );
        assert!(matches!(result, Err(CardError::InvalidTable(_))));

        assert!(FormatTables::from_json_str(
            r#"{ "old_personal_id_length": 9, "new_personal_id_length": 11 }"#,
        )
        .is_ok());
    }

    #[test]
    fn test_rejects_bad_pattern_and_json() {
        let result = FormatTables::from_json_str(r#"{ "passport_pattern": "^[a-z" }"#);
        assert!(matches!(result, Err(CardError::PatternError(_))));

        let result = FormatTables::from_json_str("{ not json");
        assert!(matches!(result, Err(CardError::JsonError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "old_region_codes": ["12", "345"] }}"#).unwrap();

        let tables = FormatTables::from_json_file(file.path()).unwrap();
        assert!(tables.is_old_region_code("345"));
        assert!(!tables.is_old_region_code("01"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FormatTables::from_json_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CardError::IoError(_))));
    }
}
