pub mod error;
pub mod text;

pub use error::CardError;
pub use text::{
    check_contain_all_digit, clean_card_id, contains_letter, remove_spaces,
    remove_special_characters,
};
