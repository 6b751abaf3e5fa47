// Text helpers used before identifiers reach the validators.
// The validators themselves never normalize their input.

/// Remove every space in the sentence, then trim what is left
pub fn remove_spaces(sentence: &str) -> String {
    sentence.replace(' ', "").trim().to_string()
}

/// Remove ASCII punctuation characters from the sentence
pub fn remove_special_characters(sentence: &str) -> String {
    sentence
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Whether the card id is made of ASCII digits only
pub fn check_contain_all_digit(card_id: &str) -> bool {
    !card_id.is_empty() && card_id.chars().all(|c| c.is_ascii_digit())
}

pub fn contains_letter(card_id: &str) -> bool {
    card_id.chars().any(|c| c.is_alphabetic())
}

/// Basic cleaning applied to a raw card id: trim, drop inner spaces and punctuation
pub fn clean_card_id(raw: &str) -> String {
    remove_special_characters(&remove_spaces(raw.trim()))
}
