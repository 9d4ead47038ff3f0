const PLAIN_NUMBER_LEN: usize = 10;
const ID_MATCHER_DIGITS: usize = 5;

/// Digits of a number without country or trunk prefix.
///
/// Numbers longer than ten digits keep their last ten; shorter ones are left
/// alone since there is no prefix to strip.
pub fn plain_number(number: &str) -> String {
    let digits = number
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.len() > PLAIN_NUMBER_LEN {
        return digits[digits.len() - PLAIN_NUMBER_LEN..].to_owned();
    }
    digits
}

/// Digits with an optional leading `+`; punctuation and spacing are dropped.
pub fn format_number(number: &str) -> String {
    let trimmed = number.trim();
    let digits = trimmed
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if trimmed.starts_with('+') && !digits.is_empty() {
        return format!("+{digits}");
    }
    digits
}

pub fn split_phone_numbers(phone_numbers: &str) -> Vec<&str> {
    phone_numbers
        .split(',')
        .map(str::trim)
        .filter(|number| !number.is_empty())
        .collect()
}

/// Lookup key for a recipient list: the last five digits of every number, sorted.
pub fn id_matcher(phone_numbers: &str) -> String {
    let mut suffixes = split_phone_numbers(phone_numbers)
        .into_iter()
        .map(plain_number)
        .map(|digits| {
            let start = digits.len().saturating_sub(ID_MATCHER_DIGITS);
            digits[start..].to_owned()
        })
        .collect::<Vec<_>>();
    suffixes.sort();
    suffixes.concat()
}
