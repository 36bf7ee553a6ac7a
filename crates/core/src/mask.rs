//! Input normalizers for checkout form fields.
//!
//! Every function here is total: any input produces a value, nothing panics.
//! Masks are applied on each keystroke, so feeding a mask its own output gives
//! the same output back.

/// Strip every character that is not an ASCII digit.
#[must_use]
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// The first `max` digits found in `input`.
fn first_digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Maximum digits in a Brazilian phone number (area code + 9-digit mobile).
pub const PHONE_MAX_DIGITS: usize = 11;

/// Digits in a CEP postal code.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Maximum digits in a house number.
pub const HOUSE_NUMBER_MAX_DIGITS: usize = 6;

/// Format a phone number progressively as digits arrive.
///
/// Shapes, by digit count: `(DD`, `(DD) DDDD`, `(DD) DDDD-DDDD` for landlines and
/// `(DD) DDDDD-DDDD` once the eleventh digit arrives. Extra digits are dropped.
///
/// ```
/// use monster_burger_core::mask::mask_phone;
///
/// assert_eq!(mask_phone("64999663524"), "(64) 99966-3524");
/// assert_eq!(mask_phone("6432"), "(64) 32");
/// ```
#[must_use]
pub fn mask_phone(input: &str) -> String {
    let digits = first_digits(input, PHONE_MAX_DIGITS);
    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => {
            let (area, rest) = digits.split_at(2);
            format!("({area}) {rest}")
        }
        7..=10 => {
            let (area, rest) = digits.split_at(2);
            let (prefix, line) = rest.split_at(4);
            format!("({area}) {prefix}-{line}")
        }
        _ => {
            let (area, rest) = digits.split_at(2);
            let (prefix, line) = rest.split_at(5);
            format!("({area}) {prefix}-{line}")
        }
    }
}

/// Format a CEP postal code: `DDDDD`, then `DDDDD-DDD`.
#[must_use]
pub fn mask_postal_code(input: &str) -> String {
    let digits = first_digits(input, POSTAL_CODE_DIGITS);
    if digits.len() <= 5 {
        return digits;
    }
    let (head, tail) = digits.split_at(5);
    format!("{head}-{tail}")
}

/// Keep only the digits of a house number, at most six of them.
#[must_use]
pub fn mask_house_number(input: &str) -> String {
    first_digits(input, HOUSE_NUMBER_MAX_DIGITS)
}

/// Normalize a typed money amount using `,` as the decimal separator.
///
/// Dots are read as commas. The integer part keeps up to six digits and the
/// fraction up to two. The separator only appears once a fractional digit has
/// been typed, and a bare fraction gets a `0` integer part.
///
/// ```
/// use monster_burger_core::mask::mask_amount;
///
/// assert_eq!(mask_amount("R$ 50.5"), "50,5");
/// assert_eq!(mask_amount(",75"), "0,75");
/// assert_eq!(mask_amount("100,"), "100");
/// ```
#[must_use]
pub fn mask_amount(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .map(|c| if c == '.' { ',' } else { c })
        .collect();

    let mut parts = cleaned.split(',');
    let integer = first_digits(parts.next().unwrap_or_default(), 6);
    let fraction = first_digits(parts.next().unwrap_or_default(), 2);

    match (integer.is_empty(), fraction.is_empty()) {
        (true, true) => String::new(),
        (_, true) => integer,
        (true, false) => format!("0,{fraction}"),
        (false, false) => format!("{integer},{fraction}"),
    }
}
