//! Roman numeral parsing for chapter ordinals.

/// Parse a roman numeral using standard subtractive notation.
///
/// Accepts `I V X L C D M` in either case. Returns `None` on any
/// unrecognized character; malformed-but-mappable sequences (e.g. `IIII`)
/// still parse, matching how loosely real heading text follows the rules.
#[must_use]
pub fn parse(token: &str) -> Option<u32> {
    if token.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let mut prev = 0;
    for ch in token.chars().rev() {
        let value = digit_value(ch)?;
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }
    Some(total)
}

const fn digit_value(ch: char) -> Option<u32> {
    match ch.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}
