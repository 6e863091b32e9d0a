//! Field validators for contact registration.
//!
//! These are pure functions over the raw request strings; normalization
//! (stripping CPF punctuation) happens here, persistence elsewhere.

/// Strip formatting punctuation from a CPF, keeping only its digits.
pub fn clean_cpf(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a Brazilian CPF (11-digit taxpayer id with two check digits).
///
/// Accepts formatted input ("529.982.247-25") or bare digits. Rejects
/// anything that does not clean to exactly 11 digits, degenerate
/// all-same-digit sequences, and any string whose check digits do not
/// match the weighted checksum.
pub fn is_valid_cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    // "00000000000" through "99999999999" all pass the checksum
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weighted checksum over a digit prefix: weights count down from len+1,
/// then (sum * 10) mod 11, with 10 coerced to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (len + 1 - i as u32))
        .sum();

    let rest = (sum * 10) % 11;
    if rest >= 10 {
        0
    } else {
        rest
    }
}

/// Structural email check: exactly one `@`, non-empty local part, domain
/// with at least one dot, no whitespace anywhere. No DNS or mailbox
/// verification.
pub fn is_valid_email(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = input.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
