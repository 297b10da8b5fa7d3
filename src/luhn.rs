//! Luhn checksum validation for order numbers.
//!
//! The sole admission gate for both order submission and
//! withdrawal order identifiers.

/// Check that `number` is a non-empty digit string passing the Luhn
/// checksum. Every second digit from the right is doubled (minus 9 when
/// the product exceeds 9); the total must be divisible by 10.
///
/// An all-zero string sums to 0 and is accepted; callers that want to
/// forbid it must check separately.
pub fn valid(number: &str) -> bool {
    if number.is_empty() {
        return false;
    }

    let parity = number.len() % 2;
    let mut sum = 0u32;
    for (i, c) in number.chars().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == parity {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::valid;
    use rstest::rstest;

    #[rstest]
    #[case("79927398713", true)]
    #[case("4561261212345467", true)]
    #[case("2377225624", true)]
    #[case("0", true)]
    #[case("0000", true)]
    #[case("79927398714", false)]
    #[case("79927398710", false)]
    #[case("12a45", false)]
    #[case("12345", false)]
    #[case("", false)]
    #[case(" 79927398713", false)]
    fn checksum_cases(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(valid(input), expected, "input: {input:?}");
    }
}
