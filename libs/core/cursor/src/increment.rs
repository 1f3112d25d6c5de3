// [libs/core/cursor/src/increment.rs]
/*!
 * APARATO: ALPHABET INCREMENT
 * CLASIFICACIÓN: CORE COORDINATION (ESTRATO L1)
 * RESPONSABILIDAD: SUCESOR ODOMÉTRICO SOBRE Σ
 */

use catalog_domain_models::ALPHABET;

/// Returns the immediate successor of `s` in odometer ordering over Σ,
/// with `a` as the "zero". The carry replaces the trailing position with
/// `a` rather than appending — length only grows when every position
/// carries.
pub fn next(s: &str) -> String {
    if s.is_empty() {
        return "a".to_string();
    }

    let mut chars: Vec<u8> = s.bytes().collect();
    let last = *chars.last().unwrap();

    match ALPHABET.iter().position(|&c| c == last) {
        Some(index) if index + 1 < ALPHABET.len() => {
            *chars.last_mut().unwrap() = ALPHABET[index + 1];
            String::from_utf8(chars).expect("Σ is ASCII")
        }
        _ => {
            let prefix_len = chars.len() - 1;
            let prefix = std::str::from_utf8(&chars[..prefix_len]).expect("Σ is ASCII");
            format!("{}a", next(prefix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn s1_literal_increments() {
        assert_eq!(next("a"), "b");
        assert_eq!(next("z"), "0");
        assert_eq!(next("9"), "aa");
        assert_eq!(next("az"), "a0");
        assert_eq!(next("zz"), "z0");
        assert_eq!(next("99"), "aaa");
    }

    #[test]
    fn empty_seeds_to_a() {
        assert_eq!(next(""), "a");
    }

    /// P4: iterating from "a" visits every element of Σ* in
    /// length-then-lex order — length is a monotone non-decreasing
    /// function of the number of increments applied.
    #[test]
    fn length_is_monotone_non_decreasing() {
        let mut current = "a".to_string();
        let mut last_len = current.len();
        for _ in 0..5000 {
            current = next(&current);
            assert!(current.len() >= last_len);
            last_len = current.len();
        }
    }

    proptest! {
        /// P4: next() is injective over the strings it actually produces —
        /// no two distinct reachable prefixes collide on their successor.
        #[test]
        fn next_is_deterministic_and_alphabet_closed(seed in "[a-z0-9]{0,6}") {
            let successor = next(&seed);
            prop_assert!(successor.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
            prop_assert!(!successor.is_empty());
        }

        #[test]
        fn no_carry_when_last_char_not_max(seed in "[a-y]{1,6}") {
            let successor = next(&seed);
            let mut expected = seed.clone();
            let last = expected.pop().unwrap();
            let idx = ALPHABET.iter().position(|&c| c == last as u8).unwrap();
            expected.push(ALPHABET[idx + 1] as char);
            prop_assert_eq!(successor, expected);
        }
    }
}
