//! The input alphabet and the lambda (epsilon) symbol.

/// First real input symbol.
pub const FIRST_SYMBOL: char = 'a';

/// Last real input symbol.
pub const LAST_SYMBOL: char = 'z';

/// Label used for lambda transitions, which consume no input.
pub const EPSILON: char = '~';

/// Number of real symbols in `FIRST_SYMBOL..=LAST_SYMBOL`.
pub const ALPHABET_LEN: usize = (LAST_SYMBOL as usize) - (FIRST_SYMBOL as usize) + 1;

/// Number of label buckets a state keeps: every real symbol plus epsilon.
pub const LABEL_SLOTS: usize = ALPHABET_LEN + 1;

/// Check if a label is the epsilon symbol.
#[inline]
pub fn is_epsilon(label: char) -> bool {
    label == EPSILON
}

/// Check if a character is a real input symbol (epsilon excluded).
#[inline]
pub fn is_symbol(c: char) -> bool {
    (FIRST_SYMBOL..=LAST_SYMBOL).contains(&c)
}

/// Check if a character may label a transition.
#[inline]
pub fn in_alphabet(c: char) -> bool {
    is_symbol(c) || is_epsilon(c)
}

/// Check if every character of `word` is a real input symbol.
///
/// The empty word qualifies.
pub fn is_word(word: &str) -> bool {
    word.chars().all(is_symbol)
}

/// Dense storage index of a label.
///
/// Real symbols map to `c - FIRST_SYMBOL`, epsilon takes the slot right
/// after the last real symbol.
#[inline]
pub fn label_index(label: char) -> Option<usize> {
    if is_symbol(label) {
        Some(label as usize - FIRST_SYMBOL as usize)
    } else if is_epsilon(label) {
        Some(ALPHABET_LEN)
    } else {
        None
    }
}

/// Sort key for labels: character order, with epsilon after every real symbol.
#[inline]
pub(crate) fn sort_key(label: char) -> u32 {
    if is_epsilon(label) {
        u32::MAX
    } else {
        label as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon('a'));
        assert!(in_alphabet(EPSILON));
        assert!(!is_symbol(EPSILON));
    }

    #[test]
    fn test_alphabet_bounds() {
        assert!(in_alphabet('a'));
        assert!(in_alphabet('z'));
        assert!(!in_alphabet('A'));
        assert!(!in_alphabet('`'));
        assert!(!in_alphabet('{'));
        assert!(!in_alphabet(' '));
    }

    #[test]
    fn test_is_word() {
        assert!(is_word(""));
        assert!(is_word("abz"));
        assert!(!is_word("a~b"));
        assert!(!is_word("a b"));
        assert!(!is_word("Ab"));
    }

    #[test]
    fn test_label_index() {
        assert_eq!(label_index('a'), Some(0));
        assert_eq!(label_index('z'), Some(ALPHABET_LEN - 1));
        assert_eq!(label_index(EPSILON), Some(ALPHABET_LEN));
        assert_eq!(label_index('0'), None);
        assert_eq!(LABEL_SLOTS, 27);
    }
}
