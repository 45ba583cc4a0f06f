//! Syllable counting for Latin words.
//!
//! Only the number of syllables is needed (third-declension i-stem
//! detection compares nominative and genitive), so this counts vowel
//! nuclei rather than producing a full syllabification.

use crate::latin::translit::fold;

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];
const DIPHTHONGS: [[char; 2]; 5] = [['a', 'e'], ['a', 'u'], ['o', 'e'], ['e', 'i'], ['e', 'u']];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Count the syllables of a Latin word.
///
/// Handles the common diphthongs (`ae au oe ei eu`), consonantal `u` after
/// `q`, and consonantal `i` at the start of a word or between vowels.
#[must_use]
pub fn count(word: &str) -> usize {
    let chars: Vec<char> = fold(word).chars().collect();
    let mut syllables = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !is_vowel(c) {
            i += 1;
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let next_is_vowel = next.is_some_and(is_vowel);

        // qu + vowel: the u is a glide
        if c == 'u' && prev == Some('q') && next_is_vowel {
            i += 1;
            continue;
        }

        // word-initial or intervocalic i before a vowel is a consonant
        if c == 'i' && next_is_vowel && prev.is_none_or(is_vowel) {
            i += 1;
            continue;
        }

        syllables += 1;
        match next {
            Some(n) if DIPHTHONGS.contains(&[c, n]) => i += 2,
            _ => i += 1,
        }
    }

    syllables
}
