//! Leet-speak matcher.
//!
//! Grounded on `original_source/matching/leet_test.go`: build the
//! "relevant subtable" (only letters whose glyphs actually occur in the
//! password), enumerate every one-glyph-per-letter substitution via a
//! Cartesian product, decode the password under each enumeration and run
//! the dictionary matcher on the result, then restrict each hit's `sub`
//! to the glyphs that actually appear in its token.

use std::collections::HashMap;

use itertools::Itertools;
use lazy_static::lazy_static;

use super::{dictionary, Match};
use crate::dictionary::RankedDictionaries;

lazy_static! {
    static ref L33T_TABLE: HashMap<char, Vec<char>> = {
        let mut m = HashMap::new();
        m.insert('a', vec!['4', '@']);
        m.insert('b', vec!['8']);
        m.insert('c', vec!['(', '{', '[', '<']);
        m.insert('e', vec!['3']);
        m.insert('g', vec!['6', '9']);
        m.insert('i', vec!['1', '!', '|']);
        m.insert('l', vec!['1', '|']);
        m.insert('o', vec!['0']);
        m.insert('s', vec!['$', '5']);
        m.insert('t', vec!['+', '7']);
        m.insert('x', vec!['%']);
        m.insert('z', vec!['2']);
        m
    };
}

/// letter -> glyphs that are both in the table and present in `password`.
fn relevant_subtable(password: &str) -> HashMap<char, Vec<char>> {
    let present: std::collections::HashSet<char> = password.chars().collect();
    let mut out = HashMap::new();
    for (&letter, glyphs) in L33T_TABLE.iter() {
        let filtered: Vec<char> = glyphs.iter().copied().filter(|g| present.contains(g)).collect();
        if !filtered.is_empty() {
            out.insert(letter, filtered);
        }
    }
    out
}

/// Every enumeration assigning exactly one glyph per relevant letter, as
/// a `glyph -> letter` mapping. The empty subtable yields one (identity)
/// enumeration.
fn enumerate_subs(subtable: &HashMap<char, Vec<char>>) -> Vec<HashMap<char, char>> {
    if subtable.is_empty() {
        return vec![HashMap::new()];
    }
    let letters: Vec<char> = subtable.keys().copied().collect();
    letters
        .iter()
        .map(|l| subtable[l].clone())
        .multi_cartesian_product()
        .map(|glyphs| {
            letters
                .iter()
                .copied()
                .zip(glyphs)
                .map(|(letter, glyph)| (glyph, letter))
                .collect::<HashMap<char, char>>()
        })
        .collect()
}

fn apply_sub(password: &str, sub: &HashMap<char, char>) -> String {
    password
        .chars()
        .map(|c| *sub.get(&c).unwrap_or(&c))
        .collect()
}

pub fn matches(password: &str, dictionaries: &RankedDictionaries) -> Vec<Match> {
    let subtable = relevant_subtable(password);
    let mut results = Vec::new();

    for enumeration in enumerate_subs(&subtable) {
        let decoded = apply_sub(password, &enumeration);
        for m in dictionary::matches(&decoded, dictionaries) {
            // check against the original, glyph-bearing slice of the
            // password -- m.token at this point is a substring of the
            // already-decoded text, which by construction never contains
            // the glyphs being substituted away.
            let token_lower = password[m.i..=m.j].to_lowercase();
            let used: HashMap<char, char> = enumeration
                .iter()
                .filter(|(&glyph, _)| token_lower.contains(glyph))
                .map(|(&g, &l)| (g, l))
                .collect();
            if used.is_empty() {
                continue;
            }
            if m.token.chars().count() <= 1 {
                continue;
            }
            results.push(Match {
                matched_word: Some(m.matched_word.clone().unwrap_or_default()),
                l33t: true,
                sub: Some(used),
                token: password[m.i..=m.j].to_string(),
                ..m
            });
        }
    }

    super::sort(&mut results);
    results.dedup_by(|a, b| a.i == b.i && a.j == b.j && a.sub == b.sub && a.dictionary_name == b.dictionary_name);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Map;

    fn dicts() -> RankedDictionaries {
        let lists: Map<String, Vec<String>> = [
            ("d1".to_string(), vec!["password".to_string()]),
        ]
        .into_iter()
        .collect();
        RankedDictionaries::from_word_lists(&lists)
    }

    #[test]
    fn relevant_subtable_is_empty_for_plain_password() {
        assert!(relevant_subtable("").is_empty());
        assert!(relevant_subtable("abc").is_empty());
    }

    #[test]
    fn relevant_subtable_restricts_to_present_glyphs() {
        let t = relevant_subtable("p4ssword");
        assert_eq!(t.get(&'a'), Some(&vec!['4']));
        assert!(!t.contains_key(&'s'));
    }

    #[test]
    fn finds_simple_l33t_substitution() {
        let ms = matches("p4ssword", &dicts());
        assert!(ms.iter().any(|m| m.l33t && m.matched_word.as_deref() == Some("password")));
    }

    #[test]
    fn rejects_single_char_l33t_tokens() {
        let lists: Map<String, Vec<String>> = [("d1".to_string(), vec!["a".to_string()])]
            .into_iter()
            .collect();
        let dicts = RankedDictionaries::from_word_lists(&lists);
        let ms = matches("4", &dicts);
        assert!(ms.is_empty());
    }

    #[test]
    fn plain_dictionary_hit_without_substitution_is_not_emitted_as_l33t() {
        let ms = matches("password", &dicts());
        assert!(ms.is_empty());
    }
}
