//! Dictionary and reverse-dictionary matchers.
//!
//! Grounded on `original_source/matching/dictionary.go`: every substring
//! of the password is lowercased and looked up in every ranked
//! dictionary; each hit becomes a `Match`. The reverse matcher runs the
//! same scan over the reversed password and translates indices back.

use super::Match;
use crate::dictionary::RankedDictionaries;

pub fn matches(password: &str, dictionaries: &RankedDictionaries) -> Vec<Match> {
    matches_against(password, dictionaries, false)
}

pub fn reverse_matches(password: &str, dictionaries: &RankedDictionaries) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let reversed: String = chars.iter().rev().collect();
    let forward_offsets = char_byte_offsets(password);
    let n_chars = chars.len();

    matches_against(&reversed, dictionaries, false)
        .into_iter()
        .map(|m| {
            let rev_char_start = char_index_of_byte(&reversed, m.i);
            let rev_char_end = char_index_of_byte(&reversed, m.j) + 1; // exclusive
            let orig_char_start = n_chars - rev_char_end;
            let orig_char_end = n_chars - rev_char_start; // exclusive
            let i = forward_offsets[orig_char_start];
            let j = forward_offsets[orig_char_end] - 1;
            Match {
                i,
                j,
                token: password[i..=j].to_string(),
                reversed: true,
                ..m
            }
        })
        .collect()
}

/// Byte offset of the start of each character, plus one trailing entry
/// for the byte length of the string (so a half-open `[start, end)`
/// char range maps cleanly to a byte range).
fn char_byte_offsets(s: &str) -> Vec<usize> {
    let mut offsets: Vec<usize> = s.char_indices().map(|(b, _)| b).collect();
    offsets.push(s.len());
    offsets
}

fn char_index_of_byte(s: &str, byte: usize) -> usize {
    s.char_indices()
        .position(|(b, _)| b == byte)
        .expect("byte offset must land on a char boundary")
}

fn matches_against(password: &str, dictionaries: &RankedDictionaries, reversed: bool) -> Vec<Match> {
    let lower = password.to_lowercase();
    let offsets = char_byte_offsets(&lower);
    let n = offsets.len() - 1; // number of chars
    let mut results = Vec::new();

    for (dict_name, dict) in dictionaries.iter() {
        for i in 0..n {
            for j in i..n {
                let start = offsets[i];
                let end = offsets[j + 1];
                let word = &lower[start..end];
                if let Some(&rank) = dict.get(word) {
                    let orig_start = char_byte_offsets(password)[i];
                    let orig_end = char_byte_offsets(password)[j + 1];
                    results.push(Match {
                        pattern: "dictionary".to_string(),
                        i: orig_start,
                        j: orig_end - 1,
                        token: password[orig_start..orig_end].to_string(),
                        matched_word: Some(word.to_string()),
                        rank: Some(rank),
                        dictionary_name: Some(dict_name.to_string()),
                        reversed,
                        ..Default::default()
                    });
                }
            }
        }
    }

    super::sort(&mut results);
    results
}
