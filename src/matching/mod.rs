//! `Match` — the central record produced by every pattern matcher — plus
//! `sort` and `omnimatch`, the glue that runs all matchers over a
//! password and hands the concatenated, sorted result to scoring.

mod date;
mod dictionary;
mod l33t;
mod regex_matcher;
mod repeat;
mod sequence;
mod spatial;

use std::collections::HashMap;

use crate::dictionary::RankedDictionaries;

#[cfg(feature = "builder")]
use derive_builder::Builder;

/// One recognized low-entropy pattern occurrence within a password.
///
/// Deliberately a flat struct rather than an enum-per-pattern: every
/// matcher, the scoring pass, and the dynamic-programming search all key
/// off the `pattern` tag and read/write whichever fields apply to that
/// pattern, so a flat struct with `Option` fields mirrors how the data
/// actually flows rather than forcing an artificial enum boundary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "builder", derive(Builder))]
#[cfg_attr(feature = "builder", builder(default, setter(strip_option, into)))]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(rename_all = "snake_case"))]
pub struct Match {
    pub pattern: String,
    pub i: usize,
    pub j: usize,
    pub token: String,

    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub guesses: Option<f64>,

    // dictionary / l33t / reverse-dictionary
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub matched_word: Option<String>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub rank: Option<usize>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub dictionary_name: Option<String>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub reversed: bool,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub l33t: bool,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub sub: Option<HashMap<char, char>>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub base_guesses: Option<f64>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub uppercase_variations: Option<f64>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub l33t_variations: Option<f64>,

    // spatial
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub graph: Option<String>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub turns: Option<usize>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub shifted_count: Option<usize>,

    // repeat
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub base_token: Option<String>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub repeat_count: Option<usize>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub base_matches: Option<Vec<Match>>,

    // sequence
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub sequence_name: Option<String>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub sequence_space: Option<usize>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub ascending: Option<bool>,

    // regex
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub regex_name: Option<String>,

    // date
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub year: Option<i32>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub month: Option<i32>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub day: Option<i32>,
    #[cfg_attr(feature = "ser", serde(skip_serializing_if = "Option::is_none"))]
    pub separator: Option<String>,
}

impl Match {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Orders matches by `(i asc, j asc)`, stable on ties — the contract
/// every matcher's output and `omnimatch`'s concatenation must satisfy.
pub fn sort(matches: &mut [Match]) {
    matches.sort_by(|a, b| a.i.cmp(&b.i).then(a.j.cmp(&b.j)));
}

/// Runs every matcher over `password` (using `dictionaries`, already
/// merged with any user inputs via `RankedDictionaries::with_user_inputs`)
/// and returns the sorted concatenation of their outputs.
pub fn omnimatch(password: &str, dictionaries: &RankedDictionaries) -> Vec<Match> {
    if password.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    matches.extend(dictionary::matches(password, dictionaries));
    matches.extend(dictionary::reverse_matches(password, dictionaries));
    matches.extend(l33t::matches(password, dictionaries));
    matches.extend(spatial::matches(password));
    matches.extend(sequence::matches(password));
    matches.extend(repeat::matches(password, dictionaries));
    matches.extend(date::matches(password));
    matches.extend(regex_matcher::matches(password));

    sort(&mut matches);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_orders_by_i_then_j_stably() {
        let mut ms = vec![
            Match {
                i: 2,
                j: 2,
                token: "c".into(),
                ..Default::default()
            },
            Match {
                i: 0,
                j: 1,
                token: "a".into(),
                ..Default::default()
            },
            Match {
                i: 0,
                j: 1,
                token: "b".into(),
                ..Default::default()
            },
            Match {
                i: 1,
                j: 1,
                token: "d".into(),
                ..Default::default()
            },
        ];
        sort(&mut ms);
        let tokens: Vec<&str> = ms.iter().map(|m| m.token.as_str()).collect();
        assert_eq!(tokens, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn omnimatch_is_deterministic() {
        let dicts = RankedDictionaries::builtin_minimal();
        let a = omnimatch("r0sebudmaelstrom11/20/91aaaa", &dicts);
        let b = omnimatch("r0sebudmaelstrom11/20/91aaaa", &dicts);
        assert_eq!(a, b);
    }

    #[test]
    fn omnimatch_on_empty_password_is_empty() {
        let dicts = RankedDictionaries::builtin_minimal();
        assert!(omnimatch("", &dicts).is_empty());
    }
}
