//! Repeat matcher: finds substrings of the form `base^k`, `k >= 2`.
//!
//! Grounded on `original_source/matching/repeat.go`'s greedy-vs-lazy
//! regex dance. `fancy-regex` (already a teacher dependency) supports
//! backreferences directly, so the reference's actual control flow is
//! reproduced rather than hand-rolled via a KMP failure function.

use fancy_regex::Regex;
use lazy_static::lazy_static;

use super::Match;
use crate::dictionary::RankedDictionaries;

lazy_static! {
    static ref GREEDY: Regex = Regex::new(r"^(.+)\1+").unwrap();
    static ref LAZY: Regex = Regex::new(r"^(.+?)\1+").unwrap();
    static ref LAZY_ANCHORED: Regex = Regex::new(r"^(.+?)\1+$").unwrap();
}

pub fn matches(password: &str, dictionaries: &RankedDictionaries) -> Vec<Match> {
    let mut results = Vec::new();
    let boundaries: Vec<usize> = password.char_indices().map(|(b, _)| b).collect();
    let n = password.len();

    let mut last_p: Option<usize> = None;
    let mut idx = 0usize;
    while idx < boundaries.len() {
        let p = boundaries[idx];
        if Some(p) == last_p {
            break;
        }
        last_p = Some(p);

        let slice = &password[p..];
        let greedy = GREEDY.find(slice).ok().flatten();
        let lazy = LAZY.find(slice).ok().flatten();

        let (greedy_m, lazy_m) = match (greedy, lazy) {
            (Some(g), Some(l)) => (g, l),
            _ => {
                idx += 1;
                continue;
            }
        };

        let (base, span_len) = if greedy_m.end() > lazy_m.end() {
            let greedy_span = &slice[..greedy_m.end()];
            let caps = LAZY_ANCHORED.captures(greedy_span).ok().flatten();
            match caps {
                Some(c) => (c.get(1).unwrap().as_str().to_string(), greedy_m.end()),
                None => (lazy_captures_base(slice), lazy_m.end()),
            }
        } else {
            (lazy_captures_base(slice), lazy_m.end())
        };

        if base.is_empty() || span_len == 0 {
            idx += 1;
            continue;
        }
        let repeat_count = span_len / base.len();
        if repeat_count < 2 {
            idx += 1;
            continue;
        }

        let recursive = crate::matching::omnimatch(&base, dictionaries);
        let calc = crate::scoring::most_guessable_match_sequence(&base, &recursive, false);

        let i = p;
        let j = p + span_len - 1;
        results.push(Match {
            pattern: "repeat".to_string(),
            i,
            j,
            token: password[i..=j].to_string(),
            base_token: Some(base),
            repeat_count: Some(repeat_count),
            base_guesses: Some(calc.guesses),
            base_matches: Some(calc.sequence),
            ..Default::default()
        });

        // resume scanning just past this match (p' = j + 1), not at the
        // next char boundary, so the span we just covered isn't rescanned.
        let next = j + 1;
        if next >= n {
            break;
        }
        match boundaries.iter().position(|&b| b == next) {
            Some(next_idx) => idx = next_idx,
            None => break,
        }
    }

    super::sort(&mut results);
    results
}

fn lazy_captures_base(slice: &str) -> String {
    LAZY.captures(slice)
        .ok()
        .flatten()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dicts() -> RankedDictionaries {
        RankedDictionaries::default()
    }

    #[test]
    fn single_char_repeat() {
        let ms = matches("aaaaa", &dicts());
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].base_token.as_deref(), Some("a"));
        assert_eq!(ms[0].repeat_count, Some(5));
        assert_eq!(ms[0].i, 0);
        assert_eq!(ms[0].j, 4);
    }

    #[test]
    fn multi_char_base_is_shortest() {
        let ms = matches("abab", &dicts());
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].base_token.as_deref(), Some("ab"));
        assert_eq!(ms[0].repeat_count, Some(2));
    }

    #[test]
    fn finds_shortest_base_even_when_a_longer_repeat_also_exists() {
        let ms = matches("abababab", &dicts());
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].base_token.as_deref(), Some("ab"));
        assert_eq!(ms[0].repeat_count, Some(4));
    }

    #[test]
    fn no_match_without_repetition() {
        assert!(matches("abcdef", &dicts()).is_empty());
    }

    #[test]
    fn resumes_past_the_match_instead_of_rescanning_its_span() {
        let ms = matches("aaaa1234", &dicts());
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].i, 0);
        assert_eq!(ms[0].j, 3);
        assert_eq!(ms[0].base_token.as_deref(), Some("a"));
        assert_eq!(ms[0].repeat_count, Some(4));
    }
}
