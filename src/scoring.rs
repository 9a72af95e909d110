//! Guess estimation and the optimal-match-sequence dynamic program.
//!
//! Grounded on `scoring.rs.teacher`: the `Optimal`/`update`/
//! `bruteforce_update`/`unwind` dynamic program is kept nearly verbatim.
//! Two things change throughout: guesses are `f64` (a password's guess
//! count can exceed 2^53, which `u64` represents exactly but which loses
//! precision once multiplied through a long match sequence only as a
//! float anyway), and the reference year is read from
//! [`crate::config::reference_year`] instead of a hardcoded constant.

use std::cmp;
use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::adjacency_graphs::{Graph, GRAPHS};
use crate::matching::Match;

#[derive(Debug, Clone)]
pub struct GuessCalculation {
    pub guesses: f64,
    pub guesses_log10: f64,
    pub sequence: Vec<Match>,
}

#[derive(Debug, Clone)]
struct Optimal {
    m: Vec<HashMap<usize, Match>>,
    pi: Vec<HashMap<usize, f64>>,
    g: Vec<HashMap<usize, f64>>,
}

const MIN_YEAR_SPACE: i32 = 20;
const BRUTEFORCE_CARDINALITY: f64 = 10.0;
const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10000.0;
const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

pub fn most_guessable_match_sequence(
    password: &str,
    matches: &[Match],
    exclude_additive: bool,
) -> GuessCalculation {
    let n = password.len();

    if n == 0 {
        return GuessCalculation {
            guesses: 1.0,
            guesses_log10: 0.0,
            sequence: Vec::new(),
        };
    }

    let mut matches_by_j: Vec<Vec<Match>> = (0..n).map(|_| Vec::new()).collect();
    for m in matches {
        matches_by_j[m.j].push(m.clone());
    }
    for lst in &mut matches_by_j {
        lst.sort_by_key(|m| m.i);
    }

    let mut optimal = Optimal {
        m: (0..n).map(|_| HashMap::new()).collect(),
        pi: (0..n).map(|_| HashMap::new()).collect(),
        g: (0..n).map(|_| HashMap::new()).collect(),
    };

    fn update(mut m: Match, l: usize, password: &str, optimal: &mut Optimal, exclude_additive: bool) {
        let k = m.j;
        let mut pi = estimate_guesses(&mut m, password);
        if l > 1 {
            pi *= optimal.pi[m.i - 1][&(l - 1)];
        }
        let mut g = factorial(l) * pi;
        if !exclude_additive {
            g += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi((l - 1) as i32);
        }
        for (&competing_l, &competing_g) in &optimal.g[k] {
            if competing_l > l {
                continue;
            }
            if competing_g <= g {
                return;
            }
        }
        optimal.g[k].insert(l, g);
        optimal.m[k].insert(l, m);
        optimal.pi[k].insert(l, pi);
    }

    fn bruteforce_update(k: usize, password: &str, optimal: &mut Optimal, exclude_additive: bool) {
        let m = make_bruteforce_match(0, k, password);
        update(m, 1, password, optimal, exclude_additive);
        for i in 1..(k + 1) {
            let m = make_bruteforce_match(i, k, password);
            for (l, last_m) in optimal.m[i - 1].clone() {
                if last_m.pattern == "bruteforce" {
                    continue;
                }
                update(m.clone(), l + 1, password, optimal, exclude_additive);
            }
        }
    }

    fn make_bruteforce_match(i: usize, j: usize, password: &str) -> Match {
        Match {
            pattern: "bruteforce".to_string(),
            token: password[i..=j].to_string(),
            i,
            j,
            ..Default::default()
        }
    }

    fn unwind(n: usize, optimal: &mut Optimal) -> Vec<Match> {
        let mut optimal_match_sequence = Vec::new();
        let mut k = n - 1;
        let mut l = None;
        let mut g = None;
        for (candidate_l, candidate_g) in &optimal.g[k] {
            if g.is_none() || *candidate_g < *g.as_ref().unwrap() {
                l = Some(*candidate_l);
                g = Some(*candidate_g);
            }
        }

        loop {
            let m = &optimal.m[k][&l.unwrap()];
            optimal_match_sequence.insert(0, m.clone());
            if m.i == 0 {
                break;
            }
            k = m.i - 1;
            l = l.map(|x| x - 1);
        }
        optimal_match_sequence
    }

    for (k, match_by_j) in matches_by_j.iter().enumerate() {
        for m in match_by_j {
            if m.i > 0 {
                let keys: Vec<usize> = optimal.m[m.i - 1].keys().cloned().collect();
                for l in keys {
                    update(m.clone(), l + 1, password, &mut optimal, exclude_additive);
                }
            } else {
                update(m.clone(), 1, password, &mut optimal, exclude_additive);
            }
        }
        bruteforce_update(k, password, &mut optimal, exclude_additive);
    }
    let optimal_match_sequence = unwind(n, &mut optimal);
    let optimal_l = optimal_match_sequence.len();

    let guesses = optimal.g[n - 1][&optimal_l];

    GuessCalculation {
        guesses,
        guesses_log10: guesses.log10(),
        sequence: optimal_match_sequence,
    }
}

fn factorial(n: usize) -> f64 {
    if n < 2 {
        return 1.0;
    }
    (2..=n).fold(1.0, |acc, x| acc * x as f64)
}

fn estimate_guesses(m: &mut Match, password: &str) -> f64 {
    if let Some(guesses) = m.guesses {
        return guesses;
    }
    let min_guesses = if m.token.len() < password.len() {
        if m.token.chars().count() == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };
    let guesses = ESTIMATION_FUNCTIONS
        .iter()
        .find(|x| x.0 == m.pattern)
        .unwrap()
        .1
        .estimate(m);
    m.guesses = Some(guesses.max(min_guesses));
    m.guesses.unwrap()
}

lazy_static! {
    static ref ESTIMATION_FUNCTIONS: [(&'static str, Box<dyn Estimator>); 7] = [
        ("bruteforce", Box::new(BruteForceEstimator {})),
        ("dictionary", Box::new(DictionaryEstimator {})),
        ("spatial", Box::new(SpatialEstimator {})),
        ("repeat", Box::new(RepeatEstimator {})),
        ("sequence", Box::new(SequenceEstimator {})),
        ("regex", Box::new(RegexEstimator {})),
        ("date", Box::new(DateEstimator {})),
    ];
}

trait Estimator: Sync {
    fn estimate(&self, m: &mut Match) -> f64;
}

struct BruteForceEstimator {}

impl Estimator for BruteForceEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        let len = m.token.chars().count() as i32;
        let guesses = BRUTEFORCE_CARDINALITY.powi(len);
        let min_guesses = if len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
        };
        guesses.max(min_guesses)
    }
}

struct DictionaryEstimator {}

impl Estimator for DictionaryEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        m.base_guesses = m.rank.map(|x| x as f64);
        m.uppercase_variations = Some(uppercase_variations(m));
        m.l33t_variations = Some(l33t_variations(m));
        m.base_guesses.unwrap()
            * m.uppercase_variations.unwrap()
            * m.l33t_variations.unwrap()
            * if m.reversed { 2.0 } else { 1.0 }
    }
}

fn uppercase_variations(m: &Match) -> f64 {
    let word = &m.token;
    if word.chars().all(|c| !c.is_uppercase()) || word.to_lowercase() == *word {
        return 1.0;
    }
    if word.chars().next().unwrap().is_uppercase()
        || word.chars().last().unwrap().is_uppercase()
        || word.chars().all(char::is_uppercase)
    {
        return 2.0;
    }
    let upper = word.chars().filter(|c| c.is_uppercase()).count();
    let lower = word.chars().filter(|c| c.is_lowercase()).count();
    (1..=cmp::min(upper, lower)).map(|i| n_ck(upper + lower, i)).sum()
}

fn l33t_variations(m: &Match) -> f64 {
    if !m.l33t {
        return 1.0;
    }
    let mut variations = 1.0;
    if let Some(sub) = &m.sub {
        let token = m.token.to_lowercase();
        for (&subbed_glyph, _unsubbed_letter) in sub {
            let subbed = token.chars().filter(|&c| c == subbed_glyph).count();
            let unsubbed = token
                .chars()
                .filter(|&c| c == *_unsubbed_letter)
                .count();
            if subbed == 0 || unsubbed == 0 {
                variations *= 2.0;
            } else {
                let p = cmp::min(unsubbed, subbed);
                let possibilities: f64 = (1..=p).map(|i| n_ck(unsubbed + subbed, i)).sum();
                variations *= possibilities;
            }
        }
    }
    variations
}

fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        0.0
    } else if k == 0 {
        1.0
    } else {
        let mut r: f64 = 1.0;
        let mut n = n;
        for d in 1..=k {
            r *= n as f64;
            r /= d as f64;
            n -= 1;
        }
        r
    }
}

struct SpatialEstimator {}

impl Estimator for SpatialEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        let graph_name = m.graph.as_deref().unwrap();
        let (starts, degree) = if graph_name == "qwerty" || graph_name == "dvorak" {
            keyboard_starting_positions_and_degree()
        } else {
            keypad_starting_positions_and_degree()
        };
        let mut guesses = 0.0;
        let len = m.token.chars().count();
        let turns = m.turns.unwrap();
        for i in 2..=len {
            let possible_turns = cmp::min(turns, i - 1);
            for j in 1..=possible_turns {
                guesses += n_ck(i - 1, j - 1) * starts * degree.powi(j as i32);
            }
        }
        if let Some(shifted_count) = m.shifted_count {
            let unshifted_count = len - shifted_count;
            if shifted_count == 0 || unshifted_count == 0 {
                guesses *= 2.0;
            } else {
                let shifted_variations: f64 = (1..=cmp::min(shifted_count, unshifted_count))
                    .map(|i| n_ck(shifted_count + unshifted_count, i))
                    .sum();
                guesses *= shifted_variations;
            }
        }
        guesses
    }
}

fn keyboard_starting_positions_and_degree() -> (f64, f64) {
    let graph: &Graph = GRAPHS["qwerty"];
    (graph.starting_positions() as f64, graph.average_degree())
}

fn keypad_starting_positions_and_degree() -> (f64, f64) {
    let graph: &Graph = GRAPHS["keypad"];
    (graph.starting_positions() as f64, graph.average_degree())
}

struct RepeatEstimator {}

impl Estimator for RepeatEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        m.base_guesses.unwrap() * m.repeat_count.unwrap() as f64
    }
}

struct SequenceEstimator {}

impl Estimator for SequenceEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        let first_chr = m.token.chars().next().unwrap();
        let mut base_guesses = if ['a', 'A', 'z', 'Z', '0', '1', '9'].contains(&first_chr) {
            4.0
        } else if first_chr.is_ascii_digit() {
            10.0
        } else {
            26.0
        };
        if !m.ascending.unwrap_or(false) {
            base_guesses *= 2.0;
        }
        base_guesses * m.token.chars().count() as f64
    }
}

struct RegexEstimator {}

impl Estimator for RegexEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        let name = m.regex_name.as_deref().unwrap();
        if let Some(&base) = CHAR_CLASS_BASES.get(name) {
            base.powi(m.token.chars().count() as i32)
        } else {
            match name {
                "recent_year" => {
                    let year: i32 = m.token.parse().unwrap();
                    let year_space = (year - crate::config::reference_year()).abs();
                    year_space.max(MIN_YEAR_SPACE) as f64
                }
                _ => unreachable!("no estimator registered for regex pattern {name}"),
            }
        }
    }
}

lazy_static! {
    static ref CHAR_CLASS_BASES: HashMap<&'static str, f64> = {
        let mut table = HashMap::with_capacity(6);
        table.insert("alpha_lower", 26.0);
        table.insert("alpha_upper", 26.0);
        table.insert("alpha", 52.0);
        table.insert("alphanumeric", 62.0);
        table.insert("digits", 10.0);
        table.insert("symbols", 33.0);
        table
    };
}

struct DateEstimator {}

impl Estimator for DateEstimator {
    fn estimate(&self, m: &mut Match) -> f64 {
        let year_space = cmp::max((m.year.unwrap() - crate::config::reference_year()).abs(), MIN_YEAR_SPACE);
        let mut guesses = year_space as f64 * 365.0;
        if m.separator.is_some() {
            guesses *= 4.0;
        }
        guesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn test_n_ck() {
        let test_data = [
            (0, 0, 1.0),
            (1, 0, 1.0),
            (5, 0, 1.0),
            (0, 1, 0.0),
            (0, 5, 0.0),
            (2, 1, 2.0),
            (4, 2, 6.0),
            (33, 7, 4272048.0),
        ];
        for &(n, k, result) in &test_data {
            assert_eq!(n_ck(n, k), result);
        }
    }

    quickcheck! {
        fn test_n_ck_mirror_identity(n: usize, k: usize) -> TestResult {
            if k > n || n >= 60 {
                return TestResult::discard();
            }
            TestResult::from_bool((n_ck(n, k) - n_ck(n, n - k)).abs() < 1e-6)
        }

        fn test_n_ck_pascals_triangle(n: usize, k: usize) -> TestResult {
            if n == 0 || k == 0 || n >= 60 {
                return TestResult::discard();
            }
            TestResult::from_bool((n_ck(n, k) - (n_ck(n - 1, k - 1) + n_ck(n - 1, k))).abs() < 1e-6)
        }
    }

    #[test]
    fn test_search_returns_one_bruteforce_match_given_empty_match_sequence() {
        let password = "0123456789";
        let result = most_guessable_match_sequence(password, &[], true);
        assert_eq!(result.sequence.len(), 1);
        let m0 = &result.sequence[0];
        assert_eq!(m0.pattern, "bruteforce");
        assert_eq!(m0.token, password);
        assert_eq!(m0.i, 0);
        assert_eq!(m0.j, 9);
    }

    #[test]
    fn test_search_returns_match_and_bruteforce_when_match_covers_prefix_of_password() {
        let password = "0123456789";
        let m = Match {
            i: 0,
            j: 5,
            token: password[0..=5].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };

        let result = most_guessable_match_sequence(password, &[m.clone()], true);
        assert_eq!(result.sequence.len(), 2);
        assert_eq!(result.sequence[0], m);
        let m1 = &result.sequence[1];
        assert_eq!(m1.pattern, "bruteforce");
        assert_eq!(m1.i, 6);
        assert_eq!(m1.j, 9);
    }

    #[test]
    fn test_search_returns_bruteforce_and_match_when_match_covers_a_suffix() {
        let password = "0123456789";
        let m = Match {
            i: 3,
            j: 9,
            token: password[3..=9].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };

        let result = most_guessable_match_sequence(password, &[m.clone()], true);
        assert_eq!(result.sequence.len(), 2);
        let m0 = &result.sequence[0];
        assert_eq!(m0.pattern, "bruteforce");
        assert_eq!(m0.i, 0);
        assert_eq!(m0.j, 2);
        assert_eq!(result.sequence[1], m);
    }

    #[test]
    fn test_search_returns_bruteforce_and_match_when_match_covers_an_infix() {
        let password = "0123456789";
        let m = Match {
            i: 1,
            j: 8,
            token: password[1..=8].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };

        let result = most_guessable_match_sequence(password, &[m.clone()], true);
        assert_eq!(result.sequence.len(), 3);
        assert_eq!(result.sequence[1], m);
        let m0 = &result.sequence[0];
        let m2 = &result.sequence[2];
        assert_eq!(m0.pattern, "bruteforce");
        assert_eq!(m0.i, 0);
        assert_eq!(m0.j, 0);
        assert_eq!(m2.pattern, "bruteforce");
        assert_eq!(m2.i, 9);
        assert_eq!(m2.j, 9);
    }

    #[test]
    fn test_search_chooses_lower_guesses_match_given_two_matches_of_same_span() {
        let password = "0123456789";
        let mut m0 = Match {
            i: 0,
            j: 9,
            token: password.to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };
        let m1 = Match {
            guesses: Some(2.0),
            ..m0.clone()
        };

        let result = most_guessable_match_sequence(password, &[m0.clone(), m1.clone()], true);
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0], m0);
        m0.guesses = Some(3.0);
        let result = most_guessable_match_sequence(password, &[m0.clone(), m1.clone()], true);
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0], m1);
    }

    #[test]
    fn test_search_when_m0_covers_m1_and_m2_choose_m0_when_m0_lt_m1_t_m2_t_fact_2() {
        let password = "0123456789";
        let m0 = Match {
            i: 0,
            j: 9,
            token: password.to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(3.0),
            ..Default::default()
        };
        let m1 = Match {
            i: 0,
            j: 3,
            token: password[0..=3].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(2.0),
            ..Default::default()
        };
        let m2 = Match {
            i: 4,
            j: 9,
            token: password[4..=9].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };

        let result = most_guessable_match_sequence(password, &[m0.clone(), m1.clone(), m2.clone()], true);
        assert_eq!(result.guesses, 3.0);
        assert_eq!(result.sequence, vec![m0]);
    }

    #[test]
    fn test_search_when_m0_covers_m1_and_m2_choose_m1_m2_when_m0_gt_m1_t_m2_t_fact_2() {
        let password = "0123456789";
        let m0 = Match {
            i: 0,
            j: 9,
            token: password.to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(5.0),
            ..Default::default()
        };
        let m1 = Match {
            i: 0,
            j: 3,
            token: password[0..=3].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(2.0),
            ..Default::default()
        };
        let m2 = Match {
            i: 4,
            j: 9,
            token: password[4..=9].to_string(),
            pattern: "dictionary".to_string(),
            guesses: Some(1.0),
            ..Default::default()
        };

        let result = most_guessable_match_sequence(password, &[m0.clone(), m1.clone(), m2.clone()], true);
        assert_eq!(result.guesses, 4.0);
        assert_eq!(result.sequence, vec![m1, m2]);
    }
}
