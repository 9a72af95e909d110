//! `pwcheck` estimates how many guesses an attacker would need to crack
//! a password, using the same pattern-matching-plus-dynamic-program
//! approach as the well-known zxcvbn family of estimators: spot common
//! low-entropy substructures (dictionary words, keyboard walks,
//! sequences, repeats, dates, years), assign each a guess count, then
//! search for the cheapest way to cover the whole password with
//! non-overlapping patterns.
//!
//! ```
//! use pwcheck::password_strength;
//!
//! let result = password_strength("correct horse battery staple", &[] as &[&str]);
//! assert!(result.score <= 4);
//! ```

pub mod adjacency_graphs;
pub mod config;
pub mod dictionary;
pub mod matching;
pub mod scoring;

pub use config::{reference_year, set_reference_year, Config};
pub use dictionary::{DictionaryError, RankedDictionaries, RankedDictionary};
pub use matching::Match;

/// Result of estimating a password's strength.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(rename_all = "snake_case"))]
pub struct PasswordStrengthResult {
    /// Estimated number of guesses needed to crack the password.
    pub guesses: f64,
    /// `log10` of `guesses`, kept alongside since callers that only need
    /// an order of magnitude shouldn't have to re-derive it.
    pub guesses_log10: f64,
    /// The non-overlapping pattern sequence the estimate is based on, in
    /// left-to-right order.
    pub sequence: Vec<Match>,
    /// A coarse 0-4 score derived from `guesses` (see [`score_for_guesses`]).
    pub score: u8,
    /// Wall-clock time spent computing this result, in milliseconds.
    pub calc_time: f64,
}

/// Maps an estimated guess count to a 0 (trivial) - 4 (very strong)
/// score. The `+ 5.0` offsets are carried over from the upstream
/// reference thresholds verbatim rather than rounded away.
pub fn score_for_guesses(guesses: f64) -> u8 {
    if guesses < 1e3 + 5.0 {
        0
    } else if guesses < 1e6 + 5.0 {
        1
    } else if guesses < 1e8 + 5.0 {
        2
    } else if guesses < 1e10 + 5.0 {
        3
    } else {
        4
    }
}

/// Estimates `password`'s strength against the built-in minimal word
/// lists, treating each of `user_inputs` as an extra dictionary entry
/// (site name, username, and the like — things an attacker who has
/// profiled the user would try first).
pub fn password_strength<S: AsRef<str>>(password: &str, user_inputs: &[S]) -> PasswordStrengthResult {
    password_strength_with_dictionaries(password, user_inputs, &RankedDictionaries::builtin_minimal())
}

/// Like [`password_strength`], but against caller-supplied dictionaries
/// (e.g. loaded via [`RankedDictionaries::load_from_path`]) instead of
/// the built-in minimal set.
pub fn password_strength_with_dictionaries<S: AsRef<str>>(
    password: &str,
    user_inputs: &[S],
    dictionaries: &RankedDictionaries,
) -> PasswordStrengthResult {
    let start = now_millis();
    let merged = dictionaries.with_user_inputs(user_inputs);
    let matches = matching::omnimatch(password, &merged);
    let calc = scoring::most_guessable_match_sequence(password, &matches, false);
    let calc_time = now_millis() - start;

    PasswordStrengthResult {
        guesses: calc.guesses,
        guesses_log10: calc.guesses_log10,
        sequence: calc.sequence,
        score: score_for_guesses(calc.guesses),
        calc_time,
    }
}

/// Like [`password_strength_with_dictionaries`], but against
/// `config.dictionaries` and with `config.reference_year` installed for
/// the duration of the call (restored afterward, regardless of panics).
/// Only the dictionary set is actually isolated per call: the reference
/// year still goes through the same process-wide store described on
/// [`Config`], so two concurrent calls with different reference years can
/// still observe each other's value mid-call.
pub fn password_strength_with_config<S: AsRef<str>>(
    password: &str,
    user_inputs: &[S],
    config: &Config,
) -> PasswordStrengthResult {
    let previous = reference_year();
    set_reference_year(config.reference_year);
    let result = password_strength_with_dictionaries(password, user_inputs, &config.dictionaries);
    set_reference_year(previous);
    result
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_scores_zero() {
        let result = password_strength("", &[] as &[&str]);
        assert_eq!(result.score, 0);
        assert_eq!(result.guesses, 1.0);
    }

    #[test]
    fn common_password_scores_low() {
        let result = password_strength("password", &[] as &[&str]);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn long_random_looking_password_scores_high() {
        let result = password_strength("xQ7$kP2!mW9#vL4@", &[] as &[&str]);
        assert!(result.score >= 3);
    }

    #[test]
    fn user_inputs_are_treated_as_a_dictionary() {
        let with_input = password_strength("mycompany2024", &["mycompany"]);
        let without_input = password_strength("mycompany2024", &[] as &[&str]);
        assert!(with_input.guesses <= without_input.guesses);
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(score_for_guesses(1.0), 0);
        assert_eq!(score_for_guesses(1e4), 1);
        assert_eq!(score_for_guesses(1e7), 2);
        assert_eq!(score_for_guesses(1e9), 3);
        assert_eq!(score_for_guesses(1e11), 4);
    }

    #[test]
    fn calc_time_is_non_negative() {
        let result = password_strength("abcde", &[] as &[&str]);
        assert!(result.calc_time >= 0.0);
    }

    #[test]
    fn config_threads_its_own_dictionaries_through() {
        use std::collections::HashMap;
        use std::sync::Arc;

        let lists: HashMap<String, Vec<String>> =
            [("custom".to_string(), vec!["horsebattery".to_string()])].into_iter().collect();
        let config = Config {
            dictionaries: Arc::new(RankedDictionaries::from_word_lists(&lists)),
            ..Config::default()
        };

        let with_custom_dict = password_strength_with_config("horsebattery", &[] as &[&str], &config);
        let without_custom_dict = password_strength("horsebattery", &[] as &[&str]);
        assert!(with_custom_dict.guesses < without_custom_dict.guesses);
    }
}
