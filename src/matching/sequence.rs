//! Sequence matcher: maximal runs of consecutive code points stepping by
//! a constant +1 or -1 within one alphabet (lowercase, uppercase, or
//! digits). Minimum run length 3.

use super::Match;

#[derive(Clone, Copy, PartialEq)]
enum Alphabet {
    Lower,
    Upper,
    Digits,
}

impl Alphabet {
    fn of(c: char) -> Option<Alphabet> {
        if c.is_ascii_lowercase() {
            Some(Alphabet::Lower)
        } else if c.is_ascii_uppercase() {
            Some(Alphabet::Upper)
        } else if c.is_ascii_digit() {
            Some(Alphabet::Digits)
        } else {
            None
        }
    }

    fn name(self) -> &'static str {
        match self {
            Alphabet::Lower => "lower",
            Alphabet::Upper => "upper",
            Alphabet::Digits => "digits",
        }
    }

    fn space(self) -> usize {
        match self {
            Alphabet::Lower | Alphabet::Upper => 26,
            Alphabet::Digits => 10,
        }
    }
}

pub fn matches(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let byte_offsets: Vec<usize> = {
        let mut v: Vec<usize> = password.char_indices().map(|(b, _)| b).collect();
        v.push(password.len());
        v
    };
    let n = chars.len();

    let mut results = Vec::new();
    let mut i = 0usize;
    while i < n {
        let alphabet = match Alphabet::of(chars[i]) {
            Some(a) => a,
            None => {
                i += 1;
                continue;
            }
        };

        let mut j = i;
        let mut step: Option<i32> = None;
        loop {
            if j + 1 >= n || Alphabet::of(chars[j + 1]) != Some(alphabet) {
                break;
            }
            let delta = chars[j + 1] as i32 - chars[j] as i32;
            match step {
                None if delta == 1 || delta == -1 => {
                    step = Some(delta);
                    j += 1;
                }
                Some(s) if delta == s => {
                    j += 1;
                }
                _ => break,
            }
        }

        let run_len = j - i + 1;
        if run_len >= 3 {
            let start = byte_offsets[i];
            let end = byte_offsets[j + 1] - 1;
            results.push(Match {
                pattern: "sequence".to_string(),
                i: start,
                j: end,
                token: password[start..=end].to_string(),
                sequence_name: Some(alphabet.name().to_string()),
                sequence_space: Some(alphabet.space()),
                ascending: Some(step.unwrap_or(1) == 1),
                ..Default::default()
            });
            // resume scanning from the run's last char: a direction change
            // (e.g. "abcba") pivots on a shared boundary character, which
            // must be allowed to start the next run.
            i = j;
        } else {
            i += 1;
        }
    }

    super::sort(&mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ascending_lowercase_run() {
        let ms = matches("abcde");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].sequence_name.as_deref(), Some("lower"));
        assert_eq!(ms[0].ascending, Some(true));
        assert_eq!(ms[0].i, 0);
        assert_eq!(ms[0].j, 4);
    }

    #[test]
    fn detects_descending_digit_run() {
        let ms = matches("7654");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].sequence_name.as_deref(), Some("digits"));
        assert_eq!(ms[0].ascending, Some(false));
    }

    #[test]
    fn runs_under_three_are_discarded() {
        assert!(matches("ab").is_empty());
    }

    #[test]
    fn overlapping_runs_with_direction_change_split_into_separate_matches() {
        let ms = matches("abcbabc");
        assert_eq!(ms.len(), 3);
    }
}
