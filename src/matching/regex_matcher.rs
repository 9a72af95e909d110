//! Regex matcher. Upstream runs several named patterns through this
//! matcher; only `recent_year` contributes to scoring by default, so
//! that's the only one wired in here.

use lazy_static::lazy_static;
use regex::Regex;

use super::Match;

lazy_static! {
    static ref RECENT_YEAR: Regex = Regex::new(r"\d{4}").unwrap();
}

pub fn matches(password: &str) -> Vec<Match> {
    let mut results = Vec::new();

    for m in RECENT_YEAR.find_iter(password) {
        let year: i32 = match m.as_str().parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        if !(1900..=2050).contains(&year) {
            continue;
        }
        results.push(Match {
            pattern: "regex".to_string(),
            i: m.start(),
            j: m.end() - 1,
            token: m.as_str().to_string(),
            regex_name: Some("recent_year".to_string()),
            ..Default::default()
        });
    }

    super::sort(&mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_recent_year_in_range() {
        let ms = matches("class1998");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].token, "1998");
        assert_eq!(ms[0].regex_name.as_deref(), Some("recent_year"));
    }

    #[test]
    fn rejects_years_outside_range() {
        assert!(matches("18001234").is_empty() || matches("1800").is_empty());
        let ms = matches("1899");
        assert!(ms.is_empty());
        let ms = matches("2051");
        assert!(ms.is_empty());
    }

    #[test]
    fn finds_non_overlapping_occurrences_left_to_right() {
        let ms = matches("19992000");
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].token, "1999");
        assert_eq!(ms[1].token, "2000");
    }
}
