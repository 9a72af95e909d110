//! Date matcher. Two passes: digits split by a separator, and bare runs
//! of 4-8 digits tried under every `{dmy, mdy, ymd, ydm}` permutation.
//! Ambiguity is resolved by picking the candidate whose year is closest
//! to the reference year, tie-broken `mdy > dmy > ymd > ydm`.

use super::Match;

const SEPARATORS: &[&str] = &["", " ", "-", "/", "\\", "_", "."];

#[derive(Clone, Copy)]
struct Candidate {
    year: i32,
    month: i32,
    day: i32,
}

pub fn matches(password: &str) -> Vec<Match> {
    let mut results = Vec::new();
    results.extend(separated_matches(password));
    results.extend(no_separator_matches(password));
    super::sort(&mut results);
    results
}

fn expand_year(yy: i32) -> i32 {
    // original_source/matching/date_test.go::Test_twoToFourDigitYear:
    // the cutoff is 50, not the looser "yy < 20" some summaries of this
    // matcher use.
    if !(0..=99).contains(&yy) {
        yy
    } else if yy > 50 {
        1900 + yy
    } else {
        2000 + yy
    }
}

fn valid_year(y: i32) -> bool {
    (1000..=2050).contains(&y)
}

fn valid_date(y: i32, m: i32, d: i32) -> bool {
    (1..=12).contains(&m) && (1..=31).contains(&d) && valid_year(y)
}

fn separated_matches(password: &str) -> Vec<Match> {
    let reference_year = crate::config::reference_year();
    let chars: Vec<char> = password.chars().collect();
    let byte_offsets: Vec<usize> = {
        let mut v: Vec<usize> = password.char_indices().map(|(b, _)| b).collect();
        v.push(password.len());
        v
    };
    let n = chars.len();
    let mut results = Vec::new();

    for i in 0..n {
        for sep in SEPARATORS {
            if let Some((end, cand, sep_str)) = try_separated_at(&chars, i, sep, reference_year) {
                let start_b = byte_offsets[i];
                let end_b = byte_offsets[end] - 1;
                results.push(Match {
                    pattern: "date".to_string(),
                    i: start_b,
                    j: end_b,
                    token: password[start_b..=end_b].to_string(),
                    year: Some(cand.year),
                    month: Some(cand.month),
                    day: Some(cand.day),
                    separator: Some(sep_str),
                    ..Default::default()
                });
            }
        }
    }

    results
}

/// Attempts `DD sep MM sep YYYY` (and field-width permutations) anchored
/// at char index `i`, trying both a year-last (`mdy`/`dmy`) and a
/// year-first (`ymd`) field order. Returns the exclusive end char index,
/// the chosen candidate, and the separator actually used.
fn try_separated_at(
    chars: &[char],
    i: usize,
    sep: &str,
    reference_year: i32,
) -> Option<(usize, Candidate, String)> {
    let sep_chars: Vec<char> = sep.chars().collect();
    let n = chars.len();
    let mut found: Vec<(usize, Candidate)> = Vec::new();

    // year last: DD/MM/YYYY or MM/DD/YYYY
    for d1_len in 1..=2usize {
        for d2_len in 1..=2usize {
            for d3_len in [2usize, 4usize] {
                let p1_end = i + d1_len;
                let p2_start = p1_end + sep_chars.len();
                let p2_end = p2_start + d2_len;
                let p3_start = p2_end + sep_chars.len();
                let p3_end = p3_start + d3_len;
                if p3_end > n {
                    continue;
                }
                if !matches_sep(chars, p1_end, &sep_chars) || !matches_sep(chars, p2_end, &sep_chars) {
                    continue;
                }
                let f1 = parse_digits(chars, i, p1_end)?;
                let f2 = parse_digits(chars, p2_start, p2_end)?;
                let f3 = parse_digits(chars, p3_start, p3_end)?;
                let f1 = f1?;
                let f2 = f2?;
                let f3 = f3?;

                let y = if d3_len == 2 { expand_year(f3) } else { f3 };
                // mdy
                if valid_date(y, f1, f2) {
                    found.push((p3_end, Candidate { year: y, month: f1, day: f2 }));
                }
                // dmy
                if valid_date(y, f2, f1) {
                    found.push((p3_end, Candidate { year: y, month: f2, day: f1 }));
                }
            }
        }
    }

    // year first: YYYY/MM/DD
    for d1_len in [2usize, 4usize] {
        for d2_len in 1..=2usize {
            for d3_len in 1..=2usize {
                let p1_end = i + d1_len;
                let p2_start = p1_end + sep_chars.len();
                let p2_end = p2_start + d2_len;
                let p3_start = p2_end + sep_chars.len();
                let p3_end = p3_start + d3_len;
                if p3_end > n {
                    continue;
                }
                if !matches_sep(chars, p1_end, &sep_chars) || !matches_sep(chars, p2_end, &sep_chars) {
                    continue;
                }
                let f1 = parse_digits(chars, i, p1_end)?;
                let f2 = parse_digits(chars, p2_start, p2_end)?;
                let f3 = parse_digits(chars, p3_start, p3_end)?;
                let f1 = f1?;
                let f2 = f2?;
                let f3 = f3?;

                let y = if d1_len == 2 { expand_year(f1) } else { f1 };
                // ymd
                if valid_date(y, f2, f3) {
                    found.push((p3_end, Candidate { year: y, month: f2, day: f3 }));
                }
            }
        }
    }

    let (end, cand) = found.into_iter().min_by_key(|(_, c)| (c.year - reference_year).abs())?;
    Some((end, cand, sep.to_string()))
}

fn matches_sep(chars: &[char], at: usize, sep_chars: &[char]) -> bool {
    if sep_chars.is_empty() {
        return true;
    }
    if at + sep_chars.len() > chars.len() {
        return false;
    }
    chars[at..at + sep_chars.len()] == *sep_chars
}

fn parse_digits(chars: &[char], start: usize, end: usize) -> Option<Option<i32>> {
    if start >= end || end > chars.len() {
        return Some(None);
    }
    let s: String = chars[start..end].iter().collect();
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Some(None);
    }
    Some(s.parse::<i32>().ok())
}

fn no_separator_matches(password: &str) -> Vec<Match> {
    let reference_year = crate::config::reference_year();
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
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let mut run_end = i;
        while run_end < n && chars[run_end].is_ascii_digit() {
            run_end += 1;
        }
        let run_len = run_end - i;
        if run_len < 4 {
            i = run_end.max(i + 1);
            continue;
        }

        for total in 4..=run_len.min(8) {
            for start in i..=(run_end - total) {
                if let Some(cand) =
                    best_no_separator_split(&chars[start..start + total], reference_year)
                {
                    let start_b = byte_offsets[start];
                    let end_b = byte_offsets[start + total] - 1;
                    results.push(Match {
                        pattern: "date".to_string(),
                        i: start_b,
                        j: end_b,
                        token: password[start_b..=end_b].to_string(),
                        year: Some(cand.year),
                        month: Some(cand.month),
                        day: Some(cand.day),
                        separator: None,
                        ..Default::default()
                    });
                }
            }
        }
        i = run_end;
    }

    results
}

fn best_no_separator_split(digits: &[char], reference_year: i32) -> Option<Candidate> {
    let total = digits.len();
    let mut candidates = Vec::new();
    for day_len in 1..=2usize {
        for month_len in 1..=2usize {
            let year_len = total as isize - day_len as isize - month_len as isize;
            if year_len != 2 && year_len != 4 {
                continue;
            }
            let year_len = year_len as usize;
            // dmy: day, month, year
            let a = parse_run(digits, 0, day_len);
            let b = parse_run(digits, day_len, day_len + month_len);
            let c = parse_run(digits, day_len + month_len, total);
            if let (Some(day), Some(month), Some(y)) = (a, b, c) {
                let year = if year_len == 2 { expand_year(y) } else { y };
                if valid_date(year, month, day) {
                    candidates.push((Candidate { year, month, day }, 1u8));
                }
            }
            // mdy: month, day, year
            let a = parse_run(digits, 0, month_len);
            let b = parse_run(digits, month_len, month_len + day_len);
            let c = parse_run(digits, month_len + day_len, total);
            if let (Some(month), Some(day), Some(y)) = (a, b, c) {
                let year = if year_len == 2 { expand_year(y) } else { y };
                if valid_date(year, month, day) {
                    candidates.push((Candidate { year, month, day }, 0u8));
                }
            }
            // ymd: year, month, day
            let a = parse_run(digits, 0, year_len);
            let b = parse_run(digits, year_len, year_len + month_len);
            let c = parse_run(digits, year_len + month_len, total);
            if let (Some(y), Some(month), Some(day)) = (a, b, c) {
                let year = if year_len == 2 { expand_year(y) } else { y };
                if valid_date(year, month, day) {
                    candidates.push((Candidate { year, month, day }, 2u8));
                }
            }
            // ydm: year, day, month
            let a = parse_run(digits, 0, year_len);
            let b = parse_run(digits, year_len, year_len + day_len);
            let c = parse_run(digits, year_len + day_len, total);
            if let (Some(y), Some(day), Some(month)) = (a, b, c) {
                let year = if year_len == 2 { expand_year(y) } else { y };
                if valid_date(year, month, day) {
                    candidates.push((Candidate { year, month, day }, 3u8));
                }
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .min_by_key(|(c, order)| ((c.year - reference_year).abs(), *order))
        .map(|(c, _)| c)
}

fn parse_run(digits: &[char], start: usize, end: usize) -> Option<i32> {
    if start >= end || end > digits.len() {
        return None;
    }
    let s: String = digits[start..end].iter().collect();
    s.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_slash_separated_date() {
        let ms = no_separator_matches("11201991");
        assert!(ms.iter().any(|m| m.year == Some(1991) && m.month == Some(11) && m.day == Some(20)));
    }

    #[test]
    fn finds_overlapping_separated_dates() {
        let ms = separated_matches("12/20/1991.12.20");
        let years: Vec<_> = ms.iter().map(|m| (m.year, m.month, m.day)).collect();
        assert!(years.iter().any(|&(y, mo, d)| y == Some(1991) && mo == Some(12) && d == Some(20)));
        assert!(ms.len() >= 2);
    }

    #[test]
    fn year_first_separated_form_is_tried() {
        let ms = separated_matches("1991.12.20");
        assert!(ms
            .iter()
            .any(|m| m.year == Some(1991) && m.month == Some(12) && m.day == Some(20) && m.separator.as_deref() == Some(".")));
    }

    #[test]
    fn two_digit_year_expansion_cutoff_is_fifty() {
        assert_eq!(expand_year(60), 1960);
        assert_eq!(expand_year(20), 2020);
        assert_eq!(expand_year(50), 2050);
        assert_eq!(expand_year(51), 1951);
    }
}
