//! Spatial (keyboard-walk) matcher.
//!
//! Scans each keyboard graph left to right, extending a run while each
//! next character sits on a neighboring key of the previous one. Emits
//! a match when a maximal run reaches length >= 3.

use std::collections::HashMap;

use crate::adjacency_graphs::{Graph, GRAPHS};

use super::Match;

/// both the unshifted and shifted glyph of a char map back to its key.
/// Built straight from `graph.shifts` (itself derived from the row data a
/// key was built from) rather than by scanning neighbor slots, since a
/// shifted glyph can appear as a *neighbor's* entry in several other keys'
/// slot lists and scanning would pick an arbitrary one of those.
fn key_lookup(graph: &Graph) -> HashMap<char, char> {
    let mut m = HashMap::new();
    for &key in graph.neighbors.keys() {
        m.insert(key, key);
    }
    for (&key, &shifted) in &graph.shifts {
        m.insert(shifted, key);
    }
    m
}

fn is_shifted(graph: &Graph, c: char) -> bool {
    graph.shifts.values().any(|&s| s == c)
}

/// index of the neighbor slot of `from`'s key that matches `to`, if any.
fn neighbor_slot_index(graph: &Graph, key_for: &HashMap<char, char>, from: char, to: char) -> Option<usize> {
    let from_key = *key_for.get(&from)?;
    let slots = graph.neighbors.get(&from_key)?;
    slots.iter().position(|slot| match slot {
        Some((u, s)) => *u == to || *s == to,
        None => false,
    })
}

pub fn matches(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let byte_offsets: Vec<usize> = {
        let mut v: Vec<usize> = password.char_indices().map(|(b, _)| b).collect();
        v.push(password.len());
        v
    };

    let mut results = Vec::new();

    for &graph_name in ["qwerty", "dvorak", "keypad", "mac_keypad"].iter() {
        let graph = GRAPHS[graph_name];
        let key_for = key_lookup(graph);

        let n = chars.len();
        let mut i = 0usize;
        while i < n {
            let mut j = i;
            let mut turns = 1usize;
            let mut direction: Option<usize> = None;

            loop {
                if j + 1 >= n {
                    break;
                }
                match neighbor_slot_index(graph, &key_for, chars[j], chars[j + 1]) {
                    Some(idx) => {
                        if let Some(prev) = direction {
                            if prev != idx {
                                turns += 1;
                            }
                        }
                        direction = Some(idx);
                        j += 1;
                    }
                    None => break,
                }
            }

            let run_len = j - i + 1;
            if run_len >= 3 {
                let shifted_count = chars[i..=j].iter().filter(|&&c| is_shifted(graph, c)).count();
                let start_byte = byte_offsets[i];
                let end_byte = byte_offsets[j + 1] - 1;
                results.push(Match {
                    pattern: "spatial".to_string(),
                    i: start_byte,
                    j: end_byte,
                    token: password[start_byte..=end_byte].to_string(),
                    graph: Some(graph_name.to_string()),
                    turns: Some(turns),
                    shifted_count: Some(shifted_count),
                    ..Default::default()
                });
                i = j + 1;
            } else {
                i += 1;
            }
        }
    }

    super::sort(&mut results);
    results
}
