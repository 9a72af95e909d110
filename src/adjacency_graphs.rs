//! Static keyboard adjacency graphs used by the spatial matcher.
//!
//! Each graph maps a key's unshifted character to a fixed-order list of
//! its neighbors. A neighbor slot is `None` when the key has no neighbor
//! in that direction, and otherwise holds `(unshifted, shifted)` - the
//! character produced by that physical key with and without the shift
//! modifier. For keys with no distinct shifted glyph (numeric keypads)
//! the two characters are identical.
//!
//! `qwerty` and `dvorak` share the same physical key geometry (Dvorak is
//! a logical remapping of the same keyboard), so both are generated from
//! one slanted-row layout function; only the character assignment
//! differs. `keypad` and `mac_keypad` are generated from a second,
//! aligned-grid layout function.

use std::collections::HashMap;

use lazy_static::lazy_static;

pub type NeighborSlot = Option<(char, char)>;

pub struct Graph {
    pub name: &'static str,
    pub neighbors: HashMap<char, Vec<NeighborSlot>>,
    /// key (unshifted glyph) -> that same physical key's shifted glyph,
    /// present only where the two differ. Derived straight from the row
    /// data a key was built from, not inferred from neighbor relations:
    /// a shifted glyph can be a *neighbor's* entry in several other keys'
    /// slot lists, so scanning `neighbors` for it would pick an arbitrary
    /// (and generally wrong) owning key.
    pub shifts: HashMap<char, char>,
}

impl Graph {
    pub fn starting_positions(&self) -> usize {
        self.neighbors.len()
    }

    pub fn average_degree(&self) -> f64 {
        let total: usize = self
            .neighbors
            .values()
            .map(|slots| slots.iter().filter(|s| s.is_some()).count())
            .sum();
        total as f64 / self.neighbors.len() as f64
    }
}

/// A row of a slanted (staggered) keyboard: the unshifted and shifted
/// glyph for each physical key, left to right.
type Row = &'static [(char, char)];

/// Build a graph for a staggered keyboard (standard typewriter stagger,
/// one row per hand-row of the physical keyboard). `row_offsets` gives
/// each row's starting horizontal position in half-key units, capturing
/// the real-world stagger between rows (e.g. the number row sits flush
/// left while the home row is shifted right by about a key and a half).
fn build_slanted_graph(name: &'static str, rows: &[Row], row_offsets: &[i32]) -> Graph {
    // physical column of key `i` in row `r`, in half-key units
    let pos = |r: usize, i: usize| -> i32 { 2 * i as i32 + row_offsets[r] };

    let mut neighbors: HashMap<char, Vec<NeighborSlot>> = HashMap::new();
    let mut shifts: HashMap<char, char> = HashMap::new();

    for (r, row) in rows.iter().enumerate() {
        for (i, &(unshifted, shifted)) in row.iter().enumerate() {
            if shifted != unshifted {
                shifts.insert(unshifted, shifted);
            }
            let my_pos = pos(r, i);
            let left = if i > 0 { Some(row[i - 1]) } else { None };
            let right = if i + 1 < row.len() {
                Some(row[i + 1])
            } else {
                None
            };

            let mut ups: Vec<(i32, (char, char))> = Vec::new();
            if r > 0 {
                for (j, &k) in rows[r - 1].iter().enumerate() {
                    let p = pos(r - 1, j);
                    if (p - my_pos).abs() == 1 {
                        ups.push((p, k));
                    }
                }
            }
            ups.sort_by_key(|&(p, _)| p);

            let mut downs: Vec<(i32, (char, char))> = Vec::new();
            if r + 1 < rows.len() {
                for (j, &k) in rows[r + 1].iter().enumerate() {
                    let p = pos(r + 1, j);
                    if (p - my_pos).abs() == 1 {
                        downs.push((p, k));
                    }
                }
            }
            downs.sort_by_key(|&(p, _)| p);

            let slot = |opt: Option<(char, char)>| -> NeighborSlot { opt };

            let mut slots = vec![
                slot(left),
                slot(right),
                ups.first().map(|&(_, c)| c),
                if ups.len() > 1 { Some(ups[1].1) } else { None },
                downs.first().map(|&(_, c)| c),
                if downs.len() > 1 { Some(downs[1].1) } else { None },
            ];
            // a key never has itself listed twice if row only has one up/down
            // neighbor; trim trailing redundant slot isn't necessary, we keep
            // a fixed width of 6 for every key on this layout family.
            slots.truncate(6);

            neighbors.insert(unshifted, slots);
        }
    }

    Graph { name, neighbors, shifts }
}

/// Build a graph for an aligned grid keyboard (numeric keypads): eight
/// possible neighbor directions, found purely from integer `(row, col)`
/// adjacency.
fn build_grid_graph(name: &'static str, cells: &[(i32, i32, char)]) -> Graph {
    let mut neighbors: HashMap<char, Vec<NeighborSlot>> = HashMap::new();
    // directions in a fixed canonical order
    const DIRS: [(i32, i32); 8] = [
        (0, -1),
        (0, 1),
        (-1, 0),
        (1, 0),
        (-1, -1),
        (-1, 1),
        (1, -1),
        (1, 1),
    ];
    for &(row, col, ch) in cells {
        let mut slots = Vec::with_capacity(8);
        for &(dr, dc) in &DIRS {
            let found = cells
                .iter()
                .find(|&&(r2, c2, _)| r2 == row + dr && c2 == col + dc)
                .map(|&(_, _, c2)| (c2, c2));
            slots.push(found);
        }
        neighbors.insert(ch, slots);
    }
    // grid keyboards (numeric keypads) have no shift-distinct glyphs.
    Graph { name, neighbors, shifts: HashMap::new() }
}

const QWERTY_ROW_OFFSETS: [i32; 4] = [0, 3, 4, 5];

const QWERTY_ROW0: Row = &[
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
];
const QWERTY_ROW1: Row = &[
    ('q', 'Q'),
    ('w', 'W'),
    ('e', 'E'),
    ('r', 'R'),
    ('t', 'T'),
    ('y', 'Y'),
    ('u', 'U'),
    ('i', 'I'),
    ('o', 'O'),
    ('p', 'P'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
];
const QWERTY_ROW2: Row = &[
    ('a', 'A'),
    ('s', 'S'),
    ('d', 'D'),
    ('f', 'F'),
    ('g', 'G'),
    ('h', 'H'),
    ('j', 'J'),
    ('k', 'K'),
    ('l', 'L'),
    (';', ':'),
    ('\'', '"'),
];
const QWERTY_ROW3: Row = &[
    ('z', 'Z'),
    ('x', 'X'),
    ('c', 'C'),
    ('v', 'V'),
    ('b', 'B'),
    ('n', 'N'),
    ('m', 'M'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

const DVORAK_ROW0: Row = &[
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('[', '{'),
    (']', '}'),
];
const DVORAK_ROW1: Row = &[
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('p', 'P'),
    ('y', 'Y'),
    ('f', 'F'),
    ('g', 'G'),
    ('c', 'C'),
    ('r', 'R'),
    ('l', 'L'),
    ('/', '?'),
    ('=', '+'),
    ('\\', '|'),
];
const DVORAK_ROW2: Row = &[
    ('a', 'A'),
    ('o', 'O'),
    ('e', 'E'),
    ('u', 'U'),
    ('i', 'I'),
    ('d', 'D'),
    ('h', 'H'),
    ('t', 'T'),
    ('n', 'N'),
    ('s', 'S'),
    ('-', '_'),
];
const DVORAK_ROW3: Row = &[
    (';', ':'),
    ('q', 'Q'),
    ('j', 'J'),
    ('k', 'K'),
    ('x', 'X'),
    ('b', 'B'),
    ('m', 'M'),
    ('w', 'W'),
    ('v', 'V'),
    ('z', 'Z'),
];

lazy_static! {
    pub static ref QWERTY: Graph = build_slanted_graph(
        "qwerty",
        &[QWERTY_ROW0, QWERTY_ROW1, QWERTY_ROW2, QWERTY_ROW3],
        &QWERTY_ROW_OFFSETS,
    );
    pub static ref DVORAK: Graph = build_slanted_graph(
        "dvorak",
        &[DVORAK_ROW0, DVORAK_ROW1, DVORAK_ROW2, DVORAK_ROW3],
        &QWERTY_ROW_OFFSETS,
    );
    pub static ref KEYPAD: Graph = build_grid_graph(
        "keypad",
        &[
            (0, 1, '/'),
            (0, 2, '*'),
            (0, 3, '-'),
            (1, 0, '7'),
            (1, 1, '8'),
            (1, 2, '9'),
            (1, 3, '+'),
            (2, 0, '4'),
            (2, 1, '5'),
            (2, 2, '6'),
            (3, 0, '1'),
            (3, 1, '2'),
            (3, 2, '3'),
            (4, 1, '0'),
            (4, 2, '.'),
        ],
    );
    pub static ref MAC_KEYPAD: Graph = build_grid_graph(
        "mac_keypad",
        &[
            (0, 0, '='),
            (0, 1, '*'),
            (0, 2, '/'),
            (1, 0, '7'),
            (1, 1, '8'),
            (1, 2, '9'),
            (1, 3, '-'),
            (2, 0, '4'),
            (2, 1, '5'),
            (2, 2, '6'),
            (2, 3, '+'),
            (3, 0, '1'),
            (3, 1, '2'),
            (3, 2, '3'),
            (4, 1, '0'),
            (4, 2, '.'),
        ],
    );
    pub static ref GRAPHS: HashMap<&'static str, &'static Graph> = {
        let mut m = HashMap::new();
        m.insert("qwerty", &*QWERTY);
        m.insert("dvorak", &*DVORAK);
        m.insert("keypad", &*KEYPAD);
        m.insert("mac_keypad", &*MAC_KEYPAD);
        m
    };
}
