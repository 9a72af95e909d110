//! Ranked dictionaries: the word lists the dictionary and reverse-dictionary
//! matchers look words up against.
//!
//! The full reference word-list payload is deliberately not shipped with
//! this crate (it is tens of megabytes of frequency-ranked corpora across
//! many languages). Instead callers load it from an external JSON file
//! shaped `{"dictionary_name": ["word1", "word2", ...]}`, ranked by
//! position in each list, exactly as the upstream reference implementation
//! reads its default dictionaries from an external path at startup. A
//! small built-in set covers the zero-configuration case.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

/// A single word list, ranked 1-based by commonness (lower rank = more
/// common, and therefore guessed earlier by an attacker).
pub type RankedDictionary = HashMap<String, usize>;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The full set of named word lists consulted by the dictionary matchers.
#[derive(Debug, Clone, Default)]
pub struct RankedDictionaries {
    lists: HashMap<String, Arc<RankedDictionary>>,
}

impl RankedDictionaries {
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankedDictionary)> {
        self.lists.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Build from `{dict_name: [word, word, ...]}`, ranking each word by
    /// its 1-based position in the list and lowercasing for lookup.
    pub fn from_word_lists(lists: &HashMap<String, Vec<String>>) -> Self {
        let mut out = HashMap::with_capacity(lists.len());
        for (name, words) in lists {
            out.insert(name.clone(), Arc::new(build_ranked_dict(words)));
        }
        RankedDictionaries { lists: out }
    }

    /// Read the `{dict_name: [words...]}` JSON contract from disk.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(&data)?;
        Ok(Self::from_word_lists(&raw))
    }

    /// Return a copy of these dictionaries with an additional
    /// `user_inputs` list ranked in the order given (spec's "ranked
    /// dictionary" contract applies to user-supplied tokens too).
    pub fn with_user_inputs<S: AsRef<str>>(&self, user_inputs: &[S]) -> Self {
        let mut lists = self.lists.clone();
        let words: Vec<String> = user_inputs.iter().map(|s| s.as_ref().to_string()).collect();
        lists.insert(
            "user_inputs".to_string(),
            Arc::new(build_ranked_dict(&words)),
        );
        RankedDictionaries { lists }
    }

    /// A tiny built-in set of well-known weak tokens, so the crate is
    /// useful without external configuration. Callers wanting proper
    /// coverage should supply a real word-list file via `load_from_path`.
    pub fn builtin_minimal() -> Self {
        let mut lists = HashMap::new();
        let passwords: Vec<String> = [
            "password", "123456", "12345678", "qwerty", "abc123", "monkey", "letmein",
            "dragon", "111111", "baseball", "iloveyou", "trustno1", "sunshine", "master",
            "welcome", "shadow", "ashley", "football", "jesus", "michael", "ninja", "mustang",
            "password1",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        lists.insert(
            "passwords".to_string(),
            Arc::new(build_ranked_dict(&passwords)),
        );

        let names: Vec<String> = [
            "james", "robert", "john", "michael", "david", "mary", "jennifer", "linda",
            "elizabeth", "barbara",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        lists.insert("english_names".to_string(), Arc::new(build_ranked_dict(&names)));

        let words: Vec<String> = [
            "the", "of", "and", "a", "to", "in", "is", "you", "that", "it", "he", "was",
            "for", "on", "are", "as", "with", "his", "they", "at",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        lists.insert("english_wikipedia".to_string(), Arc::new(build_ranked_dict(&words)));

        RankedDictionaries { lists }
    }
}

fn build_ranked_dict(words: &[String]) -> RankedDictionary {
    let mut out = HashMap::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        out.entry(word.to_lowercase()).or_insert(i + 1);
    }
    out
}
