use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Acronyms that keep their upper-case run when identifiers are split into words
pub const DEFAULT_ACRONYMS: &[&str] = &[
    "API", "ASCII", "CSV", "DB", "DTO", "GUI", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IO", "IP",
    "JSON", "SQL", "TCP", "UDP", "UI", "URI", "URL", "UTC", "UTF8", "UUID", "WPF", "XAML", "XML",
];

static DEFAULT_ACRONYM_SET: OnceLock<AcronymSet> = OnceLock::new();

/// Get the default acronym set (lazily initialized once)
pub fn default_acronym_set() -> &'static AcronymSet {
    DEFAULT_ACRONYM_SET.get_or_init(AcronymSet::default)
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    is_end: bool,
    children: HashMap<u8, TrieNode>,
}

/// Known acronyms, matched upper-case only.
#[derive(Debug, Clone)]
pub struct AcronymSet {
    acronyms: HashSet<String>,
    trie: TrieNode,
}

impl Default for AcronymSet {
    fn default() -> Self {
        Self::from_list(DEFAULT_ACRONYMS.iter().copied())
    }
}

impl AcronymSet {
    pub fn new() -> Self {
        Self {
            acronyms: HashSet::new(),
            trie: TrieNode::default(),
        }
    }

    pub fn from_list<'a>(acronyms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for acronym in acronyms {
            set.add(acronym);
        }
        set
    }

    pub fn add(&mut self, acronym: &str) {
        let upper = acronym.to_ascii_uppercase();
        let mut node = &mut self.trie;
        for b in upper.bytes() {
            node = node.children.entry(b).or_default();
        }
        node.is_end = true;
        self.acronyms.insert(upper);
    }

    pub fn is_acronym(&self, s: &str) -> bool {
        self.acronyms.contains(s)
    }

    /// Length of the longest acronym starting at `start` in `text`.
    ///
    /// Only upper-case input matches; "Id" is a word, "ID" is an acronym.
    pub fn longest_match_at(&self, text: &str, start: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        let mut node = &self.trie;
        let mut longest = None;

        for (offset, b) in bytes.iter().skip(start).enumerate() {
            match node.children.get(b) {
                Some(next) => {
                    node = next;
                    if node.is_end {
                        longest = Some(offset + 1);
                    }
                },
                None => break,
            }
        }

        longest
    }
}
