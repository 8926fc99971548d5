//! Regular expression objects.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use regex::{Regex, RegexBuilder};

use crate::error::ValueError;
use crate::identity::Identity;

/// Flag letters in the order they are reported by `flags()`.
const FLAG_ORDER: &str = "dgimsuvy";

struct RegExpData {
    source: String,
    flags: String,
    matcher: Regex,
    last_index: Cell<usize>,
}

/// Shared handle to a compiled regular expression.
///
/// Keeps the source pattern and the flag letters alongside the compiled
/// matcher. `i`, `m` and `s` change how the pattern matches; `d`, `g`, `u`,
/// `v` and `y` are carried as metadata only.
#[derive(Clone)]
pub struct RegExpRef(Rc<RegExpData>);

impl RegExpRef {
    pub fn new(pattern: &str, flags: &str) -> Result<Self, ValueError> {
        let flags = normalize_flags(flags)?;
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|source| ValueError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(RegExpRef(Rc::new(RegExpData {
            source: pattern.to_string(),
            flags,
            matcher,
            last_index: Cell::new(0),
        })))
    }

    /// The pattern text. An empty pattern reads back as `(?:)`.
    pub fn source(&self) -> &str {
        if self.0.source.is_empty() {
            "(?:)"
        } else {
            &self.0.source
        }
    }

    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    pub fn is_global(&self) -> bool {
        self.0.flags.contains('g')
    }

    pub fn last_index(&self) -> usize {
        self.0.last_index.get()
    }

    pub fn set_last_index(&self, index: usize) {
        self.0.last_index.set(index);
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.matcher.is_match(haystack)
    }

    pub fn matcher(&self) -> &Regex {
        &self.0.matcher
    }

    /// A new regex with the same pattern and flags. `last_index` starts at 0.
    pub fn duplicate(&self) -> Self {
        RegExpRef(Rc::new(RegExpData {
            source: self.0.source.clone(),
            flags: self.0.flags.clone(),
            matcher: self.0.matcher.clone(),
            last_index: Cell::new(0),
        }))
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &RegExpRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn normalize_flags(flags: &str) -> Result<String, ValueError> {
    let mut seen = [false; FLAG_ORDER.len()];
    for ch in flags.chars() {
        match FLAG_ORDER.find(ch) {
            Some(i) if !seen[i] => seen[i] = true,
            _ => return Err(ValueError::InvalidFlags(flags.to_string())),
        }
    }
    if flags.contains('u') && flags.contains('v') {
        return Err(ValueError::InvalidFlags(flags.to_string()));
    }
    Ok(FLAG_ORDER
        .chars()
        .zip(seen)
        .filter_map(|(ch, on)| on.then_some(ch))
        .collect())
}

impl fmt::Display for RegExpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags())
    }
}

impl fmt::Debug for RegExpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegExp")
            .field("id", &self.identity())
            .field("display", &self.to_string())
            .finish()
    }
}
