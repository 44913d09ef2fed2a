use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::{locale, Locale};
use tracing::warn;

use crate::directory::{DirectoryEntry, DEFAULT_SECTION};
use crate::search::{filter_by_substring, SearchSurface};

/// Chip label that selects every section.
pub const ALL_LABEL: &str = "Todos";

/// Section selector of the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Facet {
    #[default]
    All,
    Section(String),
}

impl Facet {
    /// `Todos` (or an empty label) means every section; anything else is
    /// taken verbatim.
    pub fn from_label(label: &str) -> Self {
        if label.is_empty() || label == ALL_LABEL {
            Facet::All
        } else {
            Facet::Section(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Facet::All => ALL_LABEL,
            Facet::Section(s) => s,
        }
    }

    /// Exact, non-normalized comparison with a record's facet value.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Facet::All => true,
            Facet::Section(s) => s == value,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user typed and which chip is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub facet: Facet,
}

impl FilterState {
    pub fn new(query: impl Into<String>, facet: Facet) -> Self {
        Self {
            query: query.into(),
            facet,
        }
    }
}

/// Locale-aware string ordering for group keys.
///
/// Falls back to the root collation when the locale cannot be loaded, and
/// to code-point order if even that fails.
pub struct SectionCollator {
    locale: String,
    inner: Option<CollatorBorrowed<'static>>,
}

impl SectionCollator {
    pub fn new(locale: &str) -> Self {
        let parsed = match locale.parse::<Locale>() {
            Ok(l) => l,
            Err(err) => {
                warn!(locale, error = ?err, "unparseable locale; using root collation");
                locale!("und")
            }
        };
        let inner = match Collator::try_new(parsed.clone().into(), CollatorOptions::default()) {
            Ok(c) => Some(c),
            Err(err) => {
                warn!(locale = %parsed, error = ?err, "collator unavailable; trying root");
                Collator::try_new(locale!("und").into(), CollatorOptions::default()).ok()
            }
        };
        Self {
            locale: locale.to_string(),
            inner,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Collation order, ties broken by code points so distinct keys never
    /// compare equal.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.inner {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        };
        primary.then_with(|| a.cmp(b))
    }

    pub fn sort(&self, keys: &mut [String]) {
        keys.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for SectionCollator {
    fn default() -> Self {
        Self::new("es")
    }
}

impl fmt::Debug for SectionCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionCollator")
            .field("locale", &self.locale)
            .field("loaded", &self.inner.is_some())
            .finish()
    }
}

/// One section of the grouped result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a, T> {
    pub key: String,
    pub items: Vec<&'a T>,
}

/// Matches grouped by facet value, groups in collation order, items in
/// input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<'a, T> {
    pub groups: Vec<Group<'a, T>>,
}

impl<'a, T> Grouped<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Matches across all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&[&'a T]> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group<'a, T>> {
        self.groups.iter()
    }
}

/// Substring filter, then facet selection, then grouping.
///
/// `facet_of` may return a blank value; such records land in
/// [`DEFAULT_SECTION`]. The facet check compares against that defaulted
/// value exactly.
pub fn facet_and_filter<'a, T, K, P>(
    records: &'a [T],
    facet: &Facet,
    facet_of: K,
    query: &str,
    projector: P,
    collator: &SectionCollator,
) -> Grouped<'a, T>
where
    K: Fn(&T) -> &str,
    P: Fn(&T) -> String,
{
    let key_of = |r: &T| -> String {
        let raw = facet_of(r);
        if raw.trim().is_empty() {
            DEFAULT_SECTION.to_string()
        } else {
            raw.to_string()
        }
    };

    let mut by_key: HashMap<String, Vec<&'a T>> = HashMap::new();
    for r in filter_by_substring(records, projector, query) {
        let key = key_of(r);
        if !facet.admits(&key) {
            continue;
        }
        by_key.entry(key).or_default().push(r);
    }

    let mut keys: Vec<String> = by_key.keys().cloned().collect();
    collator.sort(&mut keys);

    let groups = keys
        .into_iter()
        .filter_map(|key| by_key.remove(&key).map(|items| Group { key, items }))
        .collect();
    Grouped { groups }
}

/// Every distinct facet value in `records` (blank → [`DEFAULT_SECTION`]),
/// collated. This is the chip bar; it ignores the query.
pub fn section_keys<T, K>(records: &[T], facet_of: K, collator: &SectionCollator) -> Vec<String>
where
    K: Fn(&T) -> &str,
{
    let mut keys: Vec<String> = Vec::new();
    for r in records {
        let raw = facet_of(r);
        let key = if raw.trim().is_empty() {
            DEFAULT_SECTION
        } else {
            raw
        };
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    collator.sort(&mut keys);
    keys
}

/// Launcher view over directory entries.
pub fn filter_directory<'a>(
    entries: &'a [DirectoryEntry],
    state: &FilterState,
    collator: &SectionCollator,
) -> Grouped<'a, DirectoryEntry> {
    facet_and_filter(
        entries,
        &state.facet,
        |e: &DirectoryEntry| e.section.as_str(),
        &state.query,
        DirectoryEntry::search_surface,
        collator,
    )
}

/// Chip labels for the launcher: [`ALL_LABEL`] then the collated sections.
pub fn directory_chips(entries: &[DirectoryEntry], collator: &SectionCollator) -> Vec<String> {
    let mut chips = vec![ALL_LABEL.to_string()];
    chips.extend(section_keys(
        entries,
        |e: &DirectoryEntry| e.section.as_str(),
        collator,
    ));
    chips
}
