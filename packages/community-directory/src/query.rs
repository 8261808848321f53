//! Directory query engine: search, filter and order a member list.
//!
//! Filtering is a case-insensitive substring match on name, location and
//! occupation. Ordering is a stable sort under locale-aware collation, so
//! members with equal keys keep the order the filter produced.

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::warn;

use crate::types::Member;

/// How the filtered members are ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Keep the order the backend returned.
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "location")]
    ByLocation,
    #[serde(rename = "occupation")]
    ByOccupation,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::All => "All Members",
            SortMode::ByLocation => "By Location",
            SortMode::ByOccupation => "By Occupation",
        }
    }

    /// Value used in query strings and select boxes.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::All => "all",
            SortMode::ByLocation => "location",
            SortMode::ByOccupation => "occupation",
        }
    }

    pub fn variants() -> &'static [SortMode] {
        &[SortMode::All, SortMode::ByLocation, SortMode::ByOccupation]
    }

    fn sort_key<'a>(&self, member: &'a Member) -> Option<&'a str> {
        match self {
            SortMode::All => None,
            SortMode::ByLocation => Some(&member.location),
            SortMode::ByOccupation => Some(&member.occupation),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown sort mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(SortMode::All),
            "location" => Ok(SortMode::ByLocation),
            "occupation" => Ok(SortMode::ByOccupation),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Locale-aware string comparison.
///
/// Falls back to case-folded code point order if no collator is available
/// for the locale, so comparison never fails.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    pub fn for_locale(locale: &Locale) -> Self {
        let collator = match Collator::try_new(&locale.into(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(locale = %locale, error = ?err, "No collator for locale, using case-folded ordering");
                None
            }
        };
        Self { collator }
    }

    /// Root (language-neutral) collation.
    pub fn root() -> Self {
        Self::for_locale(&Locale::UND)
    }

    /// The collation for `locale`, built at most once per thread.
    ///
    /// ICU collators are expensive to construct and not `Sync`, so each
    /// thread keeps its own.
    pub fn cached(locale: &Locale) -> Rc<Collation> {
        thread_local! {
            static COLLATIONS: RefCell<HashMap<String, Rc<Collation>>> =
                RefCell::new(HashMap::new());
        }

        COLLATIONS.with(|cache| {
            cache
                .borrow_mut()
                .entry(locale.to_string())
                .or_insert_with(|| Rc::new(Collation::for_locale(locale)))
                .clone()
        })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

/// Filter and order `members` under the root collation.
///
/// Returns a new vector; the input is never modified.
pub fn query(members: &[Member], search_term: &str, mode: SortMode) -> Vec<Member> {
    query_with(members, search_term, mode, &Collation::cached(&Locale::UND))
}

/// Same as [`query`] with an explicit collation.
pub fn query_with(
    members: &[Member],
    search_term: &str,
    mode: SortMode,
    collation: &Collation,
) -> Vec<Member> {
    let filtering = !search_term.trim().is_empty();
    let term = search_term.to_lowercase();

    let mut matched: Vec<Member> = members
        .iter()
        .filter(|member| !filtering || matches_term(member, &term))
        .cloned()
        .collect();

    if mode != SortMode::All {
        // sort_by is stable
        matched.sort_by(|a, b| match (mode.sort_key(a), mode.sort_key(b)) {
            (Some(a), Some(b)) => collation.compare(a, b),
            _ => Ordering::Equal,
        });
    }

    matched
}

/// `term` must already be lower-cased. Surrounding whitespace is significant.
fn matches_term(member: &Member, term: &str) -> bool {
    [&member.full_name, &member.location, &member.occupation]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

/// The search box and sort select of the members page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub search_term: String,
    pub mode: SortMode,
    pub locale: Locale,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            mode: SortMode::All,
            locale: Locale::UND,
        }
    }
}

impl MemberQuery {
    pub fn new(search_term: impl Into<String>, mode: SortMode) -> Self {
        Self {
            search_term: search_term.into(),
            mode,
            ..Default::default()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn apply(&self, members: &[Member]) -> Vec<Member> {
        query_with(
            members,
            &self.search_term,
            self.mode,
            &Collation::cached(&self.locale),
        )
    }

    /// Reset the search term and sort mode. The locale is kept.
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.mode = SortMode::All;
    }

    /// Whether anything differs from the unfiltered, unsorted view.
    pub fn is_active(&self) -> bool {
        !self.search_term.trim().is_empty() || self.mode != SortMode::All
    }

    pub fn summary(shown: usize, total: usize) -> String {
        format!("Showing {shown} of {total} members")
    }
}
