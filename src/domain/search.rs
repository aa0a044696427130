//! Fuzzy filtering of cookbook entries.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};

use super::cookbook::CookbookEntry;

/// Fuzzy matcher over entry names and slugs, backed by `nucleo-matcher`.
pub struct FuzzySearch {
    matcher: Matcher,
}

impl std::fmt::Debug for FuzzySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzySearch").finish_non_exhaustive()
    }
}

impl FuzzySearch {
    /// Creates a matcher with the default scoring configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Keeps the entries whose name or slug matches `query`, best match
    /// first. Equal scores keep their original relative order.
    ///
    /// A blank query returns `entries` unchanged.
    pub fn filter(&mut self, query: &str, entries: Vec<CookbookEntry>) -> Vec<CookbookEntry> {
        if query.trim().is_empty() {
            return entries;
        }

        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);

        let mut scored: Vec<(CookbookEntry, u32)> = entries
            .into_iter()
            .filter_map(|entry| {
                let name = Utf32String::from(entry.name.as_str());
                let slug = Utf32String::from(entry.slug.as_str());
                let best = [
                    pattern.score(name.slice(..), &mut self.matcher),
                    pattern.score(slug.slice(..), &mut self.matcher),
                ]
                .into_iter()
                .flatten()
                .max()?;
                Some((entry, best))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(entry, _)| entry).collect()
    }
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn entry(id: usize, name: &str, slug: &str) -> CookbookEntry {
        CookbookEntry {
            id,
            name: name.to_string(),
            path: format!("hub/{slug}.md"),
            slug: slug.to_string(),
        }
    }

    fn catalog() -> Vec<CookbookEntry> {
        vec![
            entry(1, "Single Classification", "single_classification"),
            entry(2, "Multiple Classification", "multiple_classification"),
            entry(3, "Action Items", "action_items"),
            entry(4, "Pandas DataFrame", "pandas_df"),
        ]
    }

    #[test]
    fn blank_query_returns_everything() {
        let mut search = FuzzySearch::new();
        assert_eq!(search.filter("   ", catalog()), catalog());
    }

    #[test]
    fn result_is_subset_of_input() {
        let mut search = FuzzySearch::new();
        let all = catalog();
        let matched = search.filter("class", catalog());
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|m| all.contains(m)));
    }

    #[test]
    fn matches_against_slug() {
        let mut search = FuzzySearch::new();
        let matched = search.filter("pandas_df", catalog());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].slug, "pandas_df");
    }

    #[test]
    fn fuzzy_subsequence_matches() {
        let mut search = FuzzySearch::new();
        let matched = search.filter("actitm", catalog());
        assert!(matched.iter().any(|m| m.slug == "action_items"));
    }

    #[test]
    fn no_match_yields_empty() {
        let mut search = FuzzySearch::new();
        assert!(search.filter("zzzqqq", catalog()).is_empty());
    }
}
