//! Approximate matching over named candidate fields
//!
//! Two tiers of acceptance, best first:
//! 1. the query is a (case-insensitive) subsequence of a field, scored by
//!    the skim algorithm, so omitted characters are tolerated;
//! 2. otherwise some substring of a field is within a bounded number of
//!    edits of the query (substitutions, insertions, deletions and adjacent
//!    transpositions), the bound being `floor(query_len * threshold)`.
//!
//! A candidate's score is its best field score. Ties keep input order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as _;

use crate::error::QueryError;
use crate::Result;

pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Indexable text fields of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Url,
}

pub trait Searchable {
    /// Text for `field`, or `None` if the candidate has no such field
    fn field_text(&self, field: Field) -> Option<&str>;
}

/// Greater is better: any subsequence match beats any approximate match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Score {
    tier: u8,
    value: i64,
}

impl Score {
    fn subsequence(skim_score: i64) -> Self {
        Self {
            tier: 1,
            value: skim_score,
        }
    }

    fn approximate(errors: usize) -> Self {
        Self {
            tier: 0,
            value: -(errors as i64),
        }
    }
}

pub struct FuzzyMatcher {
    fields: Vec<Field>,
    threshold: f64,
    skim: SkimMatcherV2,
}

impl FuzzyMatcher {
    pub fn new(fields: &[Field], threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(QueryError::InvalidThreshold(threshold));
        }

        Ok(Self {
            fields: fields.to_vec(),
            threshold,
            skim: SkimMatcherV2::default(),
        })
    }

    pub fn with_default_threshold(fields: &[Field]) -> Self {
        Self {
            fields: fields.to_vec(),
            threshold: DEFAULT_THRESHOLD,
            skim: SkimMatcherV2::default(),
        }
    }

    /// Accepted candidates, best match first. An empty query accepts all
    /// candidates in their original order.
    pub fn rank<T: Searchable>(&self, candidates: Vec<T>, query: &str) -> Vec<T> {
        self.partition(candidates, query).0
    }

    /// Every candidate: accepted ones best first, then the rest in their
    /// original order. Never drops a candidate.
    pub fn reorder<T: Searchable>(&self, candidates: Vec<T>, query: &str) -> Vec<T> {
        let (mut ranked, rest) = self.partition(candidates, query);
        ranked.extend(rest);
        ranked
    }

    fn partition<T: Searchable>(&self, candidates: Vec<T>, query: &str) -> (Vec<T>, Vec<T>) {
        let query = normalize(query);
        if query.is_empty() {
            return (candidates, Vec::new());
        }
        let pattern: Vec<char> = query.chars().collect();

        let mut scored = Vec::new();
        let mut rest = Vec::new();
        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.score(&candidate, &query, &pattern) {
                Some(score) => scored.push((score, index, candidate)),
                None => rest.push(candidate),
            }
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        tracing::trace!(
            query = %query,
            accepted = scored.len(),
            rejected = rest.len(),
            "Fuzzy ranked candidates"
        );

        (scored.into_iter().map(|(_, _, c)| c).collect(), rest)
    }

    fn score<T: Searchable>(&self, candidate: &T, query: &str, pattern: &[char]) -> Option<Score> {
        self.fields
            .iter()
            .filter_map(|field| candidate.field_text(*field))
            .filter_map(|text| self.score_text(text, query, pattern))
            .max()
    }

    fn score_text(&self, text: &str, query: &str, pattern: &[char]) -> Option<Score> {
        if text.is_empty() {
            return None;
        }

        if let Some(skim_score) = self.skim.fuzzy_match(text, query) {
            return Some(Score::subsequence(skim_score));
        }

        let max_errors = (pattern.len() as f64 * self.threshold).floor() as usize;
        if max_errors == 0 {
            return None;
        }

        let haystack: Vec<char> = text.to_lowercase().chars().collect();
        let errors = substring_distance(&haystack, pattern);
        (errors <= max_errors).then(|| Score::approximate(errors))
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Fewest edits turning `pattern` into any substring of `text`
/// (optimal string alignment distance, free start and end in `text`).
fn substring_distance(text: &[char], pattern: &[char]) -> usize {
    let m = pattern.len();
    // Column j holds distances of pattern[..i] against text ending at j.
    let mut before_prev = vec![0usize; m + 1];
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut best = prev[m];

    for j in 1..=text.len() {
        let mut cur = vec![0usize; m + 1];
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);
            let mut value = (prev[i - 1] + cost).min(prev[i] + 1).min(cur[i - 1] + 1);
            if i > 1 && j > 1 && pattern[i - 1] == text[j - 2] && pattern[i - 2] == text[j - 1] {
                value = value.min(before_prev[i - 2] + 1);
            }
            cur[i] = value;
        }
        best = best.min(cur[m]);
        before_prev = std::mem::replace(&mut prev, cur);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Page {
        title: &'static str,
        url: &'static str,
    }

    impl Searchable for Page {
        fn field_text(&self, field: Field) -> Option<&str> {
            match field {
                Field::Title => Some(self.title),
                Field::Url => Some(self.url),
            }
        }
    }

    fn page(title: &'static str, url: &'static str) -> Page {
        Page { title, url }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_substring_distance() {
        assert_eq!(substring_distance(&chars("the github site"), &chars("github")), 0);
        assert_eq!(substring_distance(&chars("github"), &chars("githbu")), 1);
        assert_eq!(substring_distance(&chars("github"), &chars("gitgub")), 1);
        assert_eq!(substring_distance(&chars("abc"), &chars("xyz")), 3);
        assert_eq!(substring_distance(&chars(""), &chars("ab")), 2);
    }

    #[test]
    fn test_tolerates_omission_transposition_and_typo() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let pages = vec![page("GitHub", "https://github.com")];

        assert_eq!(matcher.rank(pages.clone(), "gthub").len(), 1);
        assert_eq!(matcher.rank(pages.clone(), "githbu").len(), 1);
        assert_eq!(matcher.rank(pages.clone(), "gitgub").len(), 1);
        assert!(matcher.rank(pages, "weather").is_empty());
    }

    #[test]
    fn test_short_queries_need_subsequence() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        assert!(matcher.rank(vec![page("Mail", "")], "xyz").is_empty());
    }

    #[test]
    fn test_matches_any_indexed_field() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title, Field::Url]);
        let pages = vec![
            page("Inbox", "https://mail.example.com"),
            page("Calendar", "https://cal.example.com"),
        ];

        let ranked = matcher.rank(pages, "mail");
        assert_eq!(ranked, vec![page("Inbox", "https://mail.example.com")]);
    }

    #[test]
    fn test_unindexed_field_is_ignored() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let ranked = matcher.rank(vec![page("Inbox", "https://mail.example.com")], "mail");
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_subsequence_beats_approximate() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let pages = vec![page("Gitgub mirror", ""), page("GitHub", "")];

        let ranked = matcher.rank(pages, "github");
        assert_eq!(ranked[0].title, "GitHub");
        assert_eq!(ranked[1].title, "Gitgub mirror");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let pages = vec![page("Docs", "1"), page("Docs", "2"), page("Docs", "3")];

        let urls: Vec<&str> = matcher
            .rank(pages, "docs")
            .iter()
            .map(|p| p.url)
            .collect();
        assert_eq!(urls, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_reorder_keeps_everything() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let pages = vec![page("Weather", ""), page("Rust Book", ""), page("Maps", "")];

        let titles: Vec<&str> = matcher
            .reorder(pages, "rust")
            .iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Rust Book", "Weather", "Maps"]);
    }

    #[test]
    fn test_empty_query_accepts_all() {
        let matcher = FuzzyMatcher::with_default_threshold(&[Field::Title]);
        let pages = vec![page("B", ""), page("A", "")];
        assert_eq!(matcher.rank(pages.clone(), "  "), pages);
    }

    #[test]
    fn test_threshold_validated() {
        assert!(matches!(
            FuzzyMatcher::new(&[Field::Title], 1.5),
            Err(QueryError::InvalidThreshold(_))
        ));
        assert!(FuzzyMatcher::new(&[Field::Title], 0.0).is_ok());
    }
}
