//! Similarity result store — the one piece of state that outlives a single
//! request/response cycle.
//!
//! Created empty at session start, wholesale-replaced by every similarity
//! search (including with an empty list when the search matched nothing), and
//! read by the "view all" action in stored order. It is never implicitly
//! cleared. One store per session: it lives inside the application state and
//! is only touched between strictly sequential user actions, so no locking is
//! involved.

use crate::types::Cid;

/// Ordered CIDs from the most recent similarity search.
#[derive(Debug, Default)]
pub struct SimilarityStore {
    cids: Vec<Cid>,
}

impl SimilarityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sequence with the result of a new search.
    /// Replacement is total — previous contents never survive, and an empty
    /// `cids` is a legitimate replacement.
    pub fn replace(&mut self, cids: Vec<Cid>) {
        self.cids = cids;
    }

    /// The stored CIDs, in search-result order.
    pub fn cids(&self) -> &[Cid] {
        &self.cids
    }

    /// True both before any search has run and after a search that matched
    /// nothing — the UI shows the same warning for either.
    pub fn is_empty(&self) -> bool {
        self.cids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cids(tokens: &[&str]) -> Vec<Cid> {
        tokens.iter().copied().map(Cid::from).collect()
    }

    #[test]
    fn starts_empty() {
        let store = SimilarityStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn replace_keeps_order() {
        let mut store = SimilarityStore::new();
        store.replace(cids(&["3", "1", "2"]));
        let stored: Vec<&str> = store.cids().iter().map(Cid::as_str).collect();
        assert_eq!(stored, vec!["3", "1", "2"]);
    }

    #[test]
    fn second_search_fully_replaces_no_append() {
        let mut store = SimilarityStore::new();
        store.replace(cids(&["1", "2", "3"]));
        store.replace(cids(&["9", "8"]));
        let stored: Vec<&str> = store.cids().iter().map(Cid::as_str).collect();
        assert_eq!(stored, vec!["9", "8"]);
    }

    #[test]
    fn empty_replacement_is_indistinguishable_from_never_searched() {
        let mut searched = SimilarityStore::new();
        searched.replace(cids(&["1", "2"]));
        searched.replace(Vec::new());

        let untouched = SimilarityStore::new();
        assert_eq!(searched.is_empty(), untouched.is_empty());
        assert_eq!(searched.cids(), untouched.cids());
    }
}
