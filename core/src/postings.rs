use serde::{Deserialize, Serialize};

use crate::DocId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32, // occurrences of the term within doc_id, always >= 1
}

/// Append-only list of postings for one term, kept in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, posting: Posting) { self.postings.push(posting); }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> { self.postings.iter() }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
