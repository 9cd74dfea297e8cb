use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::chained_map::ChainedMap;
use crate::config::EngineConfig;
use crate::error::IngestError;
use crate::postings::{Posting, PostingList};
use crate::tokenizer::tokenize;
use crate::trie::Trie;

pub type DocId = u32;
pub type Score = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub filename: String,
    /// Total term occurrences after stopword removal.
    pub token_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Keyword,
    Prefix,
    /// `prefix` selects starts-with matching instead of substring matching.
    Filename { prefix: bool },
}

/// Inverted index, prefix tree and document table.
///
/// Queries borrow the engine immutably and `ingest` borrows it mutably; the
/// engine does no locking of its own. A host sharing one engine between
/// threads must serialize ingestion against queries itself, e.g. with a
/// reader-writer lock that admits concurrent queries and exclusive ingestion.
pub struct IndexEngine {
    config: EngineConfig,
    documents: Vec<Document>, // documents[i].id == i + 1
    postings: ChainedMap<String, PostingList>,
    trie: Trie,
    next_doc_id: DocId,
}

impl IndexEngine {
    pub fn new() -> Self { Self::with_config(EngineConfig::default()) }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            postings: ChainedMap::with_capacity(config.initial_capacity),
            config,
            documents: Vec::new(),
            trie: Trie::new(),
            next_doc_id: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn vocabulary_size(&self) -> usize { self.trie.len() }

    /// Documents in ingestion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> { self.documents.iter() }

    pub fn get_document(&self, doc_id: DocId) -> Option<&Document> {
        let index = doc_id.checked_sub(1)? as usize;
        self.documents.get(index)
    }

    /// Index one document. Content without any index term is rejected and
    /// leaves the engine untouched, including the id counter.
    pub fn ingest(&mut self, title: &str, content: &str, filename: &str) -> Result<DocId, IngestError> {
        let tokens = tokenize(content);
        if tokens.is_empty() {
            tracing::debug!(title, filename, "rejected document without terms");
            return Err(IngestError::EmptyContent);
        }

        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;
        self.documents.push(Document {
            id: doc_id,
            title: title.to_owned(),
            filename: filename.to_owned(),
            token_count: tokens.len(),
        });

        // per-term counts, in order of first occurrence
        let mut term_counts: Vec<(&str, u32)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            match positions.get(token.as_str()) {
                Some(&pos) => term_counts[pos].1 += 1,
                None => {
                    positions.insert(token.as_str(), term_counts.len());
                    term_counts.push((token.as_str(), 1));
                }
            }
        }

        for &(term, term_freq) in &term_counts {
            let posting = Posting { doc_id, term_freq };
            match self.postings.get_mut(term) {
                Some(list) => list.push(posting),
                None => {
                    let mut list = PostingList::new();
                    list.push(posting);
                    self.postings.set(term.to_owned(), list);
                }
            }
            self.trie.insert(term);
        }

        tracing::debug!(doc_id, terms = tokens.len(), distinct = term_counts.len(), "ingested document");
        Ok(doc_id)
    }

    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<(DocId, Score)> {
        match mode {
            SearchMode::Keyword => self.keyword_search(query),
            SearchMode::Prefix => self.prefix_search(query),
            SearchMode::Filename { prefix } => self.filename_search(query, prefix),
        }
    }

    /// Documents containing any query term, scored by summed term frequency.
    pub fn keyword_search(&self, query: &str) -> Vec<(DocId, Score)> {
        let terms = tokenize(query);
        self.rank(terms.iter().map(String::as_str))
    }

    /// Like [`keyword_search`](Self::keyword_search), but every query term is
    /// first expanded to the most frequent vocabulary terms sharing it as a
    /// prefix. Expansions are not deduplicated: a document reached through two
    /// expansions of one query term scores for both.
    pub fn prefix_search(&self, query: &str) -> Vec<(DocId, Score)> {
        let limit = self.config.prefix_expansion_limit;
        let candidates: Vec<String> = tokenize(query)
            .iter()
            .flat_map(|term| self.trie.autocomplete(term, limit))
            .map(|(term, _)| term)
            .collect();
        self.rank(candidates.iter().map(String::as_str))
    }

    /// Documents whose filename starts with (`prefix`) or contains the query,
    /// case-insensitively. Every hit scores 1 and results stay in ingestion
    /// order; they are not ranked.
    pub fn filename_search(&self, query: &str, prefix: bool) -> Vec<(DocId, Score)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.documents
            .iter()
            .filter(|doc| !doc.filename.is_empty())
            .filter(|doc| {
                let filename = doc.filename.to_lowercase();
                if prefix { filename.starts_with(&needle) } else { filename.contains(&needle) }
            })
            .map(|doc| (doc.id, 1))
            .collect()
    }

    pub fn autocomplete_terms(&self, last_token: &str, limit: usize) -> Vec<(String, u32)> {
        self.trie.autocomplete(last_token, limit)
    }

    /// Suggestions for the last whitespace-separated word of a partial query.
    pub fn suggest(&self, query: &str) -> Vec<(String, u32)> {
        match query.split_whitespace().next_back() {
            Some(last) => self.autocomplete_terms(&last.to_lowercase(), self.config.suggestion_limit),
            None => Vec::new(),
        }
    }

    // Sums term frequencies per document. The sort is stable, so documents
    // with equal scores keep the order in which postings first reached them.
    fn rank<'q>(&self, terms: impl Iterator<Item = &'q str>) -> Vec<(DocId, Score)> {
        let mut scores: Vec<(DocId, Score)> = Vec::new();
        let mut slots: HashMap<DocId, usize> = HashMap::new();
        for term in terms {
            let Some(list) = self.postings.get(term) else { continue };
            for posting in list {
                let slot = *slots.entry(posting.doc_id).or_insert_with(|| {
                    scores.push((posting.doc_id, 0));
                    scores.len() - 1
                });
                scores[slot].1 += Score::from(posting.term_freq);
            }
        }
        scores.sort_by(|a, b| b.1.cmp(&a.1));
        scores
    }
}

impl Default for IndexEngine {
    fn default() -> Self { Self::new() }
}
