//! Prefix tree over indexed terms, used for prefix expansion and suggestions.
//!
//! Nodes live in an arena owned by the [`Trie`]; a node refers to its children
//! by index. Children are kept in the order they were first created, which
//! makes the breadth-first traversal in [`Trie::autocomplete`] deterministic:
//! terms with equal document frequency come back in BFS encounter order, not
//! alphabetically.

use std::collections::VecDeque;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: Vec<(char, NodeId)>,
    is_terminal: bool,
    document_frequency: u32,
}

impl TrieNode {
    fn child(&self, ch: char) -> Option<NodeId> {
        self.children.iter().find(|(c, _)| *c == ch).map(|(_, id)| *id)
    }
}

#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    terms: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::default()], terms: 0 }
    }

    /// Number of distinct terms stored.
    pub fn len(&self) -> usize { self.terms }

    pub fn is_empty(&self) -> bool { self.terms == 0 }

    /// Record one more document containing `term`. Callers insert a term at
    /// most once per document.
    pub fn insert(&mut self, term: &str) {
        let mut node = ROOT;
        for ch in term.chars() {
            node = match self.nodes[node].child(ch) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.push((ch, next));
                    next
                }
            };
        }
        let node = &mut self.nodes[node];
        if !node.is_terminal {
            node.is_terminal = true;
            self.terms += 1;
        }
        node.document_frequency += 1;
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        match self.walk(term) {
            Some(id) if self.nodes[id].is_terminal => self.nodes[id].document_frequency,
            _ => 0,
        }
    }

    /// Terms starting with `prefix`, most frequent first, at most `limit` of
    /// them. An empty prefix enumerates the whole vocabulary.
    pub fn autocomplete(&self, prefix: &str, limit: usize) -> Vec<(String, u32)> {
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };

        let mut results: Vec<(String, u32)> = Vec::new();
        let mut queue: VecDeque<(NodeId, String)> = VecDeque::new();
        queue.push_back((start, prefix.to_owned()));
        while let Some((id, term)) = queue.pop_front() {
            let node = &self.nodes[id];
            for &(ch, child) in &node.children {
                let mut next = term.clone();
                next.push(ch);
                queue.push_back((child, next));
            }
            if node.is_terminal {
                results.push((term, node.document_frequency));
            }
        }

        // stable: ties keep BFS order
        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.truncate(limit);
        results
    }

    fn walk(&self, prefix: &str) -> Option<NodeId> {
        let mut node = ROOT;
        for ch in prefix.chars() {
            node = self.nodes[node].child(ch)?;
        }
        Some(node)
    }
}

impl Default for Trie {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_n(trie: &mut Trie, term: &str, n: u32) {
        for _ in 0..n {
            trie.insert(term);
        }
    }

    #[test]
    fn counts_one_per_insert() {
        let mut trie = Trie::new();
        insert_n(&mut trie, "cat", 3);
        assert_eq!(trie.document_frequency("cat"), 3);
        assert_eq!(trie.document_frequency("ca"), 0);
        assert_eq!(trie.document_frequency("cats"), 0);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn autocomplete_ranks_by_frequency() {
        let mut trie = Trie::new();
        insert_n(&mut trie, "apple", 5);
        insert_n(&mut trie, "application", 2);
        insert_n(&mut trie, "apply", 5);

        let hits = trie.autocomplete("app", 2);
        assert_eq!(hits, vec![("apple".to_string(), 5), ("apply".to_string(), 5)]);

        let all = trie.autocomplete("app", 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], ("application".to_string(), 2));
    }

    #[test]
    fn ties_follow_bfs_order_not_alphabetical() {
        let mut trie = Trie::new();
        trie.insert("zebra");
        trie.insert("zeal");
        trie.insert("zen");
        // "zen" is shallowest; then children of "ze" in creation order: b, a
        let hits = trie.autocomplete("ze", 10);
        let terms: Vec<&str> = hits.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(terms, vec!["zen", "zeal", "zebra"]);
    }

    #[test]
    fn prefix_itself_is_included() {
        let mut trie = Trie::new();
        trie.insert("car");
        trie.insert("cart");
        let hits = trie.autocomplete("car", 10);
        assert_eq!(hits[0], ("car".to_string(), 1));
        assert_eq!(hits[1], ("cart".to_string(), 1));
    }

    #[test]
    fn missing_prefix_is_empty() {
        let mut trie = Trie::new();
        trie.insert("dog");
        assert!(trie.autocomplete("cat", 10).is_empty());
        assert!(Trie::new().autocomplete("", 10).is_empty());
    }

    #[test]
    fn empty_prefix_lists_vocabulary() {
        let mut trie = Trie::new();
        for term in ["a1", "b2", "c3"] {
            trie.insert(term);
        }
        assert_eq!(trie.autocomplete("", 100).len(), 3);
        assert_eq!(trie.autocomplete("", 0).len(), 0);
    }
}
