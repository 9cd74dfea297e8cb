use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Starting bucket count of the inverted index (clamped to at least 8).
    pub initial_capacity: usize,
    /// How many vocabulary terms one query term expands to in prefix search.
    pub prefix_expansion_limit: usize,
    /// Suggestions returned by `IndexEngine::suggest`.
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { initial_capacity: 1024, prefix_expansion_limit: 25, suggestion_limit: 8 }
    }
}
