// Resume relevance evaluation.
// Implements: similarity scoring, verdict, skill gap analysis, suggestions.
// Embedding always goes through the `Embedder` held in AppState.

pub mod evaluator;
pub mod handlers;
pub mod similarity;
pub mod skills;
pub mod suggestions;
pub mod verdict;
