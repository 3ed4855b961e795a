// Real-time optimization: rule-based suggestions for a resume section that is
// being edited, memoized in a bounded LRU cache shared through AppState.

pub mod cache;
pub mod handlers;
pub mod optimizer;

pub use cache::SuggestionCache;
