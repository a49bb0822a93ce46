// linkshelf services
// Stateless logic: URL canonicalization, input parsing, classification,
// duplicate detection, read-only queries and settings persistence.

pub mod classifier;
pub mod duplicate_detector;
pub mod input_normalizer;
pub mod link_query;
pub mod settings_engine;
pub mod url_canonicalizer;
