//! Extractors whose rejections are response envelopes.

pub mod numeric_path;
pub mod validated_json;
pub mod validated_query;

pub use numeric_path::NumericPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
