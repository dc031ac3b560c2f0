pub mod coerce;
pub mod model;
pub mod normalize;

pub use model::{
    Clause, ClauseMatch, ClauseMismatch, ComparisonResult, DocumentDescriptor, Recommendation,
    format_percent,
};
pub use normalize::{NormalizeError, normalize_clause, normalize_comparison};
