pub mod title;
pub mod search;
pub mod filter;
pub mod mapping;
pub mod season;
pub mod id_resolver;
pub mod id_matching;
pub mod cache;
pub mod streams;
pub mod engine;

#[cfg(test)]
mod test_support;

pub use title::{compact_title, split_title, TitleNormalizer};
pub use search::search_catalog;
pub use filter::{classify, partition, Candidates, MatchTarget};
pub use mapping::MappingTables;
pub use season::{detect_merged_season, is_simple_match, ordinal_label, season_suffix, season_title};
pub use id_resolver::{extract_industry_id, IdResolver};
pub use id_matching::{find_matching_candidate, find_sole_anime_candidate};
pub use cache::ResultCache;
pub use streams::streams_for;
pub use engine::{ResolutionEngine, Unresolved};
