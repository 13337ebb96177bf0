//! Detail Matcher Common Library
//!
//! 納まり詳細の照合エンジン（正規化・採点・選択）。
//! I/Oを持たず、CLIや他の呼び出し側から共有される。

pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod similarity;
pub mod synonym;
pub mod types;
pub mod weights;

pub use error::{Error, Result};
pub use matcher::{match_detail, CandidateScore, ConfidenceBand, MatchResult, Matcher};
pub use normalizer::{normalize, normalize_with};
pub use similarity::{FieldScore, FieldSimilarity, MatchTier, SubstringSimilarity};
pub use synonym::{SynonymConfig, SynonymTable};
pub use types::{DetailRecord, Field, MatchQuery, MatchRequest, MatchResponse};
pub use weights::{Weights, DEFAULT_WEIGHTS};
