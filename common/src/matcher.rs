//! 照合モジュール
//!
//! クエリを正規化し、カタログの各候補をフィールドごとに採点して
//! 加重和で信頼度を出し、最も高い候補を1件選ぶ。
//!
//! ## 処理フロー
//! 1. クエリ3項目の正規化
//! 2. 候補ごとのフィールド比較（完全一致 → 部分一致 → 不一致）
//! 3. 加重和（host 0.45 / adjacent 0.35 / exposure 0.20）
//! 4. 最大信頼度の候補を選択（同点はカタログ順で先の候補）
//! 5. 信頼度帯と比較結果から理由文を作成

use crate::normalizer::normalize_query;
use crate::similarity::{FieldScore, FieldSimilarity, SubstringSimilarity};
use crate::synonym::{SynonymTable, BUILTIN_SYNONYMS};
use crate::types::{DetailRecord, Field, MatchQuery, MatchResponse};
use crate::weights::{Weights, DEFAULT_WEIGHTS};

/// 候補がない場合の理由文
pub const NO_CANDIDATES_REASON: &str = "No candidates available";

/// 信頼度帯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub const HIGH_THRESHOLD: f64 = 0.8;
    pub const MEDIUM_THRESHOLD: f64 = 0.5;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            ConfidenceBand::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "High confidence"),
            ConfidenceBand::Medium => write!(f, "Medium confidence"),
            ConfidenceBand::Low => write!(f, "Low confidence"),
        }
    }
}

/// 候補1件の採点結果
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// host / adjacent / exposure の順
    pub field_scores: [FieldScore; 3],
    /// 小数第2位に丸めた信頼度
    pub confidence: f64,
}

/// 照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// 選ばれた候補（カタログが空なら None）
    pub detail: Option<DetailRecord>,
    pub confidence: f64,
    /// 選ばれた候補のフィールド比較結果（host / adjacent / exposure の順）
    pub field_scores: Vec<FieldScore>,
    pub reason: String,
}

impl MatchResult {
    fn no_candidates() -> Self {
        Self {
            detail: None,
            confidence: 0.0,
            field_scores: Vec::new(),
            reason: NO_CANDIDATES_REASON.to_string(),
        }
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    pub fn to_response(&self) -> MatchResponse {
        MatchResponse {
            suggested_detail: self.detail.as_ref().map(|d| d.title.clone()),
            confidence: self.confidence,
            reason: self.reason.clone(),
        }
    }
}

/// 照合エンジン
///
/// 状態を持たないため、カタログと合わせて複数スレッドから共有できる。
#[derive(Debug, Clone)]
pub struct Matcher<S = SubstringSimilarity> {
    synonyms: SynonymTable,
    similarity: S,
    weights: Weights,
}

impl Matcher {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self::with_similarity(synonyms, SubstringSimilarity)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(BUILTIN_SYNONYMS.clone())
    }
}

impl<S: FieldSimilarity> Matcher<S> {
    pub fn with_similarity(synonyms: SynonymTable, similarity: S) -> Self {
        Self {
            synonyms,
            similarity,
            weights: DEFAULT_WEIGHTS,
        }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn normalize_query(&self, query: &MatchQuery) -> MatchQuery {
        normalize_query(&self.synonyms, query)
    }

    /// 正規化済みクエリで候補1件を採点
    pub fn score_candidate(&self, normalized: &MatchQuery, detail: &DetailRecord) -> CandidateScore {
        let field_scores = Field::ALL.map(|field| FieldScore {
            field,
            tier: self
                .similarity
                .compare(normalized.field(field), detail.field(field)),
        });
        let confidence = round_confidence(self.weights.aggregate(&field_scores));

        CandidateScore {
            field_scores,
            confidence,
        }
    }

    /// カタログから最も一致する候補を選ぶ
    pub fn find_best(&self, query: &MatchQuery, catalog: &[DetailRecord]) -> MatchResult {
        let normalized = self.normalize_query(query);

        let mut best: Option<(&DetailRecord, CandidateScore)> = None;
        for detail in catalog {
            let scored = self.score_candidate(&normalized, detail);
            // 厳密に上回った場合のみ更新（同点は先の候補を残す）
            let better = match &best {
                Some((_, current)) => scored.confidence > current.confidence,
                None => true,
            };
            if better {
                best = Some((detail, scored));
            }
        }

        let Some((detail, scored)) = best else {
            return MatchResult::no_candidates();
        };

        MatchResult {
            detail: Some(detail.clone()),
            confidence: scored.confidence,
            reason: compose_reason(scored.confidence, &scored.field_scores),
            field_scores: scored.field_scores.to_vec(),
        }
    }
}

/// 組み込み同義語で照合する
pub fn match_detail(query: &MatchQuery, catalog: &[DetailRecord]) -> MatchResult {
    Matcher::new(BUILTIN_SYNONYMS.clone()).find_best(query, catalog)
}

/// 小数第2位に丸める
///
/// 浮動小数点の誤差だけで異なる加重和を同点として扱うため、選択前に丸める。
pub fn round_confidence(raw: f64) -> f64 {
    (raw * 100.0).round() / 100.0
}

fn compose_reason(confidence: f64, field_scores: &[FieldScore]) -> String {
    let labels: Vec<String> = field_scores.iter().map(FieldScore::label).collect();
    format!(
        "{}: {}",
        ConfidenceBand::from_confidence(confidence),
        labels.join("; ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::MatchTier;

    fn sample_catalog() -> Vec<DetailRecord> {
        vec![
            DetailRecord::new("D-001", "External Wall–Slab Junction Waterproofing", "external wall", "slab", "external"),
            DetailRecord::new("D-002", "Internal Partition–Slab Recess", "internal partition", "slab", "internal"),
            DetailRecord::new("D-003", "Curtain Wall–CMU Sill Detail", "curtain wall", "cmu", "external"),
            DetailRecord::new("D-004", "Roof Edge–Parapet Flashing", "roof edge", "parapet", "external"),
            DetailRecord::new("D-005", "Foundation Wall–Footing Junction", "foundation wall", "footing", "external"),
        ]
    }

    #[test]
    fn test_exact_match_all_fields() {
        let catalog = sample_catalog();
        let result = match_detail(&MatchQuery::new("External Wall", "Slab", "External"), &catalog);

        assert_eq!(result.detail.as_ref().map(|d| d.id.as_str()), Some("D-001"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.band(), ConfidenceBand::High);
        assert_eq!(
            result.reason,
            "High confidence: Exact match on host; Exact match on adjacent element; Exact match on exposure"
        );
    }

    #[test]
    fn test_synonym_query() {
        let catalog = sample_catalog();
        let result = match_detail(&MatchQuery::new("Exterior Wall", "Slab", "Exterior"), &catalog);
        assert_eq!(result.detail.map(|d| d.id), Some("D-001".to_string()));
        assert_eq!(result.confidence, 1.0);

        let result = match_detail(&MatchQuery::new("Curtain Wall", "Masonry", "External"), &catalog);
        assert_eq!(result.detail.map(|d| d.id), Some("D-003".to_string()));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_partial_host_only() {
        let catalog = vec![DetailRecord::new("D-003", "Curtain Wall–CMU Sill Detail", "curtain wall", "cmu", "external")];
        let result = match_detail(&MatchQuery::new("wall", "footing", "internal"), &catalog);

        assert!((result.confidence - 0.27).abs() < 1e-9);
        assert_eq!(result.band(), ConfidenceBand::Low);
        assert!(result.reason.starts_with("Low confidence: "));
        assert!(result.reason.contains("Partial match on host"));
        assert_eq!(result.field_scores[0].tier, MatchTier::Partial);
    }

    #[test]
    fn test_empty_catalog() {
        let result = match_detail(&MatchQuery::new("External Wall", "Slab", "External"), &[]);
        assert!(result.detail.is_none());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reason, NO_CANDIDATES_REASON);
        assert!(result.field_scores.is_empty());

        let response = result.to_response();
        assert_eq!(response.suggested_detail, None);
    }

    #[test]
    fn test_tie_break_catalog_order() {
        let catalog = vec![
            DetailRecord::new("A", "First", "roof edge", "parapet", "external"),
            DetailRecord::new("B", "Second", "roof edge", "parapet", "external"),
        ];
        let result = match_detail(&MatchQuery::new("Roof Edge", "Parapet", "External"), &catalog);
        assert_eq!(result.detail.map(|d| d.id), Some("A".to_string()));

        let reversed: Vec<DetailRecord> = catalog.into_iter().rev().collect();
        let result = match_detail(&MatchQuery::new("Roof Edge", "Parapet", "External"), &reversed);
        assert_eq!(result.detail.map(|d| d.id), Some("B".to_string()));
    }

    #[test]
    fn test_tie_across_different_tier_combinations() {
        // host部分一致+exposure完全一致 (0.27+0.20) と adjacent完全一致+exposure部分一致 (0.35+0.12)
        let catalog = vec![
            DetailRecord::new("A", "First", "curtain wall", "footing", "external"),
            DetailRecord::new("B", "Second", "roof edge", "slab", "external facade"),
        ];
        let result = match_detail(&MatchQuery::new("wall", "slab", "external"), &catalog);
        assert_eq!(result.confidence, 0.47);
        assert_eq!(result.detail.map(|d| d.id), Some("A".to_string()));
    }

    #[test]
    fn test_all_empty_fields() {
        let catalog = vec![
            DetailRecord::new("A", "Populated", "roof edge", "parapet", "external"),
            DetailRecord::new("B", "Blank", "", "", ""),
        ];
        let result = match_detail(&MatchQuery::new("", "  ", ""), &catalog);
        assert_eq!(result.detail.map(|d| d.id), Some("B".to_string()));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_no_match_still_returns_first() {
        let catalog = sample_catalog();
        let result = match_detail(&MatchQuery::new("skylight", "gutter", "unknown"), &catalog);
        assert_eq!(result.detail.map(|d| d.id), Some("D-001".to_string()));
        assert_eq!(result.confidence, 0.0);
        assert_eq!(
            result.reason,
            "Low confidence: No match on host; No match on adjacent element; No match on exposure"
        );
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ConfidenceBand::from_confidence(1.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.8), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.79), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.49), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(0.0), ConfidenceBand::Low);
    }

    #[test]
    fn test_host_and_adjacent_exact_is_high() {
        // 0.45 + 0.35 = 0.80 ちょうどで High
        let catalog = sample_catalog();
        let result = match_detail(&MatchQuery::new("roof edge", "parapet", "internal"), &catalog);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.band(), ConfidenceBand::High);
    }

    #[test]
    fn test_confidence_bounded() {
        let catalog = sample_catalog();
        let queries = [
            ("", "", ""),
            ("wall", "slab", "external"),
            ("external wall", "slab", "external"),
            ("roof", "cmu", "internal"),
            ("a", "b", "c"),
        ];
        for (host, adjacent, exposure) in queries {
            let result = match_detail(&MatchQuery::new(host, adjacent, exposure), &catalog);
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn test_custom_similarity() {
        struct ExactOnly;
        impl FieldSimilarity for ExactOnly {
            fn compare(&self, query: &str, candidate: &str) -> MatchTier {
                if query == candidate { MatchTier::Exact } else { MatchTier::NoMatch }
            }
        }

        let matcher = Matcher::with_similarity(SynonymTable::builtin(), ExactOnly);
        let catalog = vec![DetailRecord::new("D-003", "Curtain Wall", "curtain wall", "cmu", "external")];
        let result = matcher.find_best(&MatchQuery::new("wall", "masonry", "exterior"), &catalog);
        assert!((result.confidence - 0.55).abs() < 1e-9);
        assert!(result.reason.contains("No match on host"));
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.45 + 0.35 + 0.20), 1.0);
        assert_eq!(round_confidence(0.45 * 0.6), 0.27);
        assert_eq!(round_confidence(0.0), 0.0);
    }
}
