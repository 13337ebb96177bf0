//! フィールド類似度
//!
//! 正規化済みの2文字列を比較し、固定の段階（完全一致・部分一致・不一致）を返す。
//! 集約・選択のロジックはこの段階しか見ないため、比較方法は差し替え可能。

use crate::types::Field;

/// 一致の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Partial,
    NoMatch,
}

impl MatchTier {
    /// 段階ごとのスコア
    pub fn score(&self) -> f64 {
        match self {
            MatchTier::Exact => 1.0,
            MatchTier::Partial => 0.6,
            MatchTier::NoMatch => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Exact => "Exact match",
            MatchTier::Partial => "Partial match",
            MatchTier::NoMatch => "No match",
        }
    }
}

/// 類似度判定の差し替え口
pub trait FieldSimilarity: Send + Sync {
    /// `query` と `candidate` はどちらも正規化済み
    fn compare(&self, query: &str, candidate: &str) -> MatchTier;
}

/// 部分文字列による判定
///
/// 長さの比率は見ない。2文字の値が20文字の値に含まれていても部分一致になる。
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringSimilarity;

impl FieldSimilarity for SubstringSimilarity {
    fn compare(&self, query: &str, candidate: &str) -> MatchTier {
        if query == candidate {
            MatchTier::Exact
        } else if !query.is_empty()
            && !candidate.is_empty()
            && (candidate.contains(query) || query.contains(candidate))
        {
            MatchTier::Partial
        } else {
            MatchTier::NoMatch
        }
    }
}

/// 1フィールド分の比較結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldScore {
    pub field: Field,
    pub tier: MatchTier,
}

impl FieldScore {
    pub fn score(&self) -> f64 {
        self.tier.score()
    }

    /// 例: "Partial match on host"
    pub fn label(&self) -> String {
        format!("{} on {}", self.tier.label(), self.field)
    }
}
