//! 照合の型定義
//!
//! CLIと照合エンジンで共有される型:
//! - DetailRecord: カタログの納まり詳細（不変）
//! - MatchQuery: 照合クエリ（自由入力3項目）
//! - MatchRequest / MatchResponse: 境界で受け渡すデータ形状

use serde::{Deserialize, Serialize};

/// 照合対象のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Host,
    Adjacent,
    Exposure,
}

impl Field {
    /// 理由文に並べる順序
    pub const ALL: [Field; 3] = [Field::Host, Field::Adjacent, Field::Exposure];

    /// 設定ファイル等で使うキー名
    pub fn key(&self) -> &'static str {
        match self {
            Field::Host => "host",
            Field::Adjacent => "adjacent",
            Field::Exposure => "exposure",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Host => write!(f, "host"),
            Field::Adjacent => write!(f, "adjacent element"),
            Field::Exposure => write!(f, "exposure"),
        }
    }
}

/// 納まり詳細（カタログの1件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// 識別子（カタログ内で一意）
    pub id: String,
    /// 表示名
    pub title: String,
    /// 主要素（正規化済み）
    pub host: String,
    /// 隣接要素（正規化済み）
    pub adjacent: String,
    /// 暴露条件（internal / external）
    pub exposure: String,
    /// 備考（表示のみ、照合には使わない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DetailRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        host: impl Into<String>,
        adjacent: impl Into<String>,
        exposure: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            host: host.into(),
            adjacent: adjacent.into(),
            exposure: exposure.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Host => &self.host,
            Field::Adjacent => &self.adjacent,
            Field::Exposure => &self.exposure,
        }
    }
}

/// 照合クエリ（呼び出し側の生の入力）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub host: String,
    pub adjacent: String,
    pub exposure: String,
}

impl MatchQuery {
    pub fn new(
        host: impl Into<String>,
        adjacent: impl Into<String>,
        exposure: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            adjacent: adjacent.into(),
            exposure: exposure.into(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Host => &self.host,
            Field::Adjacent => &self.adjacent,
            Field::Exposure => &self.exposure,
        }
    }
}

/// リクエスト形状: `{host_element, adjacent_element, exposure}`
///
/// 欠落フィールドはデシリアライズ時に拒否される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub host_element: String,
    pub adjacent_element: String,
    pub exposure: String,
}

impl From<MatchRequest> for MatchQuery {
    fn from(request: MatchRequest) -> Self {
        Self {
            host: request.host_element,
            adjacent: request.adjacent_element,
            exposure: request.exposure,
        }
    }
}

impl From<&MatchRequest> for MatchQuery {
    fn from(request: &MatchRequest) -> Self {
        request.clone().into()
    }
}

/// レスポンス形状: `{suggested_detail, confidence, reason}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    /// 提案ディテールの表示名（候補なしの場合は null）
    pub suggested_detail: Option<String>,
    pub confidence: f64,
    pub reason: String,
}
