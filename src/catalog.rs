//! 納まり詳細カタログ
//!
//! 起動時に1度だけ読み込み、以降は読み取り専用で照合に渡す。
//! カタログの並び順は同点時の選択順を決めるため、読み込み順を保持する。

use crate::error::{MatcherError, Result};
use detail_matcher_common::{normalize_with, DetailRecord, Field, SynonymTable};
use std::collections::HashSet;
use std::path::Path;

/// 組み込みカタログ（id, title, host, adjacent, exposure, notes）
const BUILTIN_DETAILS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "D-001",
        "External Wall–Slab Junction Waterproofing",
        "external wall",
        "slab",
        "external",
        "Typical waterproofing and junction details for above-grade external wall to slab.",
    ),
    (
        "D-002",
        "Internal Partition–Slab Recess",
        "internal partition",
        "slab",
        "internal",
        "Interior partition details where a slab recess occurs.",
    ),
    (
        "D-003",
        "Curtain Wall–CMU Sill Detail",
        "curtain wall",
        "cmu",
        "external",
        "Sill interface with masonry backup (CMU).",
    ),
    (
        "D-004",
        "Roof Edge–Parapet Flashing",
        "roof edge",
        "parapet",
        "external",
        "Roof edge termination and flashing detail.",
    ),
    (
        "D-005",
        "Foundation Wall–Footing Junction",
        "foundation wall",
        "footing",
        "external",
        "Below-grade foundation wall to footing connection detail.",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    details: Vec<DetailRecord>,
}

impl Catalog {
    /// 組み込みカタログ
    pub fn builtin() -> Self {
        let details = BUILTIN_DETAILS
            .iter()
            .map(|(id, title, host, adjacent, exposure, notes)| {
                DetailRecord::new(*id, *title, *host, *adjacent, *exposure).with_notes(*notes)
            })
            .collect();
        Self { details }
    }

    /// 組み込みカタログを指定の同義語テーブルで正規化して構築
    pub fn builtin_with(synonyms: &SynonymTable) -> Result<Self> {
        Self::from_records(Self::builtin().details, synonyms)
    }

    /// レコード列から構築（ID検証・照合項目の正規化）
    pub fn from_records(records: Vec<DetailRecord>, synonyms: &SynonymTable) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut details = Vec::with_capacity(records.len());

        for (index, mut record) in records.into_iter().enumerate() {
            record.id = record.id.trim().to_string();
            if record.id.is_empty() {
                return Err(MatcherError::InvalidCatalog(format!("{}件目: IDが空です", index + 1)));
            }
            if record.title.trim().is_empty() {
                return Err(MatcherError::InvalidCatalog(format!(
                    "{}: タイトルが空です",
                    record.id
                )));
            }
            if !seen.insert(record.id.clone()) {
                return Err(MatcherError::DuplicateDetailId(record.id));
            }

            canonicalize(&mut record, synonyms);
            details.push(record);
        }

        Ok(Self { details })
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str, synonyms: &SynonymTable) -> Result<Self> {
        let records: Vec<DetailRecord> = serde_json::from_str(json)?;
        Self::from_records(records, synonyms)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path, synonyms: &SynonymTable) -> Result<Self> {
        if !path.exists() {
            return Err(MatcherError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content, synonyms)?;
        log::info!("カタログ読み込み: {} ({}件)", path.display(), catalog.len());
        Ok(catalog)
    }

    pub fn details(&self) -> &[DetailRecord] {
        &self.details
    }

    pub fn get(&self, id: &str) -> Option<&DetailRecord> {
        self.details.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// 照合項目をクエリと同じ規則で正規形にそろえる
fn canonicalize(record: &mut DetailRecord, synonyms: &SynonymTable) {
    for field in Field::ALL {
        let original = record.field(field).to_string();
        let canonical = normalize_with(synonyms, field, &original);
        if canonical != original {
            log::debug!("{}: {} '{}' → '{}'", record.id, field.key(), original, canonical);
            match field {
                Field::Host => record.host = canonical,
                Field::Adjacent => record.adjacent = canonical,
                Field::Exposure => record.exposure = canonical,
            }
        }
    }
}
