//! 同義語テーブルモジュール
//!
//! 要素名・暴露条件の表記ゆれを正規形に寄せるための置換表。
//! フィールドごとに独立したテーブルを持ち、組み込みテーブルに
//! JSONで与えたカスタム定義を上書きマージできる。

use crate::error::{Error, Result};
use crate::normalizer::contains_token;
use crate::types::Field;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 組み込みの同義語（全フィールド共通）
const BASE_SYNONYMS: &[(&str, &str)] = &[
    ("exterior", "external"),
    ("interior", "internal"),
    ("concrete slab", "slab"),
    ("masonry", "cmu"),
    ("ext wall", "external wall"),
    ("int wall", "internal wall"),
];

lazy_static::lazy_static! {
    /// 組み込みテーブル（プロセス内で共有）
    pub static ref BUILTIN_SYNONYMS: SynonymTable = SynonymTable::builtin();
}

/// 同義語定義（JSONファイルの形状）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynonymConfig {
    /// 主要素の同義語
    #[serde(default)]
    pub host: HashMap<String, String>,
    /// 隣接要素の同義語
    #[serde(default)]
    pub adjacent: HashMap<String, String>,
    /// 暴露条件の同義語
    #[serde(default)]
    pub exposure: HashMap<String, String>,
}

impl SynonymConfig {
    /// 組み込み定義
    pub fn builtin() -> Self {
        let base: HashMap<String, String> = BASE_SYNONYMS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        Self {
            host: base.clone(),
            adjacent: base.clone(),
            exposure: base,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// 設定をマージ（後から追加した設定が優先、キーは大文字小文字を区別しない）
    pub fn merge(&mut self, other: &SynonymConfig) {
        merge_map(&mut self.host, &other.host);
        merge_map(&mut self.adjacent, &other.adjacent);
        merge_map(&mut self.exposure, &other.exposure);
    }

    fn map(&self, field: Field) -> &HashMap<String, String> {
        match field {
            Field::Host => &self.host,
            Field::Adjacent => &self.adjacent,
            Field::Exposure => &self.exposure,
        }
    }
}

/// 置換エントリ（キー・値とも小文字・前後空白なし）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymEntry {
    pub from: String,
    pub to: String,
}

/// 照合用に整列済みの同義語テーブル
///
/// 各フィールドのエントリはキーの長い順に並ぶ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    host: Vec<SynonymEntry>,
    adjacent: Vec<SynonymEntry>,
    exposure: Vec<SynonymEntry>,
}

impl SynonymTable {
    /// 検証してテーブルを構築
    pub fn new(config: &SynonymConfig) -> Result<Self> {
        for field in Field::ALL {
            validate(field, config.map(field))?;
        }
        Ok(Self::compile(config))
    }

    /// 組み込みテーブル
    pub fn builtin() -> Self {
        Self::compile(&SynonymConfig::builtin())
    }

    /// 組み込みテーブルにカスタム定義を重ねる
    pub fn with_overrides(custom: &SynonymConfig) -> Result<Self> {
        // マージで大文字小文字違いのキーが潰れる前に検証
        for field in Field::ALL {
            validate(field, custom.map(field))?;
        }

        let mut config = SynonymConfig::builtin();
        config.merge(custom);
        Self::new(&config)
    }

    /// フィールドのエントリ（キーの長い順）
    pub fn entries(&self, field: Field) -> &[SynonymEntry] {
        match field {
            Field::Host => &self.host,
            Field::Adjacent => &self.adjacent,
            Field::Exposure => &self.exposure,
        }
    }

    pub fn len(&self) -> usize {
        self.host.len() + self.adjacent.len() + self.exposure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compile(config: &SynonymConfig) -> Self {
        Self {
            host: compile_entries(&config.host),
            adjacent: compile_entries(&config.adjacent),
            exposure: compile_entries(&config.exposure),
        }
    }
}

fn merge_map(base: &mut HashMap<String, String>, other: &HashMap<String, String>) {
    for (from, to) in other {
        let key = from.trim().to_lowercase();
        base.retain(|k, _| k.trim().to_lowercase() != key);
        base.insert(key, to.clone());
    }
}

fn compile_entries(map: &HashMap<String, String>) -> Vec<SynonymEntry> {
    let mut entries: Vec<SynonymEntry> = map
        .iter()
        .map(|(from, to)| SynonymEntry {
            from: from.trim().to_lowercase(),
            to: to.trim().to_lowercase(),
        })
        .collect();

    // 長いキー優先、同じ長さは辞書順で決定的に
    entries.sort_by(|a, b| b.from.len().cmp(&a.from.len()).then_with(|| a.from.cmp(&b.from)));
    entries.dedup_by(|a, b| a.from == b.from);
    entries
}

/// 空キー・空値・正規化後の重複キー・連鎖（値が同じテーブルのキーを含む）を拒否
fn validate(field: Field, map: &HashMap<String, String>) -> Result<()> {
    let keys: Vec<String> = map.keys().map(|k| k.trim().to_lowercase()).collect();

    let mut seen = HashSet::new();
    for key in &keys {
        if !seen.insert(key.as_str()) {
            return Err(Error::Synonym(format!(
                "duplicate key '{}' in {} table",
                key,
                field.key()
            )));
        }
    }

    for (from, to) in map {
        let key = from.trim().to_lowercase();
        let value = to.trim().to_lowercase();

        if key.is_empty() {
            return Err(Error::Synonym(format!("empty key in {} table", field.key())));
        }
        if value.is_empty() {
            return Err(Error::Synonym(format!(
                "empty value for '{}' in {} table",
                key,
                field.key()
            )));
        }
        if let Some(chained) = keys.iter().find(|k| !k.is_empty() && contains_token(&value, k)) {
            return Err(Error::Synonym(format!(
                "value '{}' for '{}' contains key '{}' in {} table",
                value,
                key,
                chained,
                field.key()
            )));
        }
    }

    Ok(())
}
