//! 起動時に組み立てる照合コンテキスト
//!
//! カタログと同義語テーブルは読み込み後に変更しない。
//! `MatchEngine` は `Sync` なので、バッチ照合では参照を共有して並列実行する。

use crate::catalog::Catalog;
use crate::error::{MatcherError, Result};
use detail_matcher_common::{
    DetailRecord, MatchQuery, MatchRequest, MatchResponse, MatchResult, Matcher, SynonymConfig,
    SynonymTable,
};
use std::path::Path;

pub struct MatchEngine {
    catalog: Catalog,
    matcher: Matcher,
}

impl MatchEngine {
    pub fn new(catalog: Catalog, matcher: Matcher) -> Self {
        Self { catalog, matcher }
    }

    /// 組み込みカタログ・組み込み同義語
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), Matcher::new(SynonymTable::builtin()))
    }

    /// パス指定があればファイルから、なければ組み込みを使う
    pub fn load(catalog_path: Option<&Path>, synonyms_path: Option<&Path>) -> Result<Self> {
        let synonyms = load_synonyms(synonyms_path)?;

        let catalog = match catalog_path {
            Some(path) => Catalog::from_file(path, &synonyms)?,
            None => {
                log::info!("組み込みカタログを使用");
                Catalog::builtin_with(&synonyms)?
            }
        };

        if catalog.is_empty() {
            log::warn!("カタログが空です。すべての照合が候補なしになります");
        }

        Ok(Self::new(catalog, Matcher::new(synonyms)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn details(&self) -> &[DetailRecord] {
        self.catalog.details()
    }

    pub fn match_query(&self, query: &MatchQuery) -> MatchResult {
        if log::log_enabled!(log::Level::Debug) {
            let normalized = self.matcher.normalize_query(query);
            log::debug!(
                "正規化: host='{}' adjacent='{}' exposure='{}'",
                normalized.host,
                normalized.adjacent,
                normalized.exposure
            );
            for detail in self.details() {
                let scored = self.matcher.score_candidate(&normalized, detail);
                log::debug!("  {} → {:.2}", detail.id, scored.confidence);
            }
        }

        self.matcher.find_best(query, self.details())
    }

    pub fn match_request(&self, request: &MatchRequest) -> MatchResponse {
        self.match_query(&MatchQuery::from(request)).to_response()
    }
}

/// 組み込み同義語にファイルの定義を重ねる
pub fn load_synonyms(path: Option<&Path>) -> Result<SynonymTable> {
    let Some(path) = path else {
        return Ok(SynonymTable::builtin());
    };

    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    let custom = SynonymConfig::from_file(path)?;
    let table = SynonymTable::with_overrides(&custom)?;
    log::info!("同義語読み込み: {} ({}件)", path.display(), table.len());
    Ok(table)
}
