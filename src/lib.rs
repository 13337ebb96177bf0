//! 納まり詳細照合ツール
//!
//! 照合エンジン本体は `detail-matcher-common` にあり、このクレートは
//! カタログ・設定・CLI・一括照合を受け持つ。

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
