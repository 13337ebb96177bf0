//! 入力正規化モジュール
//!
//! 前後の空白除去・小文字化のあと、フィールドごとの同義語テーブルで
//! 表記ゆれを正規形に置き換える。入力を拒否することはない。
//!
//! ## 置換規則
//! - キーの長い順に照合（"curtain wall" を "wall" より先に見る）
//! - キーは語境界でのみ一致（前後が英数字でない位置）
//! - 1パスは左から右へ走査し、置換した部分は同じパスで再走査しない
//! - 結果が変化しなくなるまでパスを繰り返す（上限あり）

use crate::synonym::{SynonymEntry, SynonymTable, BUILTIN_SYNONYMS};
use crate::types::{Field, MatchQuery};

/// 置換パスの上限
const MAX_PASSES: usize = 8;

/// 組み込みテーブルで正規化する
pub fn normalize(field: Field, raw: &str) -> String {
    normalize_with(&BUILTIN_SYNONYMS, field, raw)
}

/// 指定テーブルで正規化する
pub fn normalize_with(table: &SynonymTable, field: Field, raw: &str) -> String {
    let mut current = raw.trim().to_lowercase();
    let entries = table.entries(field);
    if entries.is_empty() {
        return current;
    }

    for _ in 0..MAX_PASSES {
        let next = replace_tokens(&current, entries);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

/// クエリの3項目をまとめて正規化する
pub fn normalize_query(table: &SynonymTable, query: &MatchQuery) -> MatchQuery {
    MatchQuery {
        host: normalize_with(table, Field::Host, &query.host),
        adjacent: normalize_with(table, Field::Adjacent, &query.adjacent),
        exposure: normalize_with(table, Field::Exposure, &query.exposure),
    }
}

/// 1パス分の置換
fn replace_tokens(text: &str, entries: &[SynonymEntry]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        let hit = if starts_token(text, pos) {
            entries
                .iter()
                .find(|e| rest.starts_with(e.from.as_str()) && ends_token(text, pos + e.from.len()))
        } else {
            None
        };

        match hit {
            Some(entry) => {
                out.push_str(&entry.to);
                pos += entry.from.len();
            }
            None => {
                let Some(c) = rest.chars().next() else { break };
                out.push(c);
                pos += c.len_utf8();
            }
        }
    }

    out
}

/// `needle` が語境界で `haystack` に含まれるか
pub(crate) fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack
        .match_indices(needle)
        .any(|(start, _)| starts_token(haystack, start) && ends_token(haystack, start + needle.len()))
}

fn starts_token(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

fn ends_token(text: &str, pos: usize) -> bool {
    text[pos..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric())
}
