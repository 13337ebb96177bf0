//! 一括照合
//!
//! リクエスト配列を読み込み、共有カタログに対して並列に照合する。
//! 各照合は独立しているため、結果は入力順に並べ直すだけでよい。

use crate::engine::MatchEngine;
use crate::error::{MatcherError, Result};
use detail_matcher_common::{MatchRequest, MatchResponse};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// リクエストJSON（配列）を読み込む
///
/// 欠落フィールドや型違いはここで拒否され、照合エンジンには届かない。
pub fn read_requests(path: &Path) -> Result<Vec<MatchRequest>> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let requests: Vec<MatchRequest> = serde_json::from_reader(reader)?;
    Ok(requests)
}

/// 入力順を保って並列照合する
pub fn match_batch(
    engine: &MatchEngine,
    requests: &[MatchRequest],
    show_progress: bool,
) -> Vec<MatchResponse> {
    let progress = if show_progress {
        let bar = ProgressBar::new(requests.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let responses: Vec<MatchResponse> = requests
        .par_iter()
        .map(|request| {
            let response = engine.match_request(request);
            progress.inc(1);
            response
        })
        .collect();

    progress.finish_and_clear();
    responses
}

/// 結果をJSONで書き出す（パス省略時は標準出力）
pub fn write_responses(output: Option<&Path>, responses: &[MatchResponse]) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, responses)?;
            // drop時の書き込みエラーは捨てられるので明示的にflush
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, responses)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}
