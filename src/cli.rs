use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "detail-matcher")]
#[command(about = "納まり詳細照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 警告以外のログを抑制
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// カタログJSONファイル（省略時は設定または組み込みカタログ）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// 同義語JSONファイル（組み込み同義語に上書きマージ）
    #[arg(long, global = true)]
    pub synonyms: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1件照合して最適なディテールを提案
    Match {
        /// 主要素（例: "External Wall"）
        #[arg(long, default_value = "")]
        host: String,

        /// 隣接要素（例: "Slab"）
        #[arg(long, default_value = "")]
        adjacent: String,

        /// 暴露条件（例: "External"）
        #[arg(long, default_value = "")]
        exposure: String,

        /// レスポンスをJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// リクエストJSON（配列）を一括照合
    Batch {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 進捗表示を無効化
        #[arg(long)]
        no_progress: bool,
    },

    /// カタログ一覧を表示
    Details {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のカタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 既定の同義語ファイルを設定
        #[arg(long)]
        set_synonyms: Option<PathBuf>,

        /// 設定を初期化
        #[arg(long)]
        reset: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
