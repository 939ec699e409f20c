// src/cli/args.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};

use super::parsers::{BoundArg, parse_positive_usize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "bibgroups",
    version = crate::VERSION,
    about = "文献エントリのグループ分け/範囲フィルタ/検索ツール"
)]
pub struct Args {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "table", help_heading = "出力")]
    pub format: OutputFormat,

    /// 出力先ファイル（未指定は標準出力）
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "出力")]
    pub output: Option<PathBuf>,

    /// 件数のみ表示（引用キー一覧は出さない）
    #[arg(long, help_heading = "出力")]
    pub count_only: bool,

    /// グループ定義ファイル (JSON)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "フィルタ")]
    pub groups: Option<PathBuf>,

    /// --field で作る範囲グループの名前
    #[arg(long, default_value = "cli", help_heading = "フィルタ")]
    pub name: String,

    /// 範囲フィルタ対象フィールド（例: year, date）
    #[arg(long, help_heading = "フィルタ")]
    pub field: Option<String>,

    /// 範囲の下限（整数または YYYY-MM-DD。省略で下方開区間）
    #[arg(long, requires = "field", help_heading = "フィルタ")]
    pub min: Option<BoundArg>,

    /// 範囲の上限（整数または YYYY-MM-DD。省略で上方開区間）
    #[arg(long, requires = "field", help_heading = "フィルタ")]
    pub max: Option<BoundArg>,

    /// 全フィールド検索クエリ（空白区切りの語を AND 検索）
    #[arg(long, help_heading = "フィルタ")]
    pub query: Option<String>,

    /// --query を正規表現として解釈
    #[arg(long, requires = "query", help_heading = "フィルタ")]
    pub regex: bool,

    /// 大文字小文字を区別
    #[arg(long, help_heading = "フィルタ")]
    pub case_sensitive: bool,

    /// LaTeX aux ファイルの \citation から被引用グループを作成
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "フィルタ")]
    pub aux: Option<PathBuf>,

    /// 検索履歴ファイル（--query 実行時に記録）
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "履歴")]
    pub history: Option<PathBuf>,

    /// 検索履歴を番号付きで表示して終了
    #[arg(long, requires = "history", help_heading = "履歴")]
    pub recent: bool,

    /// 履歴の [N] 番のクエリを再実行（--recent の番号）
    #[arg(long, value_name = "N", value_parser = parse_positive_usize, requires = "history", conflicts_with = "query", help_heading = "履歴")]
    pub pick: Option<usize>,

    /// 厳格モード（1件失敗で終了）。既定は警告して続行
    #[arg(long, help_heading = "動作")]
    pub strict: bool,

    /// 文献エントリファイル (JSON)
    #[arg(value_hint = ValueHint::FilePath, help_heading = "入力")]
    pub entries: Option<PathBuf>,
}
