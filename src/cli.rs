use clap::{Parser, Subcommand};
use fetal_care_common::{Role, SubmissionMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fetal-care")]
#[command(about = "胎児健康予測・AFI画像解析クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 進捗表示を無効化
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ログインしてセッションを保存
    Login {
        #[arg(short, long)]
        email: String,

        /// 省略時は対話入力
        #[arg(short, long)]
        password: Option<String>,
    },

    /// アカウント登録
    Register {
        #[arg(long)]
        full_name: String,

        #[arg(short, long)]
        email: String,

        /// 省略時は対話入力
        #[arg(short, long)]
        password: Option<String>,

        /// 役割 (patient/doctor)
        #[arg(short, long, default_value = "patient")]
        role: Role,
    },

    /// ログアウト（セッション削除）
    Logout,

    /// ログイン中のユーザー情報を表示
    Me,

    /// 胎児健康予測
    Predict {
        /// 送信モード (simple/advanced)
        #[arg(short, long, default_value = "simple")]
        mode: SubmissionMode,

        /// 入力値 name=value（複数指定可）
        #[arg(short = 's', long = "set")]
        values: Vec<String>,

        /// 入力値JSONファイル
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 必須項目を対話入力
        #[arg(short = 'I', long)]
        interactive: bool,

        /// 詳細項目を一覧表示
        #[arg(long)]
        show_advanced: bool,
    },

    /// 超音波画像をアップロードしてAFIを解析
    Analyze {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 結果をJSONレポートとして保存
        #[arg(long)]
        report: bool,

        /// レポートの出力先（ファイルまたはフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 解析履歴
    History {
        /// 履歴を全削除
        #[arg(long)]
        clear: bool,
    },

    /// 表示テーマ
    Theme {
        #[arg(long, conflicts_with = "light")]
        dark: bool,

        #[arg(long)]
        light: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 予測APIのURL
        #[arg(long)]
        set_prediction_url: Option<String>,

        /// 画像解析サーバーのURL
        #[arg(long)]
        set_image_url: Option<String>,

        /// タイムアウト秒数（0で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
