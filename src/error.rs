use thiserror::Error;

/// HTTP境界のエラー
///
/// 表示メッセージ（Display）はそのまま利用者に見せる。
#[derive(Error, Debug)]
pub enum ApiError {
    /// 接続失敗など（詳細はログのみ）
    #[error("Could not reach the server. Please check your connection and try again.")]
    Transport(String),

    /// サーバーが失敗ステータスを返した
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 本人確認で401
    #[error("Your session has expired. Please log in again with `fetal-care login`.")]
    Session,

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// 送信前の画像の種類が不正（サーバー応答ではない）
    #[error("Unsupported file type for {name}: {mime}")]
    InvalidFileType { name: String, mime: String },

    #[error("Could not read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ログインしていません。`fetal-care login` でログインしてください")]
    NotLoggedIn,

    #[error("FETAL_CARE_TOKEN のトークンが期限切れです。環境変数を更新するか削除してから `fetal-care login` を実行してください")]
    EnvTokenExpired,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("入力エラー: {0}")]
    Input(String),

    /// 予測がサーバー側で失敗した（メッセージは表示用）
    #[error("{0}")]
    Prediction(String),

    #[error("解析に失敗しました")]
    AnalysisFailed,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Common(#[from] fetal_care_common::Error),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for ClientError {
    fn from(e: dialoguer::Error) -> Self {
        ClientError::Input(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
