use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Network failure, timeout or non-success HTTP status on an external call.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload that cannot be decoded: malformed JSON, non-numeric values.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Payload decoded but an expected key or index is missing.
    #[error("Data structure error: {0}")]
    DataStructure(String),

    /// The target date has no entry in a series (not published yet).
    #[error("No data for {0} in the forecast series")]
    DateNotFound(NaiveDate),

    #[error("Notification delivery error: {0}")]
    NotificationDelivery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// User-facing category line. Network, schema and availability causes
    /// must stay distinguishable here.
    pub fn headline(&self) -> &'static str {
        match self {
            AppError::Transport(_) => {
                "通信エラー: インターネット接続またはAPIの状態を確認してください。"
            }
            AppError::DataFormat(_) => "データ形式エラー: APIからの応答が不正です。",
            AppError::DataStructure(_) => {
                "データ構造エラー: APIの仕様が変更された可能性があります。"
            }
            AppError::DateNotFound(_) => {
                "データ処理エラー: 該当日の予報はまだ発表されていません。"
            }
            AppError::NotificationDelivery(_) => "通知エラー: Discordへの送信に失敗しました。",
            AppError::Config(_) => "設定エラー: 環境変数の値を確認してください。",
        }
    }

    /// Process exit code for a run aborted by this error.
    ///
    /// Delivery failures are reported without aborting, so
    /// `NotificationDelivery` never reaches the process exit path; its arm
    /// only keeps the mapping total and apart from the abort codes.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Transport(_) => 3,
            AppError::DataFormat(_) => 4,
            AppError::DataStructure(_) => 5,
            AppError::DateNotFound(_) => 6,
            AppError::Config(_) => 7,
            AppError::NotificationDelivery(_) => 8,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Transport(format!("request timed out: {}", err))
        } else {
            AppError::Transport(format!("request failed: {}", err))
        }
    }
}
