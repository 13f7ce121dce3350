use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("初期化エラー: {0}")]
    Init(#[from] InitProcessError),

    #[error("キャプチャエラー: {0}")]
    Capture(#[from] std::io::Error),

    #[error("デコードエラー: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーの初期化に失敗しました: {0}")]
    LoggerSetupError(String),

    #[error("環境変数の文字列変換に失敗しました: {0}")]
    EnvVarParseError(String),

    #[error("デバイスの選択に失敗しました: {0}")]
    DeviceSelectionError(String),
}

// デコードに失敗したレイヤの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Tcp,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Ethernet => write!(f, "Ethernet"),
            Layer::Ipv4 => write!(f, "IPv4"),
            Layer::Tcp => write!(f, "TCP"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{layer}ヘッダーが切り詰められています: 必要{needed}バイト, 受信{available}バイト")]
    TruncatedHeader { layer: Layer, needed: usize, available: usize },
}
