use thiserror::Error;

pub type TradeResult<T> = Result<T, TradeError>;

#[derive(Debug, Error)]
pub enum TradeError {
    #[error("malformed record at line {line}: column `{column}` has invalid value `{value}`")]
    MalformedRecord {
        line: u64,
        column: String,
        value: String,
    },

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("unknown year: {year}")]
    UnknownYear { year: i32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
