use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The input file is not a CSV file.")]
    NotCsv,

    #[error("File is empty.")]
    EmptyFile,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
