pub(crate) type DhsdResult<T> = Result<T, DhsdError>;

macro_rules! bail {
    ($($arg:tt)*) => {{
        return Err(DhsdError::Other(format!($($arg)*)));
    }};
}

pub(crate) use bail;

#[derive(Debug, thiserror::Error)]
pub(crate) enum DhsdError {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("malformed annotation table: {0}")]
    MalformedInput(String),

    #[error("annotation table contains no records")]
    EmptyDataset,

    #[error("train fraction must be strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    #[error("{0}")]
    Other(String),
}

impl DhsdError {
    #[inline]
    pub(crate) fn malformed<T: ToString>(s: T) -> Self {
        Self::MalformedInput(s.to_string())
    }
}
