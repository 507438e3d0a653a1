use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum TransferError {
    #[error("Invalid planet name: {0:?}")]
    UnknownBody(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum CatalogError {
    #[error("Catalog has no bodies")]
    Empty,

    #[error("Body name is blank")]
    EmptyName,

    #[error("Body {0:?} is defined more than once")]
    DuplicateBody(String),

    #[error("Body {name:?} has invalid orbital radius {radius}")]
    InvalidRadius { name: String, radius: f64 },

    #[error("Body {name:?} has invalid orbital period {period}")]
    InvalidPeriod { name: String, period: f64 },
}

#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid animation settings: {0}")]
    InvalidAnimation(String),

    #[error("Invalid gravitational parameter: {0}")]
    InvalidGravitationalParameter(f64),
}
