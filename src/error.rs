//! Ошибки сети.

use std::path::PathBuf;
use thiserror::Error;

/// Результат операций с сетью
pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// Недопустимая топология или параметры скрещивания
    #[error("Configuration error: {0}")]
    Config(String),

    /// Топологии двух сетей не совпадают
    #[error("Topology mismatch: expected {expected}, got {actual}")]
    TopologyMismatch {
        expected: crate::NetworkTopology,
        actual: crate::NetworkTopology,
    },

    /// Длина входного вектора не совпадает с шириной слоя
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Файл сохранения не открылся или не записался
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Испорченный файл сохранения
    #[error("Malformed record at token {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Tensor operation error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NetworkError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        NetworkError::Config(msg.into())
    }

    pub fn parse<S: Into<String>>(position: usize, msg: S) -> Self {
        NetworkError::Parse { position, message: msg.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NetworkError::Io { path: path.into(), source }
    }
}
