// ===============================================================================
// 错误类型定义
// ===============================================================================

/// 体素求交错误类型
/// 单帧求交/上色流程中所有可恢复的失败
#[derive(Debug, thiserror::Error)]
pub enum HullError {
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

/// 数据集读写错误
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Hull(#[from] HullError),
}
