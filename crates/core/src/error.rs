#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Pool exhausted or database unreachable within the acquire deadline.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// An aggregate query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailure(String),

    /// A request parameter failed validation before any query ran.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
