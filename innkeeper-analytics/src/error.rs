//! Error types for analytics loading

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Error type for loading and interpreting the bookings table.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Underlying file access failed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The CSV could not be parsed into booking records
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// A record carried a value the dataset contract rules out
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },
}
