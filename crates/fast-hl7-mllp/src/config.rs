//! Configuration types for MLLP readers.

/// Read size used when none is configured.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;

/// Configuration for [`MllpReader`](crate::MllpReader).
///
/// # Example
///
/// ```rust
/// use fast_hl7_mllp::MllpConfig;
///
/// let config = MllpConfig::builder()
///     .with_max_frame_size(1024 * 1024)
///     .with_read_chunk_size(16 * 1024)
///     .build();
/// assert_eq!(config.max_frame_size, Some(1024 * 1024));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MllpConfig {
    /// Largest accepted message body in bytes (None = unlimited).
    pub max_frame_size: Option<usize>,
    /// Bytes requested from the underlying reader per read call.
    pub read_chunk_size: usize,
}

impl MllpConfig {
    /// Creates a new builder for MllpConfig.
    pub fn builder() -> MllpConfigBuilder {
        MllpConfigBuilder::default()
    }
}

impl Default for MllpConfig {
    fn default() -> Self {
        Self {
            max_frame_size: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

/// Builder for MllpConfig.
#[derive(Debug, Clone, Default)]
pub struct MllpConfigBuilder {
    max_frame_size: Option<usize>,
    read_chunk_size: Option<usize>,
}

impl MllpConfigBuilder {
    /// Rejects frames whose body exceeds `max_frame_size` bytes.
    pub fn with_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = Some(max_frame_size);
        self
    }

    /// Sets the read chunk size. Zero is raised to one byte.
    pub fn with_read_chunk_size(mut self, read_chunk_size: usize) -> Self {
        self.read_chunk_size = Some(read_chunk_size.max(1));
        self
    }

    /// Builds the MllpConfig.
    pub fn build(self) -> MllpConfig {
        MllpConfig {
            max_frame_size: self.max_frame_size,
            read_chunk_size: self.read_chunk_size.unwrap_or(DEFAULT_READ_CHUNK_SIZE),
        }
    }
}
