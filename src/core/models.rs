//! Output configuration.

/// Controls which optional fields the writers emit.
///
/// `sender`, `content` and `direction` are always written.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Include message IDs in output
    pub include_ids: bool,
    /// Include timestamps in output
    pub include_timestamps: bool,
    /// Include the delta to the previous message, in milliseconds
    pub include_deltas: bool,
    /// Include how the sender was determined
    pub include_attribution: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional field.
    pub fn all() -> Self {
        Self {
            include_ids: true,
            include_timestamps: true,
            include_deltas: true,
            include_attribution: true,
        }
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_deltas(mut self) -> Self {
        self.include_deltas = true;
        self
    }

    #[must_use]
    pub fn with_attribution(mut self) -> Self {
        self.include_attribution = true;
        self
    }
}
