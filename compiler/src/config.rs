/// Resource limits applied to a single parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Longest accepted source buffer, in bytes.
    pub max_source_len: usize,
    /// Deepest accepted parenthesis nesting.
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_SOURCE_LEN: usize = 1024 * 1024;
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;
    /// Byte positions are `u32`, so no buffer may be longer than this.
    pub const SOURCE_LEN_CEILING: usize = u32::MAX as usize;

    /// Clamped to [`ParserConfig::SOURCE_LEN_CEILING`].
    pub fn with_max_source_len(mut self, max_source_len: usize) -> Self {
        self.max_source_len = max_source_len.min(ParserConfig::SOURCE_LEN_CEILING);
        self
    }

    /// The length limit actually enforced, even if the field was set directly.
    pub fn source_len_limit(&self) -> usize {
        self.max_source_len.min(ParserConfig::SOURCE_LEN_CEILING)
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_source_len: ParserConfig::DEFAULT_MAX_SOURCE_LEN,
            max_nesting_depth: ParserConfig::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParserConfig;

    #[test]
    fn test_default() {
        let config = ParserConfig::default();
        assert_eq!(config.max_source_len, 1024 * 1024);
        assert_eq!(config.max_nesting_depth, 256);
    }

    #[test]
    fn test_source_len_is_clamped() {
        let config = ParserConfig::default().with_max_source_len(usize::MAX);
        assert_eq!(config.max_source_len, u32::MAX as usize);
        assert_eq!(config.source_len_limit(), u32::MAX as usize);

        let config = ParserConfig {
            max_source_len: usize::MAX,
            ..ParserConfig::default()
        };
        assert_eq!(config.source_len_limit(), ParserConfig::SOURCE_LEN_CEILING);

        let config = ParserConfig::default().with_max_source_len(16);
        assert_eq!(config.source_len_limit(), 16);
    }
}
