/// Construction-time sizing of a [`Bdd`][crate::bdd::Bdd].
///
/// All sizes are powers of two given as bit counts. The storage never grows:
/// exhausting `2^storage_bits` slots is fatal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// Number of node slots is `2^storage_bits`.
    pub storage_bits: usize,
    /// Number of unique-table buckets is `2^buckets_bits`.
    pub buckets_bits: usize,
    /// Initial capacity hint of each engine-wide cache is `2^cache_bits`.
    pub cache_bits: usize,
}

impl BddConfig {
    pub fn new(storage_bits: usize) -> Self {
        Self {
            storage_bits,
            buckets_bits: storage_bits.min(20),
            cache_bits: storage_bits.min(16),
        }
    }

    pub fn with_storage_bits(mut self, bits: usize) -> Self {
        self.storage_bits = bits;
        self
    }

    pub fn with_buckets_bits(mut self, bits: usize) -> Self {
        self.buckets_bits = bits;
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }

    pub fn validate(&self) {
        assert!(
            self.storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );
        assert!(
            self.storage_bits >= 1,
            "Storage must hold at least the terminal node"
        );
        assert!(
            self.buckets_bits <= 31,
            "Buckets bits should be in the range 0..=31"
        );
        assert!(
            self.cache_bits <= 31,
            "Cache bits should be in the range 0..=31"
        );
    }
}

impl Default for BddConfig {
    fn default() -> Self {
        Self::new(20)
    }
}
