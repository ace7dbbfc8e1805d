use serde::{Deserialize, Serialize};

use crate::dealer::DealerRecord;

/// The one key the dealer list is cached under.
pub const CACHE_KEY: &str = "dealers_cache";

/// Response body for the dealer endpoints.
///
/// `count` is always derived from `dealers`; the fields are private so no
/// caller can build a payload where the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealersPayload {
    success: bool,
    count: usize,
    dealers: Vec<DealerRecord>,
    #[serde(default)]
    cached: bool,
}

impl DealersPayload {
    pub fn new(dealers: Vec<DealerRecord>) -> Self {
        Self {
            success: true,
            count: dealers.len(),
            dealers,
            cached: false,
        }
    }

    /// Decode a payload previously written to the cache.
    ///
    /// The stored `count` is not trusted.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let decoded: DealersPayload = serde_json::from_str(raw)?;
        Ok(Self::new(decoded.dealers).mark_cached(decoded.cached))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn mark_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self.count = self.dealers.len();
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn dealers(&self) -> &[DealerRecord] {
        &self.dealers
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }
}

impl Default for DealersPayload {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
