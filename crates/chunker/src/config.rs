use serde::{Deserialize, Serialize};

/// Configuration bounding chunk sizes, expressed in estimated tokens.
///
/// Token counts are a cheap character-based proxy, not real tokenizer
/// output: `tokens = ceil(bytes / chars_per_token)`. The policy is the only
/// externally tunable surface of the chunking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkPolicy {
    /// Target chunk size in tokens (soft limit)
    pub target_tokens: usize,

    /// Maximum chunk size in tokens (hard ceiling)
    pub max_tokens: usize,

    /// Minimum chunk size in tokens (floor below which a buffer is not
    /// flushed if avoidable)
    pub min_tokens: usize,

    /// Estimation factor: how many characters make up one estimated token
    pub chars_per_token: usize,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            target_tokens: 3000,
            max_tokens: 4000,
            min_tokens: 500,
            chars_per_token: 4,
        }
    }
}

impl ChunkPolicy {
    /// Soft target in characters
    #[must_use]
    pub const fn target_chars(&self) -> usize {
        self.target_tokens * self.chars_per_token
    }

    /// Hard ceiling in characters
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_tokens * self.chars_per_token
    }

    /// Floor in characters
    #[must_use]
    pub const fn min_chars(&self) -> usize {
        self.min_tokens * self.chars_per_token
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.chars_per_token == 0 {
            return Err("chars_per_token must be > 0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".to_string());
        }

        if self.min_tokens > self.target_tokens {
            return Err(format!(
                "min_tokens ({}) cannot exceed target_tokens ({})",
                self.min_tokens, self.target_tokens
            ));
        }

        if self.target_tokens > self.max_tokens {
            return Err(format!(
                "target_tokens ({}) cannot exceed max_tokens ({})",
                self.target_tokens, self.max_tokens
            ));
        }

        Ok(())
    }
}
