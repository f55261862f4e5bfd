use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Repage configuration
///
/// Selects which of the two transformations run. When both are enabled the
/// page order is rewritten first and sizes are normalized on the reordered
/// sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepageOptions {
    /// Exchange every fully matched adjacent page pair (positions 2i and 2i+1)
    pub swap_pages: bool,

    /// After swapping, put the first pair back in its original order.
    /// Later pairs stay swapped. Only meaningful together with `swap_pages`.
    pub restore_first_pair: bool,

    /// Rescale every page to the most common page size in the document
    pub normalize_sizes: bool,
}

impl Default for RepageOptions {
    fn default() -> Self {
        Self {
            swap_pages: true,
            restore_first_pair: false,
            normalize_sizes: true,
        }
    }
}

impl RepageOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| RepageError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RepageError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.swap_pages && !self.normalize_sizes {
            return Err(RepageError::Config(
                "Nothing to do: enable swap_pages and/or normalize_sizes".to_string(),
            ));
        }

        if self.restore_first_pair && !self.swap_pages {
            return Err(RepageError::Config(
                "restore_first_pair has no effect without swap_pages".to_string(),
            ));
        }

        Ok(())
    }
}
