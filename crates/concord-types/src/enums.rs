//! Enumeration types shared across the Concord workspace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Qualitative classification of one round's decision, derived from the
/// collective index.
///
/// The wire/display strings are stable: the presentation layer matches on
/// them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum QualityLabel {
    /// Collective index above 0.7: the population voted while calm,
    /// focused, and coherent.
    Excellent,
    /// Collective index in (0.5, 0.7]: a reasonable balance of signals.
    Good,
    /// Collective index at or below 0.5: stress dominated the round.
    Conservative,
}

impl QualityLabel {
    /// Return the stable human-readable label for this classification.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent / neural-harmony driven",
            Self::Good => "good / logical balance",
            Self::Conservative => "conservative / stress influenced",
        }
    }
}

impl core::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            QualityLabel::Excellent.to_string(),
            "excellent / neural-harmony driven"
        );
        assert_eq!(QualityLabel::Good.to_string(), "good / logical balance");
        assert_eq!(
            QualityLabel::Conservative.to_string(),
            "conservative / stress influenced"
        );
    }

    #[test]
    fn label_serde_uses_variant_names() {
        let json = serde_json::to_string(&QualityLabel::Good).ok();
        assert_eq!(json.as_deref(), Some("\"Good\""));
    }
}
