use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::OtsuParams;
use crate::mosaic::MosaicLayout;
use crate::BinarizeError;

/// Settings for a binarization run, loadable from JSON.
///
/// Every field is optional in the file; missing ones take their defaults:
///
/// ```json
/// { "otsu": { "variant": "full_range" }, "mosaic": { "max_columns": 2 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeConfig {
    pub otsu: OtsuParams,
    pub mosaic: MosaicLayout,
}

impl BinarizeConfig {
    pub fn from_json_str(s: &str) -> Result<Self, BinarizeError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BinarizeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BinarizeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, BinarizeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OtsuVariant;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = BinarizeConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, BinarizeConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = BinarizeConfig::from_json_str(
            r#"{ "otsu": { "fallback_threshold": 90 }, "mosaic": { "max_columns": 1 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.otsu.variant, OtsuVariant::Classic);
        assert_eq!(cfg.otsu.fallback_threshold, 90);
        assert_eq!(cfg.mosaic.max_columns, 1);
        assert_eq!(cfg.mosaic.margin, MosaicLayout::default().margin);
    }

    #[test]
    fn survives_json_round_trip() {
        let mut cfg = BinarizeConfig::default();
        cfg.otsu.variant = OtsuVariant::FullRange;
        cfg.mosaic.tile_size = Some(128);
        let text = cfg.to_json_pretty().unwrap();
        assert_eq!(BinarizeConfig::from_json_str(&text).unwrap(), cfg);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = BinarizeConfig::from_json_str(r#"{ "otsu": 3 }"#).unwrap_err();
        assert!(matches!(err, BinarizeError::Config(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = BinarizeConfig::from_json_file("/nonexistent/binarize.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/binarize.json"));
    }
}
