//! Feature metadata.
//!
//! The schema carries optional feature names. Names are purely
//! descriptive: they show up in the model's `Display` output but play no
//! role in training.

use serde::{Deserialize, Serialize};

/// Metadata for a single feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMeta {
    /// Optional feature name.
    pub name: Option<String>,
}

impl FeatureMeta {
    /// A named feature.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// An unnamed feature.
    pub fn unnamed() -> Self {
        Self { name: None }
    }
}

/// Per-feature metadata for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    features: Vec<FeatureMeta>,
}

impl DatasetSchema {
    /// Schema of `n_features` unnamed features.
    pub fn unnamed(n_features: usize) -> Self {
        Self {
            features: vec![FeatureMeta::unnamed(); n_features],
        }
    }

    /// Schema from explicit feature metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        Self { features }
    }

    /// Number of features.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// The recorded name of a feature, if any.
    pub fn feature_name(&self, feature: usize) -> Option<&str> {
        self.features.get(feature).and_then(|m| m.name.as_deref())
    }

    /// Display name: the recorded name, or `x<index>` as a fallback.
    pub fn display_name(&self, feature: usize) -> String {
        match self.feature_name(feature) {
            Some(name) => name.to_string(),
            None => format!("x{feature}"),
        }
    }
}
