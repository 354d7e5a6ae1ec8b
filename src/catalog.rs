// src/catalog.rs
//! Provider/model directory: the catalog served by `/api/models` and the
//! currently selected provider/model pair.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WorkflowError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub available: bool,
    #[serde(default)]
    pub models: Vec<String>,
}

/// Providers in the order the backend serves them. Fetched once per session
/// and treated as immutable until the next fetch; iteration order matters
/// because auto-selection picks the first available entry.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    entries: Vec<(String, ProviderStatus)>,
}

impl ProviderCatalog {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderStatus)> + '_ {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    pub fn get(&self, provider: &str) -> Option<&ProviderStatus> {
        self.entries
            .iter()
            .find(|(name, _)| name == provider)
            .map(|(_, s)| s)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First provider in catalog order with `available == true`.
    pub fn first_available(&self) -> Option<(&str, &ProviderStatus)> {
        self.iter().find(|(_, status)| status.available)
    }

    /// Unavailable providers must never be offered for selection, even when
    /// the backend still lists models for them.
    pub fn is_selectable(&self, provider: &str) -> bool {
        self.get(provider).map(|s| s.available).unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(String, ProviderStatus)>) -> Self {
        Self { entries }
    }
}

// The wire format is a JSON object keyed by provider name. A plain map type
// would lose the backend's ordering, so the entries are collected by hand.
impl<'de> Deserialize<'de> for ProviderCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ProviderCatalog;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of provider name to status")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some((name, status)) = map.next_entry::<String, ProviderStatus>()? {
                    entries.push((name, status));
                }
                Ok(ProviderCatalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

impl Serialize for ProviderCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, status) in &self.entries {
            map.serialize_entry(name, status)?;
        }
        map.end()
    }
}

/// Mutable provider/model pair. Invariant: when `provider` is non-empty and
/// the catalog has loaded, `model` is a member of that provider's model list
/// (or empty when the provider has none).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub provider: String,
    pub model: String,
}

impl Selection {
    pub fn is_set(&self) -> bool {
        !self.provider.is_empty()
    }

    /// On first catalog load: pick the first available provider and its
    /// first model. No-op if something is already selected. Leaves the
    /// selection empty when nothing is available, which keeps downstream
    /// actions disabled.
    pub fn auto_select(&mut self, catalog: &ProviderCatalog) {
        if self.is_set() {
            return;
        }
        if let Some((name, status)) = catalog.first_available() {
            self.provider = name.to_string();
            self.model = status.models.first().cloned().unwrap_or_default();
        }
    }

    /// Switch provider; the model resets to the first entry of the new
    /// provider's list (or empty if it has none).
    pub fn set_provider(
        &mut self,
        catalog: &ProviderCatalog,
        provider: &str,
    ) -> Result<(), WorkflowError> {
        let status = catalog.get(provider).ok_or_else(|| {
            WorkflowError::validation(format!("Unknown provider: {}", provider))
        })?;
        if !status.available {
            return Err(WorkflowError::validation(format!(
                "Provider {} is not available.",
                provider
            )));
        }
        self.provider = provider.to_string();
        self.model = status.models.first().cloned().unwrap_or_default();
        Ok(())
    }

    /// Switch model within the current provider.
    pub fn set_model(
        &mut self,
        catalog: &ProviderCatalog,
        model: &str,
    ) -> Result<(), WorkflowError> {
        if self.provider.is_empty() {
            return Err(WorkflowError::validation("No provider selected."));
        }
        let status = catalog.get(&self.provider).ok_or_else(|| {
            WorkflowError::validation(format!("Unknown provider: {}", self.provider))
        })?;
        if !status.models.iter().any(|m| m == model) {
            return Err(WorkflowError::validation(format!(
                "Model {} is not offered by {}.",
                model, self.provider
            )));
        }
        self.model = model.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProviderCatalog {
        serde_json::from_str(
            r#"{
                "Ollama": {"available": false, "models": []},
                "OpenAI": {"available": true, "models": ["gpt-4o", "gpt-4-turbo"]},
                "Claude": {"available": true, "models": ["claude-3-5-sonnet-20241022"]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_order_preserved() {
        let catalog = catalog();
        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Ollama", "OpenAI", "Claude"]);
    }

    #[test]
    fn test_auto_select_skips_unavailable() {
        let mut selection = Selection::default();
        selection.auto_select(&catalog());
        assert_eq!(selection.provider, "OpenAI");
        assert_eq!(selection.model, "gpt-4o");
    }

    #[test]
    fn test_auto_select_noop_when_already_set() {
        let mut selection = Selection {
            provider: "Claude".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
        };
        selection.auto_select(&catalog());
        assert_eq!(selection.provider, "Claude");
    }

    #[test]
    fn test_auto_select_empty_when_none_available() {
        let catalog: ProviderCatalog = serde_json::from_str(
            r#"{"anthropic": {"available": false, "models": []}}"#,
        )
        .unwrap();
        let mut selection = Selection::default();
        selection.auto_select(&catalog);
        assert!(!selection.is_set());
    }

    #[test]
    fn test_set_provider_resets_model() {
        let catalog = catalog();
        let mut selection = Selection::default();
        selection.auto_select(&catalog);
        selection.set_provider(&catalog, "Claude").unwrap();
        assert_eq!(selection.model, "claude-3-5-sonnet-20241022");
    }

    #[test]
    fn test_set_provider_with_no_models_clears_model() {
        let catalog = ProviderCatalog::from_entries(vec![(
            "Gemini".to_string(),
            ProviderStatus {
                available: true,
                models: vec![],
            },
        )]);
        let mut selection = Selection {
            provider: "X".to_string(),
            model: "y".to_string(),
        };
        selection.set_provider(&catalog, "Gemini").unwrap();
        assert_eq!(selection.provider, "Gemini");
        assert!(selection.model.is_empty());
    }

    #[test]
    fn test_unavailable_provider_not_selectable() {
        let catalog = catalog();
        assert!(!catalog.is_selectable("Ollama"));
        let mut selection = Selection::default();
        assert!(selection.set_provider(&catalog, "Ollama").is_err());
        assert!(selection.set_provider(&catalog, "Mistral").is_err());
    }

    #[test]
    fn test_set_model_requires_membership() {
        let catalog = catalog();
        let mut selection = Selection::default();
        selection.auto_select(&catalog);
        assert!(selection.set_model(&catalog, "gpt-4-turbo").is_ok());
        assert!(selection.set_model(&catalog, "gpt-5").is_err());
    }
}
