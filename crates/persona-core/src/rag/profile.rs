//! Persona extraction from collection text.
//!
//! Two extraction calls run back to back: one for the name, one for the
//! title. Each must return JSON in `content[0]` carrying the expected field.
//! Any failure in either call replaces the whole profile with the configured
//! defaults, so the header never shows an extracted name next to a default
//! title (or the reverse).

use persona_types::config::ProfileConfig;
use persona_types::error::ExtractError;
use persona_types::profile::Profile;
use persona_types::rag::{ExtractRequest, Extraction};

use super::box_client::BoxRagClient;

const NAME_SYSTEM_PROMPT: &str =
    "You are a helpful AI Assistant and your goal is to extract names";
const NAME_EXTRACT_PROMPT: &str =
    "Return only the name of the person this profile belongs to as a JSON";
const TITLE_SYSTEM_PROMPT: &str =
    "You are a helpful AI Assistant and your goal is to extract professional titles";
const TITLE_EXTRACT_PROMPT: &str = "Return only the current position title of the person this \
profile belongs to as a JSON with a single field called title";

/// Read a string field from the JSON object in `content[0]`.
pub fn parse_field(extraction: &Extraction, field: &'static str) -> Result<String, ExtractError> {
    let raw = extraction
        .content
        .first()
        .ok_or(ExtractError::EmptyContent)?;

    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ExtractError::Json(e.to_string()))?;

    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractError::MissingField(field))
}

/// Run both extraction calls. Fails on the first problem.
pub async fn try_extract_profile(
    client: &BoxRagClient,
    texts: &[String],
) -> Result<Profile, ExtractError> {
    let name_request = ExtractRequest {
        texts: texts.to_vec(),
        system_prompt: NAME_SYSTEM_PROMPT.to_string(),
        extract_prompt: NAME_EXTRACT_PROMPT.to_string(),
    };
    let name = parse_field(&client.extract(&name_request).await?, "name")?;

    let title_request = ExtractRequest {
        texts: texts.to_vec(),
        system_prompt: TITLE_SYSTEM_PROMPT.to_string(),
        extract_prompt: TITLE_EXTRACT_PROMPT.to_string(),
    };
    let title = parse_field(&client.extract(&title_request).await?, "title")?;

    Ok(Profile { name, title })
}

/// Extract the profile, falling back to the configured defaults on any error.
pub async fn extract_profile(
    client: &BoxRagClient,
    texts: &[String],
    defaults: &ProfileConfig,
) -> Profile {
    match try_extract_profile(client, texts).await {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(error = %err, "Profile extraction failed, using defaults");
            Profile::new(&defaults.default_name, &defaults.default_title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::mock::MockRag;
    use persona_types::rag::RagError;

    fn extraction(content: &str) -> Extraction {
        Extraction {
            content: vec![content.to_string()],
        }
    }

    #[test]
    fn parse_field_reads_name() {
        let name = parse_field(&extraction(r#"{"name": "Jane Smith"}"#), "name").unwrap();
        assert_eq!(name, "Jane Smith");
    }

    #[test]
    fn parse_field_rejects_malformed_json() {
        let err = parse_field(&extraction("not json"), "name").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }

    #[test]
    fn parse_field_rejects_missing_or_non_string_field() {
        let err = parse_field(&extraction(r#"{"person": "Jane"}"#), "name").unwrap_err();
        assert!(matches!(err, ExtractError::MissingField("name")));

        let err = parse_field(&extraction(r#"{"name": 42}"#), "name").unwrap_err();
        assert!(matches!(err, ExtractError::MissingField("name")));
    }

    #[test]
    fn parse_field_rejects_empty_content() {
        let err = parse_field(&Extraction::default(), "title").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyContent));
    }

    #[tokio::test]
    async fn extract_profile_uses_both_extracted_values() {
        let mock = MockRag::new()
            .with_extraction(r#"{"name": "Jane Smith"}"#)
            .with_extraction(r#"{"title": "Staff Engineer"}"#);
        let client = BoxRagClient::new(mock.clone());
        let texts = vec!["chunk 1".to_string()];

        let profile = extract_profile(&client, &texts, &ProfileConfig::default()).await;

        assert_eq!(profile, Profile::new("Jane Smith", "Staff Engineer"));
        let requests = mock.inspect(|s| s.extract_requests.clone());
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].system_prompt, NAME_SYSTEM_PROMPT);
        assert_eq!(requests[1].extract_prompt, TITLE_EXTRACT_PROMPT);
        assert_eq!(requests[1].texts, texts);
    }

    #[tokio::test]
    async fn malformed_name_falls_back_to_defaults() {
        let mock = MockRag::new().with_extraction("not json");
        let client = BoxRagClient::new(mock.clone());

        let profile = extract_profile(&client, &[], &ProfileConfig::default()).await;

        assert_eq!(profile, Profile::new("John Doe", "Senior Analyst"));
        // The title call is never made once the name fails.
        assert_eq!(mock.inspect(|s| s.extract_requests.len()), 1);
    }

    #[tokio::test]
    async fn failed_title_discards_extracted_name() {
        let mock = MockRag::new()
            .with_extraction(r#"{"name": "Jane Smith"}"#)
            .with_extraction_error(RagError::Timeout);
        let client = BoxRagClient::new(mock);

        let profile = extract_profile(&client, &[], &ProfileConfig::default()).await;

        assert_eq!(profile, Profile::new("John Doe", "Senior Analyst"));
    }

    #[tokio::test]
    async fn defaults_come_from_config() {
        let client = BoxRagClient::new(MockRag::new());
        let defaults = ProfileConfig {
            default_name: "Ada".to_string(),
            default_title: "Engineer".to_string(),
            ..ProfileConfig::default()
        };

        let profile = extract_profile(&client, &[], &defaults).await;

        assert_eq!(profile, Profile::new("Ada", "Engineer"));
    }
}
