//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, VariableValue, default_config_template};
use crate::message::TemplateVariable;

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [api]
            url = "https://graph.example.com/v21.0/123/messages"
            access_token = "secret"

            [message]
            recipient = "15551234567"
            template = "jeeva"
            language = "en"
            variables = ["Swetha", "zukacin"]
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.api.url.as_deref(),
            Some("https://graph.example.com/v21.0/123/messages")
        );
        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        assert_eq!(config.message.recipient.as_deref(), Some("15551234567"));
        assert_eq!(config.message.template.as_deref(), Some("jeeva"));
        assert_eq!(config.message.language.as_deref(), Some("en"));
        assert_eq!(config.message.variables.len(), 2);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.url.is_none());
        assert!(config.message.recipient.is_none());
        assert!(config.message.variables.is_empty());
    }

    #[test]
    fn mixed_variable_types_are_accepted() {
        let toml = r#"
            [message]
            variables = ["A", 3, 2.5, true]
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.message.variables,
            [
                VariableValue::Text("A".to_string()),
                VariableValue::Integer(3),
                VariableValue::Float(2.5),
                VariableValue::Boolean(true),
            ]
        );
    }

    #[test]
    fn variable_values_convert_to_text() {
        let values = [
            VariableValue::Text("A".to_string()),
            VariableValue::Integer(3),
            VariableValue::Float(2.5),
            VariableValue::Boolean(false),
        ];

        let texts: Vec<String> = values
            .iter()
            .map(|v| TemplateVariable::from(v).into_string())
            .collect();

        assert_eq!(texts, ["A", "3", "2.5", "false"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let toml = r#"
            [api]
            url = "https://example.com"
            retries = 3
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        assert!(TomlConfig::parse("[api").is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        // Everything is commented out
        assert!(config.api.url.is_none());
        assert!(config.api.access_token.is_none());
        assert!(config.message.recipient.is_none());
    }

    #[test]
    fn default_template_mentions_environment_variables() {
        let template = default_config_template();

        assert!(template.contains("WHATSAPP_API_URL"));
        assert!(template.contains("ACCESS_TOKEN"));
        assert!(template.contains("RECEIVER_PHONE"));
    }
}
