//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::*;

    fn minimal_toml() -> &'static str {
        r#"
[registry]
endpoint = "http://localhost:8100"

[llm]
endpoint = "https://api.openai.com/v1"
api_key = "sk-test-key-1234"
"#
    }

    // ====== Default Value Tests ======

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_registry_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.course_collection, "course_site");
        assert_eq!(config.forum_collection, "forum_posts");
        assert_eq!(config.max_per_collection, 3);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_service_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.name, "Virtual TA");
        assert!(!config.course.is_empty());
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(minimal_toml()).unwrap();

        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 8000);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.llm_model(), "gpt-4-turbo");
        assert_eq!(config.vision_model(), "gpt-4o");
        assert_eq!(config.max_per_collection(), 3);
        assert_eq!(config.corpus.course_path, "course_content.json");
        assert_eq!(config.corpus.forum_path, "forum_posts.json");
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let toml_str = r#"
[server]
host = "127.0.0.1"
port = 9000

[logging]
level = "debug"
backtrace = false

[registry]
endpoint = "http://registry:8100"
max_per_collection = 5

[llm]
endpoint = "https://api.openai.com/v1"
api_key = "sk-test"
model = "gpt-4o-mini"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.max_per_collection(), 5);
        assert_eq!(config.llm_model(), "gpt-4o-mini");
    }

    #[test]
    fn test_missing_registry_section_fails() {
        let toml_str = r#"
[llm]
endpoint = "https://api.openai.com/v1"
api_key = "sk-test"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(minimal_toml().as_bytes()).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.registry_endpoint(), "http://localhost:8100");
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("/nonexistent/config.toml");
        assert!(result.is_err());
    }

    // ====== Validation Tests ======

    #[test]
    fn test_validate_ok() {
        let config: AppConfig = toml::from_str(minimal_toml()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_registry_endpoint() {
        let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
        config.registry.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
        config.llm.api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_retrieval_limit() {
        let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
        config.registry.max_per_collection = 0;
        assert!(config.validate().is_err());
    }

    // ====== Display Tests ======

    #[test]
    fn test_masked_api_key() {
        let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(config.masked_api_key(), "****1234");

        config.llm.api_key = String::new();
        assert_eq!(config.masked_api_key(), "(not set)");

        config.llm.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "****");
    }

    // ====== AppConfig Accessor Tests ======

    #[test]
    fn test_app_config_default_accessors() {
        let config = AppConfig::default();

        assert_eq!(config.course_collection(), "course_site");
        assert_eq!(config.forum_collection(), "forum_posts");
        assert_eq!(config.service_name(), "Virtual TA");
        assert!(!config.course_name().is_empty());
        assert!(config.llm_endpoint().starts_with("https://"));
    }
}
