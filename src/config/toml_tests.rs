//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [monitor]
            interface = "em0"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.monitor.interface.as_deref(), Some("em0"));
        assert!(config.monitor.address_family.is_none());
        assert!(config.monitor.check_on_start.is_none());
        assert!(config.notify.script.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [monitor]
            interface = "wlan0"
            address_family = "all"
            check_on_start = false

            [notify]
            script = "~/bin/update-dns"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.monitor.interface.as_deref(), Some("wlan0"));
        assert_eq!(config.monitor.address_family.as_deref(), Some("all"));
        assert_eq!(config.monitor.check_on_start, Some(false));
        assert_eq!(config.notify.script.as_deref(), Some("~/bin/update-dns"));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.monitor.interface.is_none());
        assert!(config.notify.script.is_none());
    }

    #[test]
    fn parse_notify_only() {
        let toml = r#"
            [notify]
            script = "/usr/local/bin/hook"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert!(config.monitor.interface.is_none());
        assert_eq!(config.notify.script.as_deref(), Some("/usr/local/bin/hook"));
    }
}

mod errors {
    use super::*;
    use crate::config::ConfigError;
    use std::path::Path;

    #[test]
    fn invalid_toml_returns_error() {
        let result = TomlConfig::parse("this is not valid toml [[[");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_monitor_field_is_rejected() {
        let toml = r"
            [monitor]
            poll_interval = 60
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let toml = r#"
            [monitor]
            check_on_start = "yes"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn load_missing_file_returns_file_read() {
        let result = TomlConfig::load(Path::new("/nonexistent/ipnotd/config.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let template = default_config_template();
        let config = TomlConfig::parse(&template).unwrap();

        assert!(config.monitor.interface.is_none());
        assert_eq!(config.monitor.address_family.as_deref(), Some("4"));
        assert_eq!(config.monitor.check_on_start, Some(true));
        assert!(config.notify.script.is_none());
    }

    #[test]
    fn default_template_documents_every_field() {
        let template = default_config_template();

        for key in ["interface", "address_family", "check_on_start", "script"] {
            assert!(template.contains(key), "template missing {key}");
        }
    }
}
