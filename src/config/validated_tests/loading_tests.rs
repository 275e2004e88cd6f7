//! Tests for configuration loading and required fields.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, tempdir};

use crate::network::FamilyFilter;

use super::*;

mod required_fields {
    use super::*;

    #[test]
    fn missing_interface_returns_error() {
        let cli = cli(&["-a", "6"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "interface",
                ..
            })
        ));
    }

    #[test]
    fn interface_from_cli_uses_defaults() {
        let cli = cli(&["em0"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.interface, "em0");
        assert_eq!(config.family_filter, FamilyFilter::V4);
        assert!(config.check_on_start);
        assert!(config.script.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn interface_from_toml() {
        let cli = cli(&[]);
        let toml = toml(
            r#"
            [monitor]
            interface = "wlan0"
            address_family = "6"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.interface, "wlan0");
        assert_eq!(config.family_filter, FamilyFilter::V6);
    }
}

mod config_load {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [monitor]
            interface = "em1"
            address_family = "all"

            [notify]
            script = "/usr/local/bin/update-dns"
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.interface, "em1");
        assert_eq!(config.family_filter, FamilyFilter::Both);
        assert_eq!(config.script.as_deref(), Some("/usr/local/bin/update-dns"));
    }

    #[test]
    fn load_without_config_file() {
        let cli = cli(&["-a", "6", "-n", "em0"]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.interface, "em0");
        assert_eq!(config.family_filter, FamilyFilter::V6);
        assert!(!config.check_on_start);
    }

    #[test]
    fn load_nonexistent_config_file_returns_error() {
        let cli = cli(&["--config", "nonexistent_file_12345.toml", "em0"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod write_config {
    use super::super::super::validated::write_default_config;
    use super::*;

    #[test]
    fn write_default_config_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test-config.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[monitor]"));
        assert!(content.contains("[notify]"));
    }

    #[test]
    fn written_template_needs_only_an_interface() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotd.toml");
        write_default_config(&path).unwrap();

        let cli = cli(&["--config", path.to_str().unwrap(), "em0"]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.interface, "em0");
        assert_eq!(config.family_filter, FamilyFilter::V4);
        assert!(config.check_on_start);
        assert!(config.script.is_none());
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        let path = Path::new("/nonexistent_dir_12345/config.toml");
        let result = write_default_config(path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_without_script() {
        let config = ValidatedConfig::from_raw(&cli(&["em0"]), None).unwrap();

        assert_eq!(
            config.to_string(),
            "Config { interface: em0, address_family: IPv4, check_on_start: true, script: none }"
        );
    }

    #[test]
    fn display_with_script() {
        let config =
            ValidatedConfig::from_raw(&cli(&["-a", "all", "-n", "-s", "/bin/hook", "em0"]), None)
                .unwrap();

        assert_eq!(
            config.to_string(),
            "Config { interface: em0, address_family: Both, check_on_start: false, script: /bin/hook }"
        );
    }
}
