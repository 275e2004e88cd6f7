//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn unsupported_platform_displays_message() {
        let error = RunError::UnsupportedPlatform;
        assert_eq!(
            error.to_string(),
            "Interface address notifications are not supported on this platform"
        );
    }

    #[test]
    fn listener_creation_displays_source() {
        let error = RunError::ListenerCreation(ListenerError::Open(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        )));
        assert!(error.to_string().contains("Failed to create notification listener"));
    }

    #[test]
    fn monitor_error_is_source() {
        use std::error::Error;

        let error = RunError::Monitor(MonitorError::StreamTerminated);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("terminated"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::UnsupportedPlatform;
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("UnsupportedPlatform"));
    }
}

mod build_monitor {
    use super::*;
    use ipnotd::config::Cli;
    use ipnotd::network::FamilyFilter;

    fn config(args: &[&str]) -> ValidatedConfig {
        let mut full_args = vec!["ipnotd"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
    }

    #[test]
    fn uses_interface_and_family() {
        let monitor = build_monitor(&config(&["-a", "all", "em0"]));

        assert_eq!(monitor.interface(), "em0");
        assert_eq!(monitor.family_filter(), FamilyFilter::Both);
        assert!(monitor.state().v4().is_none());
    }

    #[test]
    fn no_notifier_without_script() {
        let monitor = build_monitor(&config(&["em0"]));

        assert!(monitor.notifier().is_none());
    }

    #[test]
    fn notifier_runs_configured_script() {
        let monitor = build_monitor(&config(&["-s", "/usr/local/bin/update-dns", "em0"]));

        assert_eq!(
            monitor.notifier().map(CommandNotifier::script),
            Some("/usr/local/bin/update-dns")
        );
    }
}

mod watch_loop {
    use super::*;
    use ipnotd::network::FamilyFilter;
    use std::net::IpAddr;

    fn observation(interface: &str, address: &str) -> Result<InterfaceAddress, MonitorError> {
        Ok(InterfaceAddress::new(
            interface,
            address.parse::<IpAddr>().unwrap(),
        ))
    }

    fn monitor() -> InterfaceMonitor<CommandNotifier> {
        InterfaceMonitor::new("em0", FamilyFilter::V4)
    }

    #[tokio::test]
    async fn stream_end_is_reported_as_monitor_error() {
        let mut monitor = monitor();
        let events = tokio_stream::iter(vec![
            observation("em0", "192.0.2.1"),
            observation("em1", "198.51.100.1"),
            observation("em0", "192.0.2.2"),
        ]);

        let result = watch(&mut monitor, events, std::future::pending()).await;

        assert!(matches!(
            result,
            Err(RunError::Monitor(MonitorError::StreamTerminated))
        ));
        assert_eq!(
            monitor.state().v4(),
            Some("192.0.2.2".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn stream_error_stops_before_later_events() {
        let mut monitor = monitor();
        let events = tokio_stream::iter(vec![
            observation("em0", "192.0.2.1"),
            Err(MonitorError::Listener(ListenerError::Stopped)),
            observation("em0", "192.0.2.9"),
        ]);

        let result = watch(&mut monitor, events, std::future::pending()).await;

        assert!(matches!(
            result,
            Err(RunError::Monitor(MonitorError::Listener(ListenerError::Stopped)))
        ));
        assert_eq!(
            monitor.state().v4(),
            Some("192.0.2.1".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn shutdown_wins_over_ready_events() {
        let mut monitor = monitor();
        let events = tokio_stream::iter(vec![observation("em0", "192.0.2.1")]);

        let result = watch(&mut monitor, events, std::future::ready(())).await;

        assert!(result.is_ok());
        assert!(monitor.state().v4().is_none());
    }
}
