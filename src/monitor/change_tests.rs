//! Tests for address state tracking and change classification.

use super::*;

fn v4(s: &str) -> IpAddr {
    IpAddr::V4(s.parse().unwrap())
}

fn v6(s: &str) -> IpAddr {
    IpAddr::V6(s.parse().unwrap())
}

mod classification {
    use super::*;

    #[test]
    fn display_matches_log_wording() {
        assert_eq!(Classification::Initial.to_string(), "initial address");
        assert_eq!(Classification::Changed.to_string(), "changed to");
        assert_eq!(Classification::Unchanged.to_string(), "remains");
    }

    #[test]
    fn only_initial_and_changed_notify() {
        assert!(Classification::Initial.should_notify());
        assert!(Classification::Changed.should_notify());
        assert!(!Classification::Unchanged.should_notify());
    }
}

mod address_state {
    use super::*;

    #[test]
    fn new_state_knows_nothing() {
        let state = AddressState::new();

        assert_eq!(state.v4(), None);
        assert_eq!(state.v6(), None);
        assert_eq!(state, AddressState::default());
    }

    #[test]
    fn first_observation_is_initial_and_stored() {
        let mut state = AddressState::new();

        let result = state.classify_and_update(v4("10.0.0.5"));

        assert_eq!(result, Classification::Initial);
        assert_eq!(state.get(AddressFamily::V4), Some(v4("10.0.0.5")));
    }

    #[test]
    fn different_address_is_changed_and_overwrites() {
        let mut state = AddressState::new();
        state.classify_and_update(v4("10.0.0.5"));

        let result = state.classify_and_update(v4("10.0.0.6"));

        assert_eq!(result, Classification::Changed);
        assert_eq!(state.v4(), Some("10.0.0.6".parse().unwrap()));
    }

    #[test]
    fn same_address_is_unchanged_and_state_untouched() {
        let mut state = AddressState::new();
        state.classify_and_update(v4("10.0.0.5"));
        let before = state.clone();

        let result = state.classify_and_update(v4("10.0.0.5"));

        assert_eq!(result, Classification::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn repeated_observation_stays_unchanged() {
        let mut state = AddressState::new();
        state.classify_and_update(v6("2001:db8::1"));

        for _ in 0..3 {
            assert_eq!(
                state.classify_and_update(v6("2001:db8::1")),
                Classification::Unchanged
            );
        }
    }

    #[test]
    fn change_back_to_earlier_address_is_changed() {
        let mut state = AddressState::new();
        state.classify_and_update(v4("10.0.0.5"));
        state.classify_and_update(v4("10.0.0.6"));

        assert_eq!(
            state.classify_and_update(v4("10.0.0.5")),
            Classification::Changed
        );
    }

    #[test]
    fn families_are_tracked_independently() {
        let mut state = AddressState::new();

        assert_eq!(
            state.classify_and_update(v4("10.0.0.5")),
            Classification::Initial
        );
        // An IPv6 address must not be compared against the IPv4 slot.
        assert_eq!(
            state.classify_and_update(v6("2001:db8::1")),
            Classification::Initial
        );
        assert_eq!(
            state.classify_and_update(v4("10.0.0.5")),
            Classification::Unchanged
        );
        assert_eq!(state.v4(), Some("10.0.0.5".parse().unwrap()));
        assert_eq!(state.v6(), Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn ipv6_change_leaves_ipv4_slot_alone() {
        let mut state = AddressState::new();
        state.classify_and_update(v4("192.168.1.10"));
        state.classify_and_update(v6("fe80::1"));

        state.classify_and_update(v6("fe80::2"));

        assert_eq!(state.get(AddressFamily::V4), Some(v4("192.168.1.10")));
        assert_eq!(state.get(AddressFamily::V6), Some(v6("fe80::2")));
    }

    #[test]
    fn unspecified_address_is_still_a_real_observation() {
        let mut state = AddressState::new();

        assert_eq!(
            state.classify_and_update(v4("0.0.0.0")),
            Classification::Initial
        );
        assert_eq!(
            state.classify_and_update(v4("0.0.0.0")),
            Classification::Unchanged
        );
    }
}

mod change_event {
    use super::*;

    #[test]
    fn new_creates_event_with_correct_fields() {
        let event = ChangeEvent::new("eth0", v4("10.0.0.5"), Classification::Initial);

        assert_eq!(event.interface, "eth0");
        assert_eq!(event.address, v4("10.0.0.5"));
        assert_eq!(event.classification, Classification::Initial);
        assert_eq!(event.family(), AddressFamily::V4);
    }

    #[test]
    fn display_formats_log_line() {
        let event = ChangeEvent::new("em0", v4("10.0.0.5"), Classification::Initial);
        assert_eq!(event.to_string(), "em0 initial address: 10.0.0.5");

        let event = ChangeEvent::new("em0", v6("2001:db8::1"), Classification::Unchanged);
        assert_eq!(event.to_string(), "em0 remains: 2001:db8::1");
    }

    #[test]
    fn should_notify_follows_classification() {
        assert!(ChangeEvent::new("eth0", v4("10.0.0.5"), Classification::Changed).should_notify());
        assert!(
            !ChangeEvent::new("eth0", v4("10.0.0.5"), Classification::Unchanged).should_notify()
        );
    }
}
