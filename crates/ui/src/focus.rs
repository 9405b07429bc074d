//! Keyboard focus arbitration between the address field and the browser.
//!
//! Both widgets react to gaining focus by asking for it programmatically,
//! and every programmatic request raises another focus notification. The
//! arbiter records which widget is meant to hold focus and only issues a
//! transfer when that owner actually changes, which ends the chain after a
//! single round.

use tracing::{debug, trace};

/// Widget intended to hold keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusOwner {
    AddressField,
    #[default]
    BrowserView,
}

/// Focus calls issued by the arbiter.
pub trait FocusSink {
    /// Drop the toolkit-wide focus owner.
    fn clear_global_focus_owner(&mut self);

    /// Ask the toolkit to focus the address field.
    fn focus_address_field(&mut self);

    /// Ask the browser to take focus.
    fn focus_browser(&mut self);
}

/// Two-state focus coordinator.
#[derive(Clone, Debug, Default)]
pub struct FocusArbiter {
    owner: FocusOwner,
}

impl FocusArbiter {
    /// Starts with the browser view as owner.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> FocusOwner {
        self.owner
    }

    /// The address field gained focus.
    ///
    /// Returns whether a transfer was issued.
    pub fn on_address_field_focus_gained(&mut self, sink: &mut dyn FocusSink) -> bool {
        if self.owner == FocusOwner::AddressField {
            trace!("Address field already owns focus");
            return false;
        }
        self.owner = FocusOwner::AddressField;
        debug!("Focus moved to address field");
        sink.clear_global_focus_owner();
        sink.focus_address_field();
        true
    }

    /// The browser received focus.
    ///
    /// Returns whether a transfer was issued.
    pub fn on_browser_got_focus(&mut self, sink: &mut dyn FocusSink) -> bool {
        if self.owner == FocusOwner::BrowserView {
            trace!("Browser already owns focus");
            return false;
        }
        self.owner = FocusOwner::BrowserView;
        debug!("Focus moved to browser");
        sink.clear_global_focus_owner();
        sink.focus_browser();
        true
    }

    /// The browser is handing focus back to the toolkit.
    ///
    /// Only the bookkeeping changes; the toolkit moves focus itself, and
    /// the global focus owner is left as is.
    pub fn on_browser_take_focus(&mut self, forward: bool) {
        debug!(forward, "Browser released focus");
        self.owner = FocusOwner::AddressField;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Call {
        ClearGlobal,
        FocusAddress,
        FocusBrowser,
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
    }

    impl FocusSink for RecordingSink {
        fn clear_global_focus_owner(&mut self) {
            self.calls.push(Call::ClearGlobal);
        }

        fn focus_address_field(&mut self) {
            self.calls.push(Call::FocusAddress);
        }

        fn focus_browser(&mut self) {
            self.calls.push(Call::FocusBrowser);
        }
    }

    #[test]
    fn test_initial_owner_is_browser() {
        assert_eq!(FocusArbiter::new().owner(), FocusOwner::BrowserView);
    }

    #[test]
    fn test_address_focus_transfers_once() {
        let mut arbiter = FocusArbiter::new();
        let mut sink = RecordingSink::default();

        assert!(arbiter.on_address_field_focus_gained(&mut sink));
        assert_eq!(arbiter.owner(), FocusOwner::AddressField);
        assert_eq!(sink.calls, vec![Call::ClearGlobal, Call::FocusAddress]);
    }

    #[test]
    fn test_address_focus_is_noop_when_owner() {
        let mut arbiter = FocusArbiter::new();
        let mut sink = RecordingSink::default();
        arbiter.on_address_field_focus_gained(&mut sink);
        sink.calls.clear();

        assert!(!arbiter.on_address_field_focus_gained(&mut sink));
        assert!(sink.calls.is_empty());
        assert_eq!(arbiter.owner(), FocusOwner::AddressField);
    }

    #[test]
    fn test_browser_focus_is_noop_when_owner() {
        let mut arbiter = FocusArbiter::new();
        let mut sink = RecordingSink::default();

        assert!(!arbiter.on_browser_got_focus(&mut sink));
        assert!(sink.calls.is_empty());
        assert_eq!(arbiter.owner(), FocusOwner::BrowserView);
    }

    #[test]
    fn test_browser_focus_transfers_once() {
        let mut arbiter = FocusArbiter::new();
        let mut sink = RecordingSink::default();
        arbiter.on_browser_take_focus(true);

        assert!(arbiter.on_browser_got_focus(&mut sink));
        assert_eq!(arbiter.owner(), FocusOwner::BrowserView);
        assert_eq!(sink.calls, vec![Call::ClearGlobal, Call::FocusBrowser]);
    }

    #[test]
    fn test_take_focus_issues_no_calls() {
        for forward in [true, false] {
            let mut arbiter = FocusArbiter::new();
            let mut sink = RecordingSink::default();

            arbiter.on_browser_take_focus(forward);
            assert_eq!(arbiter.owner(), FocusOwner::AddressField);

            // The follow-up focus-gained from the toolkit is absorbed.
            assert!(!arbiter.on_address_field_focus_gained(&mut sink));
            assert!(sink.calls.is_empty());
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut arbiter = FocusArbiter::new();
        let mut sink = RecordingSink::default();

        arbiter.on_address_field_focus_gained(&mut sink);
        assert_eq!(arbiter.owner(), FocusOwner::AddressField);
        assert_eq!(sink.calls, vec![Call::ClearGlobal, Call::FocusAddress]);

        arbiter.on_browser_got_focus(&mut sink);
        assert_eq!(arbiter.owner(), FocusOwner::BrowserView);
        assert_eq!(
            sink.calls,
            vec![
                Call::ClearGlobal,
                Call::FocusAddress,
                Call::ClearGlobal,
                Call::FocusBrowser,
            ]
        );

        arbiter.on_browser_got_focus(&mut sink);
        assert_eq!(sink.calls.len(), 4);
    }

    #[derive(Clone, Copy, Debug)]
    enum Notification {
        AddressGained,
        BrowserGot,
        BrowserTake { forward: bool },
    }

    fn notification_strategy() -> impl Strategy<Value = Notification> {
        prop_oneof![
            Just(Notification::AddressGained),
            Just(Notification::BrowserGot),
            any::<bool>().prop_map(|forward| Notification::BrowserTake { forward }),
        ]
    }

    proptest! {
        /// The owner always matches the last notification, and transfers
        /// happen only on a change of owner.
        #[test]
        fn test_owner_follows_last_notification(
            sequence in prop::collection::vec(notification_strategy(), 0..64)
        ) {
            let mut arbiter = FocusArbiter::new();
            let mut sink = RecordingSink::default();

            for notification in sequence {
                let previous = arbiter.owner();
                let before = sink.calls.len();

                let expected = match notification {
                    Notification::AddressGained => {
                        let acted = arbiter.on_address_field_focus_gained(&mut sink);
                        prop_assert_eq!(acted, previous != FocusOwner::AddressField);
                        FocusOwner::AddressField
                    }
                    Notification::BrowserGot => {
                        let acted = arbiter.on_browser_got_focus(&mut sink);
                        prop_assert_eq!(acted, previous != FocusOwner::BrowserView);
                        FocusOwner::BrowserView
                    }
                    Notification::BrowserTake { forward } => {
                        arbiter.on_browser_take_focus(forward);
                        FocusOwner::AddressField
                    }
                };
                prop_assert_eq!(arbiter.owner(), expected);

                let issued = &sink.calls[before..];
                match notification {
                    Notification::BrowserTake { .. } => prop_assert!(issued.is_empty()),
                    _ if previous == expected => prop_assert!(issued.is_empty()),
                    Notification::AddressGained => {
                        prop_assert_eq!(issued, &[Call::ClearGlobal, Call::FocusAddress][..])
                    }
                    Notification::BrowserGot => {
                        prop_assert_eq!(issued, &[Call::ClearGlobal, Call::FocusBrowser][..])
                    }
                }
            }
        }
    }
}
