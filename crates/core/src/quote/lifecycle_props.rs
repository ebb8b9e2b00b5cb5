//! Property-based tests for the quote state machine.

use proptest::prelude::*;

use crate::quote::error::QuoteError;
use crate::quote::lifecycle::QuoteLifecycle;
use crate::quote::types::QuoteStatus;

fn arb_status() -> impl Strategy<Value = QuoteStatus> {
    prop_oneof![
        Just(QuoteStatus::Draft),
        Just(QuoteStatus::Sent),
        Just(QuoteStatus::Approved),
        Just(QuoteStatus::Rejected),
        Just(QuoteStatus::Expired),
    ]
}

/// The transition table, written out once for cross-checking.
fn is_allowed(from: QuoteStatus, to: QuoteStatus) -> bool {
    matches!(
        (from, to),
        (QuoteStatus::Draft, QuoteStatus::Sent)
            | (QuoteStatus::Sent, QuoteStatus::Approved | QuoteStatus::Rejected)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_transition_matches_table(from in arb_status(), to in arb_status()) {
        let result = QuoteLifecycle::transition(from, to);
        prop_assert_eq!(result.is_ok(), is_allowed(from, to));
    }

    #[test]
    fn prop_rejections_carry_the_pair(from in arb_status(), to in arb_status()) {
        if let Err(QuoteError::InvalidTransition { from: f, to: t }) =
            QuoteLifecycle::transition(from, to)
        {
            prop_assert_eq!(f, from);
            prop_assert_eq!(t, to);
        }
    }

    #[test]
    fn prop_terminal_statuses_accept_nothing(to in arb_status()) {
        for terminal in [QuoteStatus::Approved, QuoteStatus::Rejected, QuoteStatus::Expired] {
            prop_assert!(QuoteLifecycle::transition(terminal, to).is_err());
        }
    }
}
