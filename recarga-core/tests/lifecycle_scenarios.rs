//! End-to-end confirmation scenarios driven through the public API, the way
//! the web layer drives it: a poll schedule, a once-per-second countdown and
//! the reconciling lifecycle in the middle.

use recarga_core::{
    EXPIRY_WINDOW_SECS, Lifecycle, LifecycleEvent, NextAction, PaymentStatus, PollSchedule,
    Resolution, seconds_remaining,
};

const T0: i64 = 1_700_000_000_000;

/// Drive the countdown from `from_s` to `to_s` (exclusive), feeding the
/// elapsed event once the remaining seconds hit zero. Returns any resolution
/// the countdown produced.
fn tick_countdown(lc: &mut Lifecycle, from_s: i64, to_s: i64) -> Option<Resolution> {
    for tick in from_s..to_s {
        let now = T0 + tick * 1_000;
        if seconds_remaining(T0, now) == 0 {
            if let Some(res) = lc.apply(LifecycleEvent::CountdownElapsed) {
                return Some(res);
            }
        }
    }
    None
}

#[test]
fn paid_on_second_poll_navigates_exactly_once() {
    // externalId "ff-123", created at T0, window 900s. Polls at t=5s
    // ("pending") and t=20s ("paid").
    let mut lc = Lifecycle::new(PaymentStatus::Pending);
    let mut navigations = 0;

    assert!(tick_countdown(&mut lc, 0, 5).is_none());
    assert_eq!(lc.apply(LifecycleEvent::Poll(PaymentStatus::parse("pending"))), None);
    assert!(lc.wants_polling());

    assert!(tick_countdown(&mut lc, 5, 20).is_none());
    if let Some(res) = lc.apply(LifecycleEvent::Poll(PaymentStatus::parse("PAID"))) {
        assert_eq!(res.status, PaymentStatus::Paid);
        assert_eq!(res.action, NextAction::Proceed);
        navigations += 1;
    }

    // Stray late events change nothing.
    assert!(tick_countdown(&mut lc, 20, EXPIRY_WINDOW_SECS + 10).is_none());
    assert_eq!(lc.apply(LifecycleEvent::Poll(PaymentStatus::Paid)), None);

    assert_eq!(navigations, 1);
    assert_eq!(lc.status(), PaymentStatus::Paid);
    assert!(!lc.wants_polling());
}

#[test]
fn all_pending_polls_end_in_local_expiry_at_the_window() {
    let mut lc = Lifecycle::new(PaymentStatus::Pending);
    let mut schedule = PollSchedule::new();
    let mut elapsed_ms: i64 = 0;
    let mut resolution = None;

    // Interleave: run every scheduled poll (all "pending") against the
    // countdown until the window closes.
    while let Some(delay) = schedule.next_delay() {
        let from_s = elapsed_ms / 1_000;
        elapsed_ms += i64::from(delay);
        let to_s = elapsed_ms / 1_000;
        if let Some(res) = tick_countdown(&mut lc, from_s, to_s + 1) {
            resolution = Some(res);
            break;
        }
        assert_eq!(lc.apply(LifecycleEvent::Poll(PaymentStatus::Pending)), None);
    }

    let resolution = resolution.unwrap_or_else(|| {
        // Schedule exhausted before the window: keep ticking to expiry.
        let from_s = elapsed_ms / 1_000;
        tick_countdown(&mut lc, from_s, EXPIRY_WINDOW_SECS + 2)
            .expect("countdown must expire the payment")
    });

    assert_eq!(resolution.status, PaymentStatus::Expired);
    assert_eq!(resolution.action, NextAction::ReturnToEntry);
    assert_eq!(lc.status(), PaymentStatus::Expired);
}

#[test]
fn http_failure_on_first_poll_halts_polling_but_not_the_countdown() {
    let mut lc = Lifecycle::new(PaymentStatus::Pending);
    let mut schedule = PollSchedule::new();

    assert!(schedule.next_delay().is_some());
    // First poll comes back as HTTP 500.
    assert_eq!(lc.apply(LifecycleEvent::PollFailed), None);
    assert_eq!(lc.status(), PaymentStatus::Unknown);
    assert!(!lc.wants_polling());
    assert!(!lc.is_settled());

    // The countdown keeps running and remains meaningful to the user, but
    // its zero crossing no longer flips the status.
    let near_end = T0 + (EXPIRY_WINDOW_SECS - 1) * 1_000;
    assert_eq!(seconds_remaining(T0, near_end), 1);
    assert_eq!(tick_countdown(&mut lc, 0, EXPIRY_WINDOW_SECS + 2), None);
    assert_eq!(lc.status(), PaymentStatus::Unknown);
}

#[test]
fn poller_stops_after_the_attempt_ceiling() {
    let mut lc = Lifecycle::new(PaymentStatus::Pending);
    let mut schedule = PollSchedule::new();
    let mut queries = 0;

    while lc.wants_polling() {
        let Some(_delay) = schedule.next_delay() else {
            break;
        };
        queries += 1;
        lc.apply(LifecycleEvent::Poll(PaymentStatus::Pending));
    }

    assert_eq!(queries, 30);
    assert_eq!(schedule.next_delay(), None);
    // Status never left pending; only the countdown can end this lifecycle.
    assert_eq!(lc.status(), PaymentStatus::Pending);
}

#[test]
fn expiry_then_late_paid_reroutes_to_the_paid_path() {
    let mut lc = Lifecycle::new(PaymentStatus::Pending);

    let expiry = tick_countdown(&mut lc, 0, EXPIRY_WINDOW_SECS + 1)
        .expect("local expiry fires at the window edge");
    assert_eq!(expiry.action, NextAction::ReturnToEntry);

    // A poll that was in flight when the countdown fired resolves "paid":
    // server authority wins and the user goes down the paid path instead.
    let paid = lc
        .apply(LifecycleEvent::Poll(PaymentStatus::Paid))
        .expect("server-confirmed paid overrides local expiry");
    assert_eq!(paid.action, NextAction::Proceed);
    assert_eq!(lc.status(), PaymentStatus::Paid);

    // But the escalation happens at most once.
    assert_eq!(lc.apply(LifecycleEvent::Poll(PaymentStatus::Paid)), None);
}
