//! Confirmation lifecycle state machine.
//!
//! Two independent clocks feed this reducer: the status poller (server
//! authority) and the local expiry countdown (local authority). Their events
//! arrive in a non-deterministic relative order, so reconciliation is by
//! source priority rather than arrival order: a server-confirmed terminal
//! status always overrides a locally-inferred expiry, and a processed
//! terminal state is never regressed back to pending.

use crate::status::PaymentStatus;

/// Where the current status value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Authority {
    /// Initial value, or a non-terminal update.
    None,
    /// Inferred by the local countdown reaching zero.
    Local,
    /// Confirmed by a status query (or by the stored create-payment reply).
    Server,
}

/// Inputs the controller reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A status query completed and parsed to this value.
    Poll(PaymentStatus),
    /// A status query failed (network error or non-success response).
    PollFailed,
    /// The visible countdown reached zero.
    CountdownElapsed,
}

/// What the page should do once a terminal status has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Paid: clear the intent and continue down the funnel via the
    /// redirect resolver.
    Proceed,
    /// Expired or cancelled: clear the intent and, after a short delay,
    /// return to the funnel entry point.
    ReturnToEntry,
}

/// Emitted at most once per authority level when a terminal status is
/// processed. Carries everything the page needs for its one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub status: PaymentStatus,
    pub action: NextAction,
}

const fn action_for(status: PaymentStatus) -> NextAction {
    match status {
        PaymentStatus::Paid => NextAction::Proceed,
        _ => NextAction::ReturnToEntry,
    }
}

/// The single writer of the authoritative status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    status: PaymentStatus,
    /// Highest authority whose terminal outcome has already been handled.
    resolved: Option<Authority>,
}

impl Lifecycle {
    #[must_use]
    pub const fn new(initial: PaymentStatus) -> Self {
        Self {
            status: initial,
            resolved: None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        self.status
    }

    /// True once any terminal outcome has been handled; both timers must be
    /// stopped at this point.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.resolved.is_some()
    }

    /// True while the poller should keep scheduling queries.
    #[must_use]
    pub const fn wants_polling(&self) -> bool {
        matches!(self.status, PaymentStatus::Pending) && self.resolved.is_none()
    }

    /// Resolve an intent that was already terminal when loaded from storage
    /// (the create-payment reply itself reported a final status). Counts as
    /// server authority.
    pub fn resolve_initial(&mut self) -> Option<Resolution> {
        if self.status.is_terminal() && self.resolved.is_none() {
            self.resolved = Some(Authority::Server);
            Some(Resolution {
                status: self.status,
                action: action_for(self.status),
            })
        } else {
            None
        }
    }

    /// Apply one event and report the terminal resolution to act on, if any.
    ///
    /// Exactly-once discipline: each authority level resolves at most once,
    /// and server authority is final. The only double emission possible is
    /// the deliberate escalation from a locally-inferred `Expired` to a
    /// server-confirmed `Paid`, which must re-route the user to the paid
    /// path instead of the entry point.
    pub fn apply(&mut self, event: LifecycleEvent) -> Option<Resolution> {
        if self.resolved == Some(Authority::Server) {
            return None;
        }
        match event {
            LifecycleEvent::Poll(status) => self.apply_poll(status),
            LifecycleEvent::PollFailed => {
                if self.resolved.is_none() && self.status == PaymentStatus::Pending {
                    self.status = PaymentStatus::Unknown;
                }
                None
            }
            LifecycleEvent::CountdownElapsed => {
                // Only a still-pending payment expires locally; anything else
                // has already been superseded.
                if self.resolved.is_none() && self.status == PaymentStatus::Pending {
                    self.status = PaymentStatus::Expired;
                    self.resolved = Some(Authority::Local);
                    Some(Resolution {
                        status: PaymentStatus::Expired,
                        action: NextAction::ReturnToEntry,
                    })
                } else {
                    None
                }
            }
        }
    }

    fn apply_poll(&mut self, status: PaymentStatus) -> Option<Resolution> {
        if status.is_terminal() {
            let previously_resolved_locally = self.resolved == Some(Authority::Local);
            let changed = self.status != status;
            self.status = status;
            self.resolved = Some(Authority::Server);
            if previously_resolved_locally {
                // The local expiry was already handled. Re-resolve only when
                // the server outcome actually routes differently (paid after
                // a local expiry); a confirming expiry or cancellation would
                // just duplicate the navigation already performed.
                if changed && status == PaymentStatus::Paid {
                    return Some(Resolution {
                        status,
                        action: NextAction::Proceed,
                    });
                }
                return None;
            }
            return Some(Resolution {
                status,
                action: action_for(status),
            });
        }

        // Non-terminal poll result: keeps a pending payment pending and
        // supersedes an earlier `Unknown` on a later successful query.
        if self.resolved.is_none()
            && matches!(self.status, PaymentStatus::Pending | PaymentStatus::Unknown)
        {
            self.status = PaymentStatus::Pending;
        }
        None
    }
}
