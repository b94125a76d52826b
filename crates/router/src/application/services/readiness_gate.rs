//! Connection readiness gate
//!
//! Routes that land on live content must wait for the events socket. The gate
//! turns the connection and session-loading streams into one-shot waits.
//!
//! Waits observe the current value first, then every change. A condition that
//! held only between two observations is missed; nothing is buffered.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use sportsbook_domain::ConnectionState;

use crate::application::error::GateError;

/// Bound on a single wait. Every call site chooses one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[derive(Clone, Debug)]
pub struct ConnectionReadinessGate {
    connection: watch::Receiver<ConnectionState>,
    session_loading: watch::Receiver<bool>,
    cancel_token: CancellationToken,
}

impl ConnectionReadinessGate {
    pub fn new(
        connection: watch::Receiver<ConnectionState>,
        session_loading: watch::Receiver<bool>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            connection,
            session_loading,
            cancel_token,
        }
    }

    /// True when the socket is connected and no session is loading.
    pub fn is_ready(&self) -> bool {
        self.connection.borrow().is_connected() && !*self.session_loading.borrow()
    }

    /// Resolve the first time `connected && !session_loading` holds.
    pub async fn await_ready(&self, policy: WaitPolicy) -> Result<(), GateError> {
        let mut connection = self.connection.clone();
        let mut session_loading = self.session_loading.clone();

        self.bounded(policy, async move {
            loop {
                let ready = connection.borrow_and_update().is_connected()
                    && !*session_loading.borrow_and_update();
                if ready {
                    return Ok(());
                }

                tokio::select! {
                    changed = connection.changed() => {
                        changed.map_err(|_| GateError::SourceClosed)?;
                    }
                    changed = session_loading.changed() => {
                        changed.map_err(|_| GateError::SourceClosed)?;
                    }
                }
            }
        })
        .await
    }

    /// Resolve the first time the socket reports `Connected`.
    pub async fn await_connected(&self, policy: WaitPolicy) -> Result<(), GateError> {
        let mut connection = self.connection.clone();

        self.bounded(policy, async move {
            connection
                .wait_for(|state| state.is_connected())
                .await
                .map(|_| ())
                .map_err(|_| GateError::SourceClosed)
        })
        .await
    }

    async fn bounded<F>(&self, policy: WaitPolicy, condition: F) -> Result<(), GateError>
    where
        F: Future<Output = Result<(), GateError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => Err(GateError::Cancelled),
            result = tokio::time::timeout(policy.timeout, condition) => {
                result.map_err(|_| GateError::TimedOut(policy.timeout))?
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    const POLICY: WaitPolicy = WaitPolicy {
        timeout: Duration::from_secs(30),
    };

    struct Harness {
        connection: watch::Sender<ConnectionState>,
        loading: watch::Sender<bool>,
        cancel_token: CancellationToken,
        gate: ConnectionReadinessGate,
    }

    fn harness(initial: ConnectionState, loading: bool) -> Harness {
        let (connection, connection_rx) = watch::channel(initial);
        let (loading, loading_rx) = watch::channel(loading);
        let cancel_token = CancellationToken::new();
        let gate = ConnectionReadinessGate::new(connection_rx, loading_rx, cancel_token.clone());
        Harness {
            connection,
            loading,
            cancel_token,
            gate,
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_immediately_when_condition_already_holds() {
        let h = harness(ConnectionState::Connected, false);
        assert!(h.gate.is_ready());
        assert_eq!(h.gate.await_ready(POLICY).await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_only_after_combined_condition() {
        let h = harness(ConnectionState::Connecting, true);
        let resolved = Arc::new(AtomicBool::new(false));

        let gate = h.gate.clone();
        let flag = Arc::clone(&resolved);
        let waiter = tokio::spawn(async move {
            let result = gate.await_ready(POLICY).await;
            flag.store(true, Ordering::SeqCst);
            result
        });

        settle().await;
        assert!(!resolved.load(Ordering::SeqCst));

        h.loading.send_replace(false);
        settle().await;
        assert!(!resolved.load(Ordering::SeqCst));

        // Connected while a session loads is still not ready
        h.loading.send_replace(true);
        h.connection.send_replace(ConnectionState::Connected);
        settle().await;
        assert!(!resolved.load(Ordering::SeqCst));

        h.loading.send_replace(false);
        settle().await;
        assert!(resolved.load(Ordering::SeqCst));
        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_connected_ignores_session_loading() {
        let h = harness(ConnectionState::Disconnected, true);
        let gate = h.gate.clone();
        let waiter = tokio::spawn(async move { gate.await_connected(POLICY).await });

        h.connection.send_replace(ConnectionState::Connecting);
        settle().await;
        assert!(!waiter.is_finished());

        h.connection.send_replace(ConnectionState::Connected);
        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let h = harness(ConnectionState::Connecting, false);
        let policy = WaitPolicy::new(Duration::from_secs(5));

        let result = h.gate.await_ready(policy).await;
        assert_eq!(result, Err(GateError::TimedOut(Duration::from_secs(5))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_ends_pending_wait() {
        let h = harness(ConnectionState::Disconnected, false);
        let gate = h.gate.clone();
        let waiter = tokio::spawn(async move { gate.await_connected(POLICY).await });

        settle().await;
        h.cancel_token.cancel();
        assert_eq!(waiter.await.unwrap(), Err(GateError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_source_fails_wait() {
        let h = harness(ConnectionState::Disconnected, false);
        let gate = h.gate.clone();
        let waiter = tokio::spawn(async move { gate.await_connected(POLICY).await });

        settle().await;
        drop(h.connection);
        assert_eq!(waiter.await.unwrap(), Err(GateError::SourceClosed));
    }
}
