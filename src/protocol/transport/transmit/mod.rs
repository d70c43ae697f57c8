//! Channel transmit contract: hand one frame to a possibly busy controller.
//!
//! A `Busy` answer is retried immediately, without backoff, until the frame is
//! accepted or the caller's [`RetryPolicy`] runs out. Retries spin on the calling
//! context, so [`transmit`] belongs in the cooperative poll loop and never in an
//! interrupt handler. Once started, a retry loop runs to completion.
use embassy_time::Duration;

use crate::error::TransmitError;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    can_channel::{TxChannel, TxStatus},
    gateway_clock::GatewayClock,
};

/// Default bound on submission attempts for one frame.
pub const DEFAULT_TX_MAX_ATTEMPTS: u32 = 1000;

/// Default wall-clock bound for one frame (ms), half of the default poll cycle.
pub const DEFAULT_TX_TIMEOUT_MS: u64 = 5;

/// Bounds applied to the busy-retry loop. Whichever bound is reached first ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of `try_send` calls, first attempt included (at least 1).
    pub max_attempts: u32,
    /// Optional deadline measured from the first attempt.
    pub timeout: Option<Duration>,
}

impl RetryPolicy {
    /// Attempt-bounded policy without deadline.
    pub const fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            timeout: None,
        }
    }

    /// Add a wall-clock bound.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(DEFAULT_TX_MAX_ATTEMPTS)
            .with_timeout(Duration::from_millis(DEFAULT_TX_TIMEOUT_MS))
    }
}

/// Successful hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sent {
    /// Number of `try_send` calls it took.
    pub attempts: u32,
}

/// Submit `frame`, retrying while the channel reports `Busy`.
///
/// Returns [`TransmitError::ChannelSaturated`] once the policy is exhausted; the
/// caller is expected to skip this send and continue.
pub fn transmit<T, C>(
    tx: &mut T,
    frame: &CanFrame,
    policy: &RetryPolicy,
    clock: &C,
) -> Result<Sent, TransmitError>
where
    T: TxChannel + ?Sized,
    C: GatewayClock + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let deadline = policy
        .timeout
        .and_then(|timeout| clock.now().checked_add(timeout));
    let mut attempts = 0;

    loop {
        attempts += 1;
        if tx.try_send(frame) == TxStatus::Sent {
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "TX {=u16:#X} accepted after {} attempts",
                frame.id.as_raw(),
                attempts
            );
            return Ok(Sent { attempts });
        }

        let expired = deadline.is_some_and(|deadline| clock.now() >= deadline);
        if attempts >= max_attempts || expired {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "TX {=u16:#X} dropped: channel busy for {} attempts",
                frame.id.as_raw(),
                attempts
            );
            return Err(TransmitError::ChannelSaturated { attempts });
        }
    }
}
