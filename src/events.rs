//! Notifications emitted by the factory and the pairs.
//!
//! Every committed state transition produces exactly one [`DexEvent`],
//! delivered to the [`EventSink`] the factory was built with.  Failed
//! operations emit nothing.

use std::sync::Mutex;

use serde::Serialize;

use crate::domain::{Address, Amount, Shares, SwapDirection};

/// A committed factory or pair state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DexEvent {
    /// A new pair was registered.
    PairCreated {
        /// Lower token of the canonical key.
        token0: Address,
        /// Higher token of the canonical key.
        token1: Address,
        /// Address of the new pair.
        pair: Address,
        /// Number of registered pairs including this one.
        pair_count: usize,
    },
    /// Liquidity was deposited.
    Mint {
        /// Pair that received the deposit.
        pair: Address,
        /// Depositor credited with the shares.
        provider: Address,
        /// token0 pulled from the provider.
        amount0: Amount,
        /// token1 pulled from the provider.
        amount1: Amount,
        /// Shares minted.
        shares: Shares,
    },
    /// Liquidity was withdrawn.
    Burn {
        /// Pair that paid out.
        pair: Address,
        /// Holder whose shares were burned.
        provider: Address,
        /// token0 paid out.
        amount0: Amount,
        /// token1 paid out.
        amount1: Amount,
        /// Shares burned.
        shares: Shares,
    },
    /// A trade was executed.
    Swap {
        /// Pair traded against.
        pair: Address,
        /// Account that paid the input and received the output.
        trader: Address,
        /// Which token was sold.
        direction: SwapDirection,
        /// Raw input, fee included.
        amount_in: Amount,
        /// Output paid to the trader.
        amount_out: Amount,
    },
    /// Liquidity shares changed hands.
    SharesTransferred {
        /// Pair whose shares moved.
        pair: Address,
        /// Debited holder.
        from: Address,
        /// Credited holder.
        to: Address,
        /// Quantity moved.
        shares: Shares,
    },
    /// A share allowance was set.
    SharesApproved {
        /// Pair whose shares are delegated.
        pair: Address,
        /// Holder granting the allowance.
        owner: Address,
        /// Account allowed to move the shares.
        spender: Address,
        /// New allowance.
        shares: Shares,
    },
}

impl DexEvent {
    /// Returns the snake_case event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PairCreated { .. } => "pair_created",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::Swap { .. } => "swap",
            Self::SharesTransferred { .. } => "shares_transferred",
            Self::SharesApproved { .. } => "shares_approved",
        }
    }
}

/// Receiver of [`DexEvent`]s.
///
/// Called while the emitting pair or registry is still locked, so an
/// implementation must not call back into the handle or factory that
/// emitted the event.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn emit(&self, event: DexEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: DexEvent) {}
}

/// In-memory sink that keeps events in emission order.
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::{Address, Shares};
/// use minimal_dex::events::{DexEvent, EventLog, EventSink};
///
/// let log = EventLog::new();
/// log.emit(DexEvent::SharesApproved {
///     pair: Address::from_bytes([1u8; 32]),
///     owner: Address::from_bytes([2u8; 32]),
///     spender: Address::from_bytes([3u8; 32]),
///     shares: Shares::new(5),
/// });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<DexEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<DexEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&self) -> Vec<DexEvent> {
        core::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Returns the most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<DexEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: DexEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
