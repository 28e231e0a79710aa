//! Explicit rounding direction for integer division.

/// Rounding direction for every division the pool performs.
///
/// Pool math rounds [`Down`](Rounding::Down) whenever the result is paid
/// out or minted, so rounding dust always stays with the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
