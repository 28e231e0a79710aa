//! Value types shared by the factory and the pairs.
//!
//! Every type is a newtype or small enum with a validated constructor, so
//! an invalid pair key or an unchecked overflow cannot be represented.

mod address;
mod amount;
mod basis_points;
mod fee_tier;
mod pair_key;
mod rounding;
mod shares;
mod swap_result;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use pair_key::PairKey;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_result::{SwapDirection, SwapResult};
