//! Configuration structs for the factory and the pairs it creates.
//!
//! Both derive `serde` traits so they can be loaded from any format;
//! call `validate()` on deserialized values before handing them to the
//! [`Factory`](crate::factory::Factory).

mod factory;
mod pair;

pub use factory::FactoryConfig;
pub use pair::PairConfig;
