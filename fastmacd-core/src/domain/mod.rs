//! Domain types for the decision core.

pub mod candle;
pub mod position;

pub use candle::Candle;
pub use position::{OpenPosition, PositionSide};
