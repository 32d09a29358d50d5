//! Domain types for OrderDispatch
//!
//! An [`Order`] is created pending by the scheduler and transitions exactly
//! once to prepared. [`Priority`] is the urgency key: lower is more urgent.

mod order;
mod priority;

pub use order::{Order, OrderId, OrderStatus};
pub use priority::{Priority, PriorityParseError};
