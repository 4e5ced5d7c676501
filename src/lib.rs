//

#[macro_use]
extern crate failure_derive;
extern crate failure;
#[macro_use]
extern crate log;

pub mod core;
pub mod delegator;
pub mod objects;

pub use crate::core::error::{Error, Result};
pub use crate::core::interp::Interp;
pub use crate::core::memory::Addr;
pub use crate::core::object::{Prop, Value};
pub use crate::delegator::{delegate, Delegator};
