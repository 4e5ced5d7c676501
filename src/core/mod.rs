//

pub mod error;
pub mod interp;
pub mod memory;
pub mod object;
pub mod shared_interp;
