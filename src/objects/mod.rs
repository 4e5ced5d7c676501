//

pub mod derived;
pub mod function;
