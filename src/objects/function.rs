//

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::interp::Interp;
use crate::core::object::Value;

type Run = dyn Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync;

/// Call behavior of a callable object. The receiver is read from
/// `Interp::context` while the function runs.
#[derive(Clone)]
pub struct NativeFunction(Arc<Run>);

impl NativeFunction {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        NativeFunction(Arc::new(run))
    }

    pub fn run(&self, interp: &mut Interp, args: &[Value]) -> Result<Value> {
        let Self(run) = self;
        run(interp, args)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "NativeFunction")
    }
}
