//

use std::sync::Arc;

use crossbeam::sync::{ShardedLock, ShardedLockReadGuard, ShardedLockWriteGuard};

use crate::core::error::{Error, Result};
use crate::core::interp::Interp;

/// An `Interp` reachable from several threads. Registration through the
/// write guard is serialized; which thread's definition of a name lands last
/// is not specified.
pub struct SharedInterp(Arc<ShardedLock<Interp>>);
pub type ReadInterp<'a> = ShardedLockReadGuard<'a, Interp>;
pub type WriteInterp<'a> = ShardedLockWriteGuard<'a, Interp>;

impl SharedInterp {
    pub fn new(interp: Interp) -> Self {
        SharedInterp(Arc::new(ShardedLock::new(interp)))
    }

    pub fn read(&self) -> Result<ReadInterp> {
        let Self(lock) = self;
        lock.try_read().map_err(|_| Error::AccessConflict)
    }

    pub fn write(&self) -> Result<WriteInterp> {
        let Self(lock) = self;
        lock.try_write().map_err(|_| Error::AccessConflict)
    }

    pub fn read_blocking(&self) -> Result<ReadInterp> {
        let Self(lock) = self;
        lock.read().map_err(|_| Error::AccessConflict)
    }

    pub fn write_blocking(&self) -> Result<WriteInterp> {
        let Self(lock) = self;
        lock.write().map_err(|_| Error::AccessConflict)
    }

    pub fn share(&self) -> SharedInterp {
        let Self(lock) = self;
        SharedInterp(Arc::clone(lock))
    }
}

pub fn with(shared: &SharedInterp) -> Result<ReadInterp> {
    shared.read()
}

pub fn with_mut(shared: &SharedInterp) -> Result<WriteInterp> {
    shared.write()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::Value;
    use crate::delegator::delegate;
    use crate::objects::derived::DerivedObject;
    use std::thread;

    #[test]
    fn conflicting_access_fails() {
        let shared = SharedInterp::new(Interp::new().unwrap());
        let _reading = with(&shared).unwrap();
        match with_mut(&shared) {
            Err(Error::AccessConflict) => {}
            _ => panic!("expected access conflict"),
        };
    }

    #[test]
    fn register_from_many_threads() {
        let shared = SharedInterp::new(Interp::new().unwrap());
        let proto = {
            let mut interp = with_mut(&shared).unwrap();
            let proto = interp.create_object(None).unwrap();
            let global = Value::Object(interp.global());
            interp.set(&global, "proto", Value::Object(proto)).unwrap();
            proto
        };

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.share();
                thread::spawn(move || {
                    let mut interp = shared.write_blocking().unwrap();
                    delegate(&mut interp, proto, "inner")
                        .access(&format!("field{}", i))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        {
            let interp = shared.read_blocking().unwrap();
            let mut keys = interp.own_keys(proto).unwrap();
            keys.sort();
            assert_eq!(keys, vec!["field0", "field1", "field2", "field3"]);
        }

        let mut interp = with_mut(&shared).unwrap();

        let inner = DerivedObject::new()
            .value("field2", "two")
            .insert(&mut interp)
            .unwrap();
        let instance = Value::Object(interp.create_object(Some(proto)).unwrap());
        interp.set(&instance, "inner", Value::Object(inner)).unwrap();
        assert_eq!(interp.get(&instance, "field2").unwrap(), Value::from("two"));
    }
}
