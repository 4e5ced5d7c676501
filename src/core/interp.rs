//

use std::mem;

use crate::core::error::{Error, Result};
use crate::core::memory::{Addr, Memory};
use crate::core::object::{check_key, Object, Prop, Value};
use crate::objects::function::NativeFunction;

pub const DEFAULT_MAX_OBJECT_COUNT: usize = 1 << 16;
/// Nested native calls allowed before `call` fails with `CallStackExceeded`.
pub const MAX_CALL_DEPTH: usize = 128;

/// Object model the forwarding members run on.
///
/// Objects are reachable while the global object (directly or through
/// prototypes and member values), an in-flight call or a pin refers to them.
/// An address held only by Rust code may be reclaimed by any allocation that
/// finds the arena full; `pin` keeps one alive across such allocations.
pub struct Interp {
    mem: Memory,
    global: Addr,
    context_object: Value,
    // native calls in flight
    depth: usize,
}

impl Interp {
    pub fn new() -> Result<Self> {
        Self::with_max_object_count(DEFAULT_MAX_OBJECT_COUNT)
    }

    pub fn with_max_object_count(max_object_count: usize) -> Result<Self> {
        let mut mem = Memory::new(max_object_count);
        let global = mem.append_object(Object::new(None))?;
        mem.set_root(global)?;
        Ok(Interp {
            mem,
            global,
            context_object: Value::Undefined,
            depth: 0,
        })
    }

    pub fn global(&self) -> Addr {
        self.global
    }

    pub fn object_count(&self) -> usize {
        self.mem.object_count()
    }

    pub fn garbage_collect(&mut self) {
        self.mem.collect();
    }

    /// Keeps `addr` alive across collections until `unpin_to` drops it.
    pub fn pin(&mut self, addr: Addr) {
        self.mem.pin(addr);
    }

    pub fn pin_mark(&self) -> usize {
        self.mem.pin_mark()
    }

    pub fn unpin_to(&mut self, mark: usize) {
        self.mem.unpin_to(mark);
    }

    // <addr> = {}
    pub fn create_object(&mut self, proto: Option<Addr>) -> Result<Addr> {
        let mark = self.mem.pin_mark();
        if let Some(proto) = proto {
            self.mem.get_object(proto)?;
            self.mem.pin(proto);
        }
        let result = self.mem.append_object(Object::new(proto));
        self.mem.unpin_to(mark);
        result
    }

    // <value> = function
    pub fn create_function<F>(&mut self, run: F) -> Result<Value>
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.create_native(NativeFunction::new(run))
    }

    pub fn create_native(&mut self, function: NativeFunction) -> Result<Value> {
        let addr = self.mem.append_object(Object::with_call(function))?;
        Ok(Value::Object(addr))
    }

    pub fn prototype_of(&self, object: Addr) -> Result<Option<Addr>> {
        Ok(self.mem.get_object(object)?.proto())
    }

    pub fn set_prototype(&mut self, object: Addr, proto: Option<Addr>) -> Result<()> {
        let mut current = proto;
        while let Some(addr) = current {
            if addr == object {
                return Err(Error::CyclicPrototype(object));
            }
            current = self.mem.get_object(addr)?.proto();
        }
        self.mem.get_object_mut(object)?.set_proto(proto);
        Ok(())
    }

    pub fn is_callable(&self, value: &Value) -> bool {
        self.native_function(value).is_some()
    }

    // <value> = this
    pub fn context(&self) -> Value {
        self.context_object.clone()
    }

    // <value> = target.key
    pub fn get(&mut self, target: &Value, key: &str) -> Result<Value> {
        let object = expect_object(target, key)?;
        match self.lookup(object, key)? {
            Some(Prop::Data { value, .. }) => Ok(value),
            Some(Prop::Accessor {
                get: Some(getter), ..
            }) => self.call(&Value::Object(getter), target.clone(), &[]),
            Some(Prop::Accessor { get: None, .. }) | None => Ok(Value::Undefined),
        }
    }

    // target.key = <value>
    pub fn set(&mut self, target: &Value, key: &str, value: Value) -> Result<Value> {
        let object = expect_object(target, key)?;
        match self.lookup(object, key)? {
            Some(Prop::Accessor {
                set: Some(setter), ..
            }) => {
                self.call(&Value::Object(setter), target.clone(), &[value.clone()])?;
            }
            Some(Prop::Accessor { set: None, .. })
            | Some(Prop::Data {
                writable: false, ..
            }) => {
                trace!("ignored write to read-only member '{}'", key);
            }
            Some(Prop::Data { writable: true, .. }) | None => {
                check_key(key)?;
                self.mem
                    .get_object_mut(object)?
                    .define_own(key, Prop::data(value.clone(), true));
            }
        }
        Ok(value)
    }

    // <value> = func.call(this, ...args)
    pub fn call(&mut self, func: &Value, this: Value, args: &[Value]) -> Result<Value> {
        let run = self.native_function(func).ok_or_else(|| Error::NotCallable {
            name: func.to_string(),
        })?;
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Error::CallStackExceeded);
        }

        let mark = self.mem.pin_mark();
        for addr in func
            .as_object()
            .into_iter()
            .chain(this.as_object())
            .chain(args.iter().filter_map(Value::as_object))
        {
            self.mem.pin(addr);
        }
        let backup_context = mem::replace(&mut self.context_object, this);
        self.depth += 1;
        let result = run.run(self, args);
        self.depth -= 1;
        self.context_object = backup_context;
        self.mem.unpin_to(mark);
        result
    }

    // <value> = target.key(...args)
    pub fn call_method(&mut self, target: &Value, key: &str, args: &[Value]) -> Result<Value> {
        let func = self.get(target, key)?;
        if func.is_undefined() {
            return Err(Error::MissingMember {
                key: key.to_string(),
            });
        }
        if !self.is_callable(&func) {
            return Err(Error::NotCallable {
                name: key.to_string(),
            });
        }
        self.call(&func, target.clone(), args)
    }

    pub fn define_value(
        &mut self,
        object: Addr,
        key: &str,
        value: Value,
        writable: bool,
    ) -> Result<()> {
        check_key(key)?;
        self.mem
            .get_object_mut(object)?
            .define_own(key, Prop::data(value, writable));
        Ok(())
    }

    /// Installs the read half of an accessor, keeping the write half if
    /// `key` already is an own accessor.
    pub fn define_getter(&mut self, object: Addr, key: &str, getter: Value) -> Result<()> {
        check_key(key)?;
        let getter = self.expect_callable(&getter)?;
        let object = self.mem.get_object_mut(object)?;
        let set = object.get_own(key).and_then(Prop::setter);
        object.define_own(
            key,
            Prop::Accessor {
                get: Some(getter),
                set,
            },
        );
        Ok(())
    }

    /// Installs the write half of an accessor, keeping the read half if
    /// `key` already is an own accessor.
    pub fn define_setter(&mut self, object: Addr, key: &str, setter: Value) -> Result<()> {
        check_key(key)?;
        let setter = self.expect_callable(&setter)?;
        let object = self.mem.get_object_mut(object)?;
        let get = object.get_own(key).and_then(Prop::getter);
        object.define_own(
            key,
            Prop::Accessor {
                get,
                set: Some(setter),
            },
        );
        Ok(())
    }

    pub fn own_keys(&self, object: Addr) -> Result<Vec<String>> {
        Ok(self
            .mem
            .get_object(object)?
            .own_keys()
            .map(str::to_string)
            .collect())
    }

    pub fn own_property(&self, object: Addr, key: &str) -> Result<Option<Prop>> {
        Ok(self.mem.get_object(object)?.get_own(key).cloned())
    }

    fn lookup(&self, object: Addr, key: &str) -> Result<Option<Prop>> {
        let mut current = Some(object);
        while let Some(addr) = current {
            let object = self.mem.get_object(addr)?;
            if let Some(prop) = object.get_own(key) {
                return Ok(Some(prop.clone()));
            }
            current = object.proto();
        }
        Ok(None)
    }

    fn native_function(&self, value: &Value) -> Option<NativeFunction> {
        let addr = value.as_object()?;
        self.mem.get_object(addr).ok()?.call().cloned()
    }

    fn expect_callable(&self, value: &Value) -> Result<Addr> {
        match value.as_object() {
            Some(addr) if self.is_callable(value) => Ok(addr),
            _ => Err(Error::NotCallable {
                name: value.to_string(),
            }),
        }
    }
}

fn expect_object(target: &Value, key: &str) -> Result<Addr> {
    match target {
        Value::Object(addr) => Ok(*addr),
        absent if absent.is_absent() => Err(Error::MissingTarget {
            key: key.to_string(),
            found: absent.type_name(),
        }),
        other => Err(Error::NotAnObject {
            found: other.type_name(),
        }),
    }
}
