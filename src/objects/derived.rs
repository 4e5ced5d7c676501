//

use crate::core::error::Result;
use crate::core::interp::Interp;
use crate::core::memory::Addr;
use crate::core::object::Value;
use crate::objects::function::NativeFunction;

enum Member {
    Value(Value, bool),
    Method(NativeFunction),
    Getter(NativeFunction),
    Setter(NativeFunction),
}

/// Builder for plain objects, mostly prototypes.
pub struct DerivedObject {
    proto: Option<Addr>,
    members: Vec<(String, Member)>,
}

impl DerivedObject {
    pub fn new() -> Self {
        DerivedObject {
            proto: None,
            members: Vec::new(),
        }
    }

    pub fn with_proto(proto: Addr) -> Self {
        DerivedObject {
            proto: Some(proto),
            ..DerivedObject::new()
        }
    }

    pub fn value<V: Into<Value>>(self, key: &str, value: V) -> Self {
        self.member(key, Member::Value(value.into(), true))
    }

    pub fn constant<V: Into<Value>>(self, key: &str, value: V) -> Self {
        self.member(key, Member::Value(value.into(), false))
    }

    pub fn method<F>(self, key: &str, run: F) -> Self
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.member(key, Member::Method(NativeFunction::new(run)))
    }

    pub fn getter<F>(self, key: &str, run: F) -> Self
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.member(key, Member::Getter(NativeFunction::new(run)))
    }

    pub fn setter<F>(self, key: &str, run: F) -> Self
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.member(key, Member::Setter(NativeFunction::new(run)))
    }

    fn member(mut self, key: &str, member: Member) -> Self {
        self.members.push((key.to_string(), member));
        self
    }

    /// Allocates the object and defines its members in the order given.
    pub fn insert(self, interp: &mut Interp) -> Result<Addr> {
        let addr = interp.create_object(self.proto)?;
        // unreachable until the caller stores it somewhere
        let mark = interp.pin_mark();
        interp.pin(addr);
        let result = define_members(interp, addr, self.members);
        interp.unpin_to(mark);
        result.map(|_| addr)
    }
}

fn define_members(interp: &mut Interp, addr: Addr, members: Vec<(String, Member)>) -> Result<()> {
    for (key, member) in members {
        match member {
            Member::Value(value, writable) => interp.define_value(addr, &key, value, writable)?,
            Member::Method(run) => {
                let method = interp.create_native(run)?;
                // methods are plain members that can be reassigned
                interp.define_value(addr, &key, method, true)?;
            }
            Member::Getter(run) => {
                let getter = interp.create_native(run)?;
                interp.define_getter(addr, &key, getter)?;
            }
            Member::Setter(run) => {
                let setter = interp.create_native(run)?;
                interp.define_setter(addr, &key, setter)?;
            }
        }
    }
    Ok(())
}

impl Default for DerivedObject {
    fn default() -> Self {
        DerivedObject::new()
    }
}
