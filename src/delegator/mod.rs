//! Forwarding members installed on a prototype.
//!
//! A `Delegator` pairs a source prototype with the name of the member that,
//! on each instance, holds the object to forward to. Every forwarding member
//! reads that member from its receiver when it runs, so instances may hold
//! different targets and may swap them at any time.

use crate::core::error::Result;
use crate::core::interp::Interp;
use crate::core::memory::Addr;
use crate::core::object::Value;

mod auto;
#[macro_use]
mod forward;

pub struct Delegator<'a> {
    interp: &'a mut Interp,
    proto: Addr,
    target: String,
    methods: Vec<String>,
    getters: Vec<String>,
    setters: Vec<String>,
    fluents: Vec<String>,
}

/// Same as `Delegator::new`. `delegate::auto` is `Delegator::auto`.
pub fn delegate<'a>(interp: &'a mut Interp, proto: Addr, target: &str) -> Delegator<'a> {
    Delegator::new(interp, proto, target)
}

pub mod delegate {
    pub use super::auto::auto;
}

// this[target]
fn resolve_target(interp: &mut Interp, target: &str) -> Result<Value> {
    let this = interp.context();
    interp.get(&this, target)
}

impl<'a> Delegator<'a> {
    pub fn new(interp: &'a mut Interp, proto: Addr, target: &str) -> Self {
        Delegator {
            interp,
            proto,
            target: target.to_string(),
            methods: Vec::new(),
            getters: Vec::new(),
            setters: Vec::new(),
            fluents: Vec::new(),
        }
    }

    pub fn auto(interp: &mut Interp, proto: Addr, target_proto: Addr, target: &str) -> Result<()> {
        auto::auto(interp, proto, target_proto, target)
    }

    pub fn proto(&self) -> Addr {
        self.proto
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn getters(&self) -> &[String] {
        &self.getters
    }

    pub fn setters(&self) -> &[String] {
        &self.setters
    }

    pub fn fluents(&self) -> &[String] {
        &self.fluents
    }

    /// Forwards calls of `name` to `this[target].name(...)`, with the target
    /// as receiver.
    pub fn method(&mut self, name: &str) -> Result<&mut Self> {
        let target = self.target.clone();
        let key = name.to_string();
        self.install(
            name,
            move |interp, args| {
                let delegatee = resolve_target(interp, &target)?;
                interp.call_method(&delegatee, &key, args)
            },
            |interp, proto, name, forward| interp.define_value(proto, name, forward, true),
        )?;
        trace!("delegated method '{}' to '{}'", name, self.target);
        self.methods.push(name.to_string());
        Ok(self)
    }

    /// Forwards reads of `name` to `this[target].name`.
    pub fn getter(&mut self, name: &str) -> Result<&mut Self> {
        let target = self.target.clone();
        let key = name.to_string();
        self.install(
            name,
            move |interp, _args| {
                let delegatee = resolve_target(interp, &target)?;
                interp.get(&delegatee, &key)
            },
            Interp::define_getter,
        )?;
        trace!("delegated getter '{}' to '{}'", name, self.target);
        self.getters.push(name.to_string());
        Ok(self)
    }

    /// Forwards writes of `name` to `this[target].name`.
    pub fn setter(&mut self, name: &str) -> Result<&mut Self> {
        let target = self.target.clone();
        let key = name.to_string();
        self.install(
            name,
            move |interp, args| {
                let value = args.first().cloned().unwrap_or_default();
                let delegatee = resolve_target(interp, &target)?;
                interp.set(&delegatee, &key, value)
            },
            Interp::define_setter,
        )?;
        trace!("delegated setter '{}' to '{}'", name, self.target);
        self.setters.push(name.to_string());
        Ok(self)
    }

    pub fn access(&mut self, name: &str) -> Result<&mut Self> {
        self.getter(name)?.setter(name)
    }

    /// Installs `name` as a callable that reads `this[target].name` when
    /// called without a defined argument, and otherwise writes it and
    /// returns `this`.
    pub fn fluent(&mut self, name: &str) -> Result<&mut Self> {
        let target = self.target.clone();
        let key = name.to_string();
        self.install(
            name,
            move |interp, args| {
                let delegatee = resolve_target(interp, &target)?;
                match args.first() {
                    Some(value) if !value.is_undefined() => {
                        interp.set(&delegatee, &key, value.clone())?;
                        Ok(interp.context())
                    }
                    _ => interp.get(&delegatee, &key),
                }
            },
            |interp, proto, name, forward| interp.define_value(proto, name, forward, true),
        )?;
        trace!("delegated fluent '{}' to '{}'", name, self.target);
        self.fluents.push(name.to_string());
        Ok(self)
    }

    // allocates the forwarding function and defines it on `proto`, which
    // may be held by nothing but this builder
    fn install<F, D>(&mut self, name: &str, run: F, define: D) -> Result<()>
    where
        F: Fn(&mut Interp, &[Value]) -> Result<Value> + Send + Sync + 'static,
        D: FnOnce(&mut Interp, Addr, &str, Value) -> Result<()>,
    {
        let mark = self.interp.pin_mark();
        self.interp.pin(self.proto);
        let result = match self.interp.create_function(run) {
            Ok(forward) => define(&mut *self.interp, self.proto, name, forward),
            Err(err) => Err(err),
        };
        self.interp.unpin_to(mark);
        result
    }
}
