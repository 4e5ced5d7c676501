//

use crate::core::error::Result;
use crate::core::interp::Interp;
use crate::core::memory::Addr;
use crate::core::object::Prop;
use crate::delegator::Delegator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Method,
    Getter,
    Setter,
}

// registrations for one own member, in installation order
fn classify(interp: &Interp, prop: &Prop) -> Vec<Kind> {
    let mut kinds = Vec::new();
    match prop {
        Prop::Accessor { get, set } => {
            if get.is_some() {
                kinds.push(Kind::Getter);
            }
            if set.is_some() {
                kinds.push(Kind::Setter);
            }
        }
        Prop::Data { value, writable } => {
            if interp.is_callable(value) {
                kinds.push(Kind::Method);
            } else {
                kinds.push(Kind::Getter);
            }
            // a writable method ends up as a plain setter
            if *writable {
                kinds.push(Kind::Setter);
            }
        }
    }
    kinds
}

/// Delegates every own member of `target_proto`, in definition order, from
/// `proto` to the member `target` of its instances.
pub fn auto(interp: &mut Interp, proto: Addr, target_proto: Addr, target: &str) -> Result<()> {
    let mut plan = Vec::new();
    for key in interp.own_keys(target_proto)? {
        if let Some(prop) = interp.own_property(target_proto, &key)? {
            let kinds = classify(interp, &prop);
            plan.push((key, kinds));
        }
    }

    let mut delegator = Delegator::new(interp, proto, target);
    for (key, kinds) in &plan {
        for kind in kinds {
            match kind {
                Kind::Method => delegator.method(key)?,
                Kind::Getter => delegator.getter(key)?,
                Kind::Setter => delegator.setter(key)?,
            };
        }
    }
    debug!(
        "auto-delegated {} members of {:?} through '{}': {} methods, {} getters, {} setters",
        plan.len(),
        target_proto,
        target,
        delegator.methods().len(),
        delegator.getters().len(),
        delegator.setters().len()
    );
    Ok(())
}
