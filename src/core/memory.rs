//

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use crate::core::error::{Error, Result};
use crate::core::object::Object;

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Addr(usize);

pub struct Memory {
    max_object_count: usize,
    objects: HashMap<Addr, Object>,
    // counter for Addr
    next_addr: usize,
    root_addr: Option<Addr>,
    // kept alive besides the root: call operands, objects under construction
    pinned: Vec<Addr>,
}

impl Memory {
    pub fn new(count: usize) -> Self {
        Memory {
            max_object_count: count,
            objects: HashMap::new(),
            next_addr: 0,
            root_addr: None,
            pinned: Vec::new(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn append_object(&mut self, object: Object) -> Result<Addr> {
        if self.objects.len() == self.max_object_count {
            self.collect();
        }

        if self.objects.len() == self.max_object_count {
            return Err(Error::OutOfMemory);
        }
        let addr = self.allocate_addr();
        self.objects.insert(addr, object);
        Ok(addr)
    }

    pub fn get_object(&self, addr: Addr) -> Result<&Object> {
        self.objects.get(&addr).ok_or(Error::InvalidAddress(addr))
    }

    pub fn get_object_mut(&mut self, addr: Addr) -> Result<&mut Object> {
        self.objects
            .get_mut(&addr)
            .ok_or(Error::InvalidAddress(addr))
    }

    pub fn set_root(&mut self, addr: Addr) -> Result<()> {
        self.get_object(addr)?;
        self.root_addr = Some(addr);
        Ok(())
    }

    pub fn pin(&mut self, addr: Addr) {
        self.pinned.push(addr);
    }

    /// Number of pinned objects, to be handed back to `unpin_to`.
    pub fn pin_mark(&self) -> usize {
        self.pinned.len()
    }

    pub fn unpin_to(&mut self, mark: usize) {
        self.pinned.truncate(mark);
    }

    pub fn collect(&mut self) {
        let now = Instant::now();

        let mut queue: VecDeque<Addr> = self.root_addr.into_iter().collect();
        queue.extend(self.pinned.iter().cloned());
        let mut dead_set: HashSet<Addr> = self.objects.keys().cloned().collect();

        // for each alive object
        while let Some(object_addr) = queue.pop_front() {
            if !dead_set.remove(&object_addr) {
                continue;
            }
            // queue what it references
            if let Some(object) = self.objects.get(&object_addr) {
                for holdee_addr in object.references() {
                    if dead_set.contains(&holdee_addr) {
                        queue.push_back(holdee_addr);
                    }
                }
            }
        }

        let dead_count = dead_set.len();
        for dead_addr in dead_set {
            self.objects.remove(&dead_addr);
        }

        debug!(
            "garbage collected, {} alive, {} dead, duration: {} ms",
            self.objects.len(),
            dead_count,
            now.elapsed().as_micros() as f64 / 1000.0
        );
    }

    fn allocate_addr(&mut self) -> Addr {
        let addr = Addr(self.next_addr);
        self.next_addr += 1;
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::{Prop, Value};

    fn holding(addr: Addr) -> Object {
        let mut object = Object::new(None);
        object.define_own("held", Prop::data(Value::Object(addr), true));
        object
    }

    #[test]
    fn store_object_in_memory_and_get_it() {
        let mut mem = Memory::new(16);
        let addr = mem.append_object(Object::new(None));
        assert!(addr.is_ok());
        assert!(mem.get_object(addr.unwrap()).is_ok());
    }

    #[test]
    fn store_fail_when_no_space() {
        let mut mem = Memory::new(1);
        let addr = mem.append_object(Object::new(None));
        mem.set_root(addr.unwrap()).unwrap();
        match mem.append_object(Object::new(None)) {
            Err(Error::OutOfMemory) => {}
            _ => panic!("expected out of memory"),
        }
    }

    #[test]
    fn collect_orphan_objects() {
        let mut mem = Memory::new(2);
        let root = mem.append_object(Object::new(None)).unwrap();
        mem.set_root(root).unwrap();
        let orphan = mem.append_object(Object::new(None)).unwrap();
        let third = mem.append_object(Object::new(None));
        assert!(third.is_ok());
        assert!(mem.get_object(orphan).is_err());
        assert!(mem.get_object(third.unwrap()).is_ok());
    }

    #[test]
    fn not_collect_held_objects() {
        let mut mem = Memory::new(2);
        let holdee = mem.append_object(Object::new(None)).unwrap();
        let root = mem.append_object(holding(holdee)).unwrap();
        mem.set_root(root).unwrap();
        assert!(mem.append_object(Object::new(None)).is_err());
        assert!(mem.get_object(holdee).is_ok());
    }

    #[test]
    fn prototype_link_keeps_prototype_alive() {
        let mut mem = Memory::new(2);
        let proto = mem.append_object(Object::new(None)).unwrap();
        let root = mem.append_object(Object::new(Some(proto))).unwrap();
        mem.set_root(root).unwrap();
        mem.collect();
        assert!(mem.get_object(proto).is_ok());
    }

    #[test]
    fn pinned_objects_survive() {
        let mut mem = Memory::new(4);
        let root = mem.append_object(Object::new(None)).unwrap();
        mem.set_root(root).unwrap();
        let receiver = mem.append_object(Object::new(None)).unwrap();
        let mark = mem.pin_mark();
        mem.pin(receiver);
        mem.collect();
        assert!(mem.get_object(receiver).is_ok());
        mem.unpin_to(mark);
        mem.collect();
        assert!(mem.get_object(receiver).is_err());
    }

    #[test]
    fn random_hold() {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        for _ in 0..10 {
            let mut mem = Memory::new(1024);
            let mut addr_vec = Vec::<Addr>::new();
            let mut alive_set = HashSet::<Addr>::new();
            let root = mem.append_object(Object::new(None)).unwrap();
            mem.set_root(root).unwrap();
            addr_vec.push(root);
            alive_set.insert(root);
            while addr_vec.len() < 1024 {
                let obj = mem.append_object(Object::new(None)).unwrap();
                let mut chance = 0.8;
                while rng.gen::<f64>() < chance {
                    let holder_addr = addr_vec[rng.gen_range(0..addr_vec.len())];
                    let key = format!("p{}", addr_vec.len());
                    mem.get_object_mut(holder_addr)
                        .unwrap()
                        .define_own(&key, Prop::data(Value::Object(obj), true));
                    if alive_set.contains(&holder_addr) {
                        alive_set.insert(obj);
                    }
                    chance -= 0.2;
                }
                addr_vec.push(obj);
            }
            let _ = mem.append_object(Object::new(None)).unwrap();
            for addr in addr_vec {
                assert_eq!(mem.get_object(addr).is_ok(), alive_set.contains(&addr));
            }
        }
    }
}
