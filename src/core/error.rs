//

use crate::core::memory::Addr;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "invalid member name {:?}", name)]
    InvalidName { name: String },
    #[fail(display = "cannot access member '{}' of {}", key, found)]
    MissingTarget { key: String, found: &'static str },
    #[fail(display = "member '{}' is not defined", key)]
    MissingMember { key: String },
    #[fail(display = "{} is not callable", name)]
    NotCallable { name: String },
    #[fail(display = "expected an object, found {}", found)]
    NotAnObject { found: &'static str },
    #[fail(display = "prototype chain of {:?} would be cyclic", _0)]
    CyclicPrototype(Addr),
    #[fail(display = "invalid object address {:?}", _0)]
    InvalidAddress(Addr),
    #[fail(display = "out of memory")]
    OutOfMemory,
    #[fail(display = "maximum call depth exceeded")]
    CallStackExceeded,
    #[fail(display = "access conflict")]
    AccessConflict,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_member() {
        let err = Error::MissingTarget {
            key: "body".to_string(),
            found: "undefined",
        };
        assert_eq!(err.to_string(), "cannot access member 'body' of undefined");
        let err = Error::InvalidName {
            name: String::new(),
        };
        assert_eq!(err.to_string(), "invalid member name \"\"");
    }
}
