//! Compile-time forwarding.
//!
//! `forward!` expands, inside an `impl` block, into methods that forward to a
//! field of `self`. Members the target does not have fail to compile.
//!
//! ```
//! # use delegates::forward;
//! struct Response { status: u16, body: String }
//!
//! impl Response {
//!     fn len(&self) -> usize { self.body.len() }
//! }
//!
//! struct Context { response: Response }
//!
//! impl Context {
//!     forward! {
//!         to response;
//!         pub fn len(&self) -> usize;
//!         pub get body: String;
//!         pub fluent status => with_status: u16;
//!     }
//! }
//!
//! let mut ctx = Context { response: Response { status: 200, body: "ok".into() } };
//! ctx.with_status(404);
//! assert_eq!(*ctx.status(), 404);
//! assert_eq!(ctx.len(), 2);
//! ```

#[macro_export]
macro_rules! forward {
    (to $field:ident; $($rest:tt)*) => {
        $crate::forward!(@member $field; $($rest)*);
    };

    (@member $field:ident;) => {};

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis fn $name:ident(&self $(, $arg:ident : $ty:ty)*) $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $(#[$attr])*
        $vis fn $name(&self $(, $arg: $ty)*) $(-> $ret)? {
            self.$field.$name($($arg),*)
        }
        $crate::forward!(@member $field; $($rest)*);
    };

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis fn $name:ident(&mut self $(, $arg:ident : $ty:ty)*) $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $(#[$attr])*
        $vis fn $name(&mut self $(, $arg: $ty)*) $(-> $ret)? {
            self.$field.$name($($arg),*)
        }
        $crate::forward!(@member $field; $($rest)*);
    };

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis get $name:ident : $ty:ty;
        $($rest:tt)*
    ) => {
        $(#[$attr])*
        $vis fn $name(&self) -> &$ty {
            &self.$field.$name
        }
        $crate::forward!(@member $field; $($rest)*);
    };

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis set $name:ident => $setter:ident : $ty:ty;
        $($rest:tt)*
    ) => {
        $(#[$attr])*
        $vis fn $setter(&mut self, value: $ty) {
            self.$field.$name = value;
        }
        $crate::forward!(@member $field; $($rest)*);
    };

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis access $name:ident => $setter:ident : $ty:ty;
        $($rest:tt)*
    ) => {
        $crate::forward!(@member $field;
            $(#[$attr])* $vis get $name: $ty;
            $(#[$attr])* $vis set $name => $setter: $ty;
            $($rest)*
        );
    };

    (@member $field:ident;
        $(#[$attr:meta])*
        $vis:vis fluent $name:ident => $setter:ident : $ty:ty;
        $($rest:tt)*
    ) => {
        $(#[$attr])*
        $vis fn $name(&self) -> &$ty {
            &self.$field.$name
        }
        $(#[$attr])*
        $vis fn $setter(&mut self, value: $ty) -> &mut Self {
            self.$field.$name = value;
            self
        }
        $crate::forward!(@member $field; $($rest)*);
    };
}

#[cfg(test)]
mod tests {
    struct Request {
        path: String,
        method: String,
        headers: Vec<(String, String)>,
    }

    impl Request {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }

        fn set_header(&mut self, name: &str, value: &str) {
            self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
            self.headers.push((name.to_string(), value.to_string()));
        }
    }

    struct Context {
        request: Request,
    }

    impl Context {
        forward! {
            to request;
            fn header(&self, name: &str) -> Option<&str>;
            fn set_header(&mut self, name: &str, value: &str);
            get method: String;
            access path => set_path: String;
            fluent headers => with_headers: Vec<(String, String)>;
        }
    }

    fn context() -> Context {
        Context {
            request: Request {
                path: "/".to_string(),
                method: "GET".to_string(),
                headers: Vec::new(),
            },
        }
    }

    #[test]
    fn forwards_methods() {
        let mut ctx = context();
        ctx.set_header("Accept", "text/html");
        assert_eq!(ctx.header("accept"), Some("text/html"));
        assert_eq!(ctx.request.headers.len(), 1);
    }

    #[test]
    fn forwards_fields() {
        let mut ctx = context();
        assert_eq!(ctx.method(), "GET");
        ctx.set_path("/users".to_string());
        assert_eq!(ctx.path(), "/users");
        assert_eq!(ctx.request.path, "/users");
    }

    #[test]
    fn fluent_setter_chains() {
        let mut ctx = context();
        let headers = vec![("Host".to_string(), "example.com".to_string())];
        ctx.with_headers(headers.clone()).set_path("/chained".to_string());
        assert_eq!(ctx.headers(), &headers);
        assert_eq!(ctx.header("host"), Some("example.com"));
        assert_eq!(ctx.path(), "/chained");
    }
}
