/// Define an error type wrapper e.g. `Foo` around a `Box<FooKind>`,
/// keeping `Result<T, Foo>` one pointer wide. Implements
/// `std::error::Error`, `Display`, `Deref` to the kind and `From` for
/// everything the kind can be made from, so `?` works on both kind
/// values and whatever `#[from]` sources the kind declares.
#[macro_export]
macro_rules! def_boxed_error {
    ($wrappername:ident, $kindname:ident) => {

        #[derive(Debug)]
        pub struct $wrappername(Box<$kindname>);

        impl $wrappername {
            pub fn kind(&self) -> &$kindname {
                &self.0
            }

            pub fn into_kind(self) -> $kindname {
                *self.0
            }
        }

        impl std::ops::Deref for $wrappername {
            type Target = $kindname;

            fn deref(&self) -> &Self::Target {
                &*self.0
            }
        }

        impl<E> From<E> for $wrappername where $kindname: From<E> {
            fn from(err: E) -> Self {
                $wrappername(Box::new($kindname::from(err)))
            }
        }

        impl std::error::Error for $wrappername {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                std::error::Error::source(&*self.0)
            }
        }

        impl std::fmt::Display for $wrappername {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                // Method call syntax is ambiguous here
                std::fmt::Display::fmt(&*self.0, f)
            }
        }
    }
}

/// Defines both an error kind enum (deriving `thiserror::Error`) and
/// its box wrapper as per `def_boxed_error`.
#[macro_export]
macro_rules! def_boxed_thiserror {
    ($wrappername:ident, $vis:vis enum $kindname:ident { $($body:tt)* }) => {
        #[derive(thiserror::Error, Debug)]
        $vis enum $kindname {
            $($body)*
        }

        $crate::def_boxed_error!($wrappername, $kindname);
    }
}
