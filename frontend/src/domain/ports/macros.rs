//! Helper macro for declaring port error enums.
//!
//! Each variant becomes a `thiserror` variant plus a snake-case constructor
//! whose parameters accept anything convertible into the field type, so
//! adapters can write `ApiError::transport(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.
    define_port_error! {
        pub enum SamplePortError {
            Offline => "storage offline",
            Missing { key: String } => "missing key: {key}",
            Rejected { status: u16, message: String } => "rejected ({status}): {message}",
        }
    }

    #[test]
    fn unit_variants_get_argumentless_constructors() {
        assert_eq!(SamplePortError::offline().to_string(), "storage offline");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = SamplePortError::missing("authToken");
        assert_eq!(err.to_string(), "missing key: authToken");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::rejected(503_u16, "maintenance");
        assert_eq!(
            err,
            SamplePortError::Rejected {
                status: 503,
                message: "maintenance".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "rejected (503): maintenance");
    }
}
