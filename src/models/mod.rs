//! Entity records, creation inputs and update patches.
//!
//! Serialized field names follow the fixture documents: camelCase, with
//! the identifier spelled `Id`.

pub mod appointment;
pub mod department;
pub mod doctor;
pub mod enums;
pub mod patient;

pub use appointment::*;
pub use department::*;
pub use doctor::*;
pub use enums::*;
pub use patient::*;

/// Copy every `Some` field of a patch onto the target record.
macro_rules! merge_fields {
    ($target:expr, $patch:expr, { $($field:ident),+ $(,)? }) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

pub(crate) use merge_fields;

/// Records that carry a store-assigned identifier.
pub trait Identified {
    fn id(&self) -> u32;
}
