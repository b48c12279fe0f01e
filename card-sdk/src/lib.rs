#[macro_use]
extern crate serde;

pub use smol_str::SmolStr;
pub use thin_vec::ThinVec;
pub use timestamp::Timestamp;

pub mod card;
pub mod message;

pub use card::*;
pub use message::*;

fn is_none_or_empty(value: &Option<SmolStr>) -> bool {
    match value {
        Some(ref value) => value.is_empty(),
        None => true,
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
