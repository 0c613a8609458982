mod clone_boundary;
mod coerce;
mod equality;
mod option_value;

pub use clone_boundary::clone_for_engine;
pub use coerce::{coerce, coerce_field, coerce_options, CoerceRule};
pub use equality::{options_eq, shallow_eq};
pub use option_value::{
    EngineValue, EngineValueKind, OptionMap, OptionValue, SharedObject, SharedSeq,
};
