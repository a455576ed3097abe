pub mod cast;
pub mod caster;
pub mod context;
pub mod error;
pub mod kind;
pub mod source;

pub use cast::{Fields, FromConfig, Record, record};
pub use caster::{CastOptions, CastOptionsBuilder, Caster, cast, cast_with_errors};
pub use context::{Context, ErrorSink};
pub use error::{ConfigError, Error};
pub use kind::Kind;

// re-export macro
pub use json_config_macros::Config;
