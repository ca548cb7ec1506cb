//! Option model for supervising a UCI chess engine.
//!
//! - [`table`]: which options exist and their type / bounds
//! - [`validate`]: per-entry checks against the table
//! - [`store`]: the values last applied to the engine
//! - [`resolve`]: cross-option rules (strength mode, threads before hash)

pub mod defaults;
pub mod error;
pub mod resolve;
pub mod store;
pub mod table;
pub mod validate;
pub mod value;

pub use defaults::default_parameters;
pub use error::{Bound, OptionError, ResolveError};
pub use resolve::{Resolution, resolve};
pub use store::{ParameterStore, Parameters};
pub use table::{OptionDefinition, RestrictionTable, STOCKFISH_RELEASES, release_date};
pub use validate::validate;
pub use value::{OptionValue, ValueKind};
