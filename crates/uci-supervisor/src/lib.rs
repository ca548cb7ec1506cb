//! Supervisory client for a UCI chess engine.
//!
//! A [`Session`] owns the engine's command pipe and the cached option values.
//! Option changes go through [`Session::update`], which validates the whole
//! batch, orders dependent options and only then writes `setoption` commands.

pub mod config;
pub mod engine;
pub mod error;
pub mod position;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

pub use config::{SupervisorConfig, parse_option_assignment};
pub use engine::{EngineConfig, EngineIdentity, EngineProcess};
pub use error::{ErrorKind, SessionError, SessionResult};
pub use position::{PositionTracker, STARTING_FEN};
pub use session::Session;
pub use transport::Transport;
pub use uci_options;
