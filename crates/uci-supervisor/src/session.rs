//! Engine session: the only place that changes engine options.
//!
//! [`Session::update`] turns a batch of requested option changes into
//! `setoption` commands. The whole batch is validated before the first command
//! is written, and the cached parameters only change once every command and the
//! trailing position re-assertion went through.

use log::{debug, info, trace, warn};
use uci_options::table::{OPT_ELO, OPT_LIMIT_STRENGTH, OPT_SHOW_WDL, OPT_SKILL_LEVEL};
use uci_options::{
    OptionError, OptionValue, ParameterStore, Parameters, RestrictionTable, default_parameters,
    release_date, resolve, validate,
};

use crate::engine::{
    DEFAULT_DEPTH, DEFAULT_NUM_NODES, EngineConfig, EngineIdentity, EngineProcess,
};
use crate::error::{SessionError, SessionResult};
use crate::position::PositionTracker;
use crate::transport::{Transport, setoption_line};

pub struct Session<T: Transport = EngineProcess> {
    transport: T,
    store: ParameterStore,
    position: PositionTracker,
    identity: EngineIdentity,
    depth: u32,
    num_nodes: u64,
    turn_perspective: bool,
    debug_view: bool,
}

impl Session<EngineProcess> {
    /// Spawn the engine described by `config` and bring it to a known state.
    pub fn initialize(config: &EngineConfig) -> SessionResult<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(SessionError::InvalidSetting(
                "path to engine binary cannot be empty".to_string(),
            ));
        }
        let transport = EngineProcess::spawn(config)?;
        let identity = transport.identity().clone();
        let mut session =
            Session::with_transport(transport, config.parameters.clone())?.with_identity(identity);
        session.configure(config)?;
        Ok(session)
    }
}

impl<T: Transport> Session<T> {
    /// Build a session over an already connected transport.
    ///
    /// `parameters` seeds the store (every entry is validated); `None` uses the
    /// defaults. Nothing is sent until [`Session::start`] or an update.
    pub fn with_transport(transport: T, parameters: Option<Parameters>) -> SessionResult<Self> {
        let table = RestrictionTable::stockfish();
        let store = match parameters {
            Some(p) => ParameterStore::new(table, p)?,
            None => ParameterStore::with_defaults(table)?,
        };
        Ok(Self {
            transport,
            store,
            position: PositionTracker::default(),
            identity: EngineIdentity::default(),
            depth: DEFAULT_DEPTH,
            num_nodes: DEFAULT_NUM_NODES,
            turn_perspective: true,
            debug_view: false,
        })
    }

    pub fn with_identity(mut self, identity: EngineIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Send every seeded parameter, enable WDL output when the engine offers
    /// it, and start a new game.
    pub fn start(&mut self) -> SessionResult<()> {
        let seeded = self.store.snapshot();
        self.update(seeded)?;
        if self.identity.has_option(OPT_SHOW_WDL) {
            self.send(&setoption_line(OPT_SHOW_WDL, &OptionValue::Bool(true)))?;
        }
        self.prepare_for_new_position(true)
    }

    /// Take over the settings of `config`, [`start`](Session::start), then
    /// apply `config.overrides` as a regular update.
    pub fn configure(&mut self, config: &EngineConfig) -> SessionResult<()> {
        self.set_debug_view(config.debug_view);
        self.set_depth(config.depth)?;
        self.set_num_nodes(config.num_nodes)?;
        self.set_turn_perspective(config.turn_perspective);
        self.start()?;
        self.update(config.overrides.clone())
    }

    /// Apply a batch of option changes.
    ///
    /// Every name must already be tracked by the store (any registered name is
    /// accepted while the store is empty). The merged set is validated as a
    /// whole, so a stale stored value fails the batch too. On any error the
    /// stored parameters are unchanged; after a transport error the engine may
    /// have received part of the batch.
    pub fn update(&mut self, changes: Parameters) -> SessionResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        if !self.store.is_empty() {
            if let Some(name) = changes.keys().find(|name| !self.store.contains(name)) {
                return Err(OptionError::UnknownOption { name: name.clone() }.into());
            }
        }

        let mut pending = self.store.snapshot();
        pending.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));

        let table = self.store.table();
        for (name, value) in &pending {
            validate(table, name, value)?;
        }

        let resolution = resolve(&changes, pending)?;
        debug!(
            "applying {} option(s) for {} requested change(s)",
            resolution.order.len(),
            changes.len()
        );

        for (name, value) in resolution.iter() {
            if let Err(e) = self.send(&setoption_line(name, value)) {
                warn!("option update aborted at '{name}', engine option state is unknown: {e}");
                return Err(e);
            }
        }

        let fen = self.position.fen().to_string();
        if let Err(e) = self.set_fen_position(&fen, false) {
            warn!("position re-assertion failed after option update: {e}");
            return Err(e);
        }

        self.store.commit(resolution.values);
        Ok(())
    }

    /// Copy of the option values last applied.
    pub fn current_options(&self) -> Parameters {
        self.store.snapshot()
    }

    /// Play at a fixed skill level (0-20) instead of a target rating.
    pub fn set_skill_level(&mut self, level: i64) -> SessionResult<()> {
        self.update(Parameters::from([
            (OPT_SKILL_LEVEL.to_string(), OptionValue::Int(level)),
            (OPT_LIMIT_STRENGTH.to_string(), OptionValue::Bool(false)),
        ]))
    }

    /// Play at a target Elo rating instead of a skill level.
    pub fn set_elo_rating(&mut self, elo: i64) -> SessionResult<()> {
        self.update(Parameters::from([
            (OPT_ELO.to_string(), OptionValue::Int(elo)),
            (OPT_LIMIT_STRENGTH.to_string(), OptionValue::Bool(true)),
        ]))
    }

    pub fn reset_engine_parameters(&mut self) -> SessionResult<()> {
        self.update(default_parameters())
    }

    /// Start a new game (optionally) and wait until the engine is ready.
    pub fn prepare_for_new_position(&mut self, send_ucinewgame: bool) -> SessionResult<()> {
        if send_ucinewgame {
            self.send("ucinewgame")?;
        }
        self.sync_ready()
    }

    /// Assert `fen` as the current position.
    pub fn set_fen_position(&mut self, fen: &str, send_ucinewgame: bool) -> SessionResult<()> {
        self.prepare_for_new_position(send_ucinewgame)?;
        let mut next = self.position.clone();
        next.set_fen(fen);
        self.send(&next.position_command())?;
        self.position = next;
        Ok(())
    }

    pub fn fen_position(&self) -> &str {
        self.position.fen()
    }

    pub fn set_depth(&mut self, depth: u32) -> SessionResult<()> {
        if depth < 1 {
            return Err(SessionError::InvalidSetting(
                "depth must be an integer higher than 0".to_string(),
            ));
        }
        self.depth = depth;
        Ok(())
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_num_nodes(&mut self, num_nodes: u64) -> SessionResult<()> {
        if num_nodes < 1 {
            return Err(SessionError::InvalidSetting(
                "num_nodes must be an integer higher than 0".to_string(),
            ));
        }
        self.num_nodes = num_nodes;
        Ok(())
    }

    pub fn num_nodes(&self) -> u64 {
        self.num_nodes
    }

    /// Whether evaluations are reported from the side to move (`true`) or from White.
    pub fn set_turn_perspective(&mut self, turn_perspective: bool) {
        self.turn_perspective = turn_perspective;
    }

    pub fn turn_perspective(&self) -> bool {
        self.turn_perspective
    }

    pub fn set_debug_view(&mut self, debug_view: bool) {
        self.debug_view = debug_view;
    }

    pub fn identity(&self) -> &EngineIdentity {
        &self.identity
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.identity.name.as_deref()
    }

    /// Release date of the engine's version, when it is a known Stockfish release.
    pub fn engine_release_date(&self) -> Option<&'static str> {
        let name = self.engine_name()?;
        let mut tokens = name.split_whitespace();
        if !tokens.next()?.eq_ignore_ascii_case("stockfish") {
            return None;
        }
        release_date(tokens.next()?)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn log_command(&self, line: &str) {
        if self.debug_view {
            info!(">>> {line}");
        } else {
            trace!(">>> {line}");
        }
    }

    fn send(&mut self, line: &str) -> SessionResult<()> {
        self.log_command(line);
        self.transport.send(line).map_err(SessionError::Transport)
    }

    fn sync_ready(&mut self) -> SessionResult<()> {
        self.log_command("isready");
        self.transport.sync_ready().map_err(SessionError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::position::STARTING_FEN;
    use crate::testing::RecordingTransport;
    use log::{Level, LevelFilter};
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};
    use uci_options::table::{OPT_HASH, OPT_THREADS};

    fn session() -> Session<RecordingTransport> {
        Session::with_transport(RecordingTransport::new(), None).unwrap()
    }

    fn one(name: &str, value: impl Into<OptionValue>) -> Parameters {
        Parameters::from([(name.to_string(), value.into())])
    }

    #[test]
    fn empty_update_sends_nothing() {
        let mut s = session();
        let before = s.current_options();
        s.update(Parameters::new()).unwrap();
        assert!(s.transport().lines.is_empty());
        assert_eq!(s.current_options(), before);
    }

    #[test]
    fn update_resends_merged_set_then_reasserts_position() {
        let mut s = session();
        s.update(one("MultiPV", 3)).unwrap();
        let lines = &s.transport().lines;
        assert_eq!(s.transport().setoptions().len(), 14);
        assert!(lines.contains(&"setoption name MultiPV value 3".to_string()));
        let tail: Vec<&str> = lines[lines.len() - 2..].iter().map(String::as_str).collect();
        assert_eq!(tail, ["isready".to_string(), format!("position fen {STARTING_FEN}")]);
        assert_eq!(s.current_options().get("MultiPV"), Some(&OptionValue::Int(3)));
    }

    #[test]
    fn threads_then_hash_are_last_options_sent() {
        let mut s = session();
        s.update(one(OPT_THREADS, 4)).unwrap();
        let opts = s.transport().setoptions();
        assert_eq!(opts[opts.len() - 2], "setoption name Threads value 4");
        assert_eq!(opts[opts.len() - 1], "setoption name Hash value 16");
    }

    #[test]
    fn start_enables_wdl_when_advertised() {
        let mut identity = EngineIdentity::default();
        identity.options.insert(OPT_SHOW_WDL.to_string());
        let mut s = session().with_identity(identity);
        s.start().unwrap();
        let lines = &s.transport().lines;
        let wdl = lines.iter().position(|l| l == "setoption name UCI_ShowWDL value true");
        let newgame = lines.iter().position(|l| l == "ucinewgame");
        assert!(wdl.is_some() && newgame.is_some() && wdl < newgame, "{lines:?}");
        assert_eq!(lines.last().map(String::as_str), Some("isready"));
        assert!(!s.current_options().contains_key(OPT_SHOW_WDL));
    }

    #[test]
    fn unknown_name_is_checked_against_store_keys() {
        let seed = one(OPT_HASH, 32);
        let mut s = Session::with_transport(RecordingTransport::new(), Some(seed)).unwrap();
        let err = s.update(one("MultiPV", 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
        assert!(s.transport().lines.is_empty());
    }

    #[test]
    fn settings_reject_zero() {
        let mut s = session();
        assert_eq!(s.set_depth(0).unwrap_err().kind(), ErrorKind::InvalidSetting);
        assert_eq!(s.set_num_nodes(0).unwrap_err().kind(), ErrorKind::InvalidSetting);
        s.set_depth(20).unwrap();
        s.set_num_nodes(5_000).unwrap();
        assert_eq!((s.depth(), s.num_nodes()), (20, 5_000));
    }

    static COMMAND_LOG: CommandLog = CommandLog;
    static LOGGED: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());

    struct CommandLog;

    impl log::Log for CommandLog {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let msg = record.args().to_string();
            if msg.starts_with(">>> ") {
                LOGGED.lock().unwrap().push((thread::current().id(), record.level(), msg));
            }
        }

        fn flush(&self) {}
    }

    /// Sent-command log lines recorded on this thread so far.
    fn logged_commands() -> Vec<(Level, String)> {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            let _ = log::set_logger(&COMMAND_LOG);
            log::set_max_level(LevelFilter::Trace);
        });
        let me = thread::current().id();
        LOGGED
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _, _)| *id == me)
            .map(|(_, level, msg)| (*level, msg.clone()))
            .collect()
    }

    #[test]
    fn every_sent_command_is_logged_including_isready() {
        let fen = "8/8/8/8/8/8/8/K6k w - - 0 1";
        let before = logged_commands().len();
        let mut s = session();
        s.set_fen_position(fen, true).unwrap();
        s.set_debug_view(true);
        s.prepare_for_new_position(false).unwrap();

        let logged = logged_commands().split_off(before);
        let position = format!(">>> position fen {fen}");
        let expected = [
            (Level::Trace, ">>> ucinewgame"),
            (Level::Trace, ">>> isready"),
            (Level::Trace, position.as_str()),
            (Level::Info, ">>> isready"),
        ];
        let logged: Vec<(Level, &str)> = logged.iter().map(|(l, m)| (*l, m.as_str())).collect();
        assert_eq!(logged, expected);
        assert_eq!(s.transport().lines.len(), 4);
    }

    #[test]
    fn release_date_follows_engine_name() {
        let identity = EngineIdentity {
            name: Some("Stockfish 15.1".to_string()),
            ..Default::default()
        };
        let s = session().with_identity(identity);
        assert_eq!(s.engine_release_date(), Some("2022-12-04"));

        let other = EngineIdentity {
            name: Some("Komodo 14".to_string()),
            ..Default::default()
        };
        assert_eq!(session().with_identity(other).engine_release_date(), None);
        assert_eq!(session().engine_release_date(), None);
    }
}
