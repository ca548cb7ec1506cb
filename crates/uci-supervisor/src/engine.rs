//! Engine process: spawning, the `uci` handshake, and the stdin/stdout pipes.

use std::collections::BTreeSet;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, info};
use uci_options::Parameters;

use crate::error::{SessionError, SessionResult};
use crate::transport::Transport;

pub const ENGINE_READY_TIMEOUT: Duration = Duration::from_secs(30);
pub const ENGINE_QUIT_TIMEOUT: Duration = Duration::from_millis(300);
pub const ENGINE_QUIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const DEFAULT_DEPTH: u32 = 15;
pub const DEFAULT_NUM_NODES: u64 = 1_000_000;

/// How to start an engine and what to configure on it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub path: PathBuf,
    pub args: Vec<String>,
    pub depth: u32,
    pub num_nodes: u64,
    pub turn_perspective: bool,
    /// Log every command sent to the engine at `info` level
    pub debug_view: bool,
    /// Initial option values; `None` applies the defaults
    pub parameters: Option<Parameters>,
    /// Changes applied with one update once the initial values are in place
    pub overrides: Parameters,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            depth: DEFAULT_DEPTH,
            num_nodes: DEFAULT_NUM_NODES,
            turn_perspective: true,
            debug_view: false,
            parameters: None,
            overrides: Parameters::new(),
        }
    }
}

/// What the engine told us during `uci`.
#[derive(Debug, Clone, Default)]
pub struct EngineIdentity {
    pub name: Option<String>,
    pub options: BTreeSet<String>,
}

impl EngineIdentity {
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    /// Feed one handshake line. Returns `true` on `uciok`.
    fn absorb(&mut self, line: &str) -> bool {
        if let Some(rest) = line.strip_prefix("option ") {
            if let Some(name) = parse_option_name(rest) {
                self.options.insert(name);
            }
        } else if let Some(name) = line.strip_prefix("id name ") {
            self.name = Some(name.trim().to_string());
        } else if line.trim() == "uciok" {
            return true;
        }
        false
    }
}

/// A running engine with its pipes.
pub struct EngineProcess {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    rx: Receiver<String>,
    identity: EngineIdentity,
}

impl EngineProcess {
    /// Spawn the engine and complete the `uci` / `uciok` exchange.
    pub fn spawn(cfg: &EngineConfig) -> SessionResult<Self> {
        let spawn_err = |source| SessionError::Spawn {
            path: cfg.path.clone(),
            source,
        };
        let mut child = Command::new(&cfg.path)
            .args(&cfg.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_err(io::Error::other("engine stdin not captured")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_err(io::Error::other("engine stdout not captured")))?;

        let (tx, rx) = mpsc::channel::<String>();
        std::thread::Builder::new()
            .name("uci-engine-reader".to_string())
            .spawn(move || {
                let reader = BufReader::new(stdout);
                for line in reader.lines().map_while(Result::ok) {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .map_err(spawn_err)?;

        let mut proc = Self {
            child,
            stdin: BufWriter::new(stdin),
            rx,
            identity: EngineIdentity::default(),
        };
        proc.handshake()?;
        Ok(proc)
    }

    fn handshake(&mut self) -> SessionResult<()> {
        self.write_line("uci").map_err(|e| SessionError::Handshake(e.to_string()))?;
        let deadline = Instant::now() + ENGINE_READY_TIMEOUT;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = self
                .recv_line(remaining)
                .map_err(|e| SessionError::Handshake(format!("waiting for uciok: {e}")))?;
            if self.identity.absorb(&line) {
                break;
            }
        }
        info!(
            "engine ready: {} ({} options advertised)",
            self.identity.name.as_deref().unwrap_or("unnamed"),
            self.identity.options.len()
        );
        Ok(())
    }

    pub fn identity(&self) -> &EngineIdentity {
        &self.identity
    }

    pub fn recv_line(&self, timeout: Duration) -> io::Result<String> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => {
                io::Error::new(io::ErrorKind::TimedOut, "engine read timeout")
            }
            RecvTimeoutError::Disconnected => {
                io::Error::new(io::ErrorKind::UnexpectedEof, "engine exited unexpectedly")
            }
        })
    }

    pub fn write_line(&mut self, msg: &str) -> io::Result<()> {
        self.stdin.write_all(msg.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()
    }
}

impl Transport for EngineProcess {
    fn send(&mut self, line: &str) -> io::Result<()> {
        self.write_line(line)
    }

    fn sync_ready(&mut self) -> io::Result<()> {
        self.write_line("isready")?;
        let deadline = Instant::now() + ENGINE_READY_TIMEOUT;
        loop {
            let line = self.recv_line(deadline.saturating_duration_since(Instant::now()))?;
            if line.trim() == "readyok" {
                return Ok(());
            }
            debug!("engine: {line}");
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let _ = self.write_line("quit");
        let deadline = Instant::now() + ENGINE_QUIT_TIMEOUT;
        while Instant::now() < deadline {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            std::thread::sleep(ENGINE_QUIT_POLL_INTERVAL);
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Extract `<Name>` from the body of an `option name <Name> type ...` line.
/// Names may contain spaces (`Skill Level`).
pub fn parse_option_name(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == "name" {
            let parts: Vec<&str> = tokens.by_ref().take_while(|t| *t != "type").collect();
            return (!parts.is_empty()).then(|| parts.join(" "));
        }
    }
    None
}
