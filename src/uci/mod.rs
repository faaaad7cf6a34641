//! The subprocess-backed UCI client: spawns the engine, speaks the line
//! protocol over its stdio pipes, and serializes requests single-flight —
//! spec §4.4/§4.5/§5.

mod bestmove;
mod options;
mod protocol;
mod request;

pub use bestmove::{BestMoveResult, Score};
pub use options::{OptionKind, UciOption};
pub use protocol::SetOptionValue;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::error::ChessRelayError;
use request::PendingSentinel;

/// `Idle → Spawning → Handshaking → Ready → (Working ⇄ Ready) → Quitting →
/// Terminated` — spec §3 Lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Spawning,
    Handshaking,
    Ready,
    Working,
    Quitting,
    Terminated,
}

/// Owns the engine child process and mediates every command/response
/// exchange over its stdin/stdout — spec §4.4.
pub struct UciDriver {
    executable: PathBuf,
    movetime_ms: u64,
    handshake_timeout: Duration,
    state: Mutex<DriverState>,
    child: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    recv_buffer: Arc<Mutex<VecDeque<String>>>,
    pending: Arc<PendingSentinel>,
    cancel: CancellationToken,
    reader_task: Mutex<Option<JoinHandle<()>>>,
    engine_name: Mutex<Option<String>>,
    engine_author: Mutex<Option<String>>,
    options: Mutex<IndexMap<String, UciOption>>,
}

impl UciDriver {
    pub fn new(executable: PathBuf, movetime_ms: u64, handshake_timeout_ms: u64) -> Self {
        Self {
            executable,
            movetime_ms,
            handshake_timeout: Duration::from_millis(handshake_timeout_ms),
            state: Mutex::new(DriverState::Idle),
            child: Mutex::new(None),
            stdin: Mutex::new(None),
            recv_buffer: Arc::new(Mutex::new(VecDeque::new())),
            pending: Arc::new(PendingSentinel::new()),
            cancel: CancellationToken::new(),
            reader_task: Mutex::new(None),
            engine_name: Mutex::new(None),
            engine_author: Mutex::new(None),
            options: Mutex::new(IndexMap::new()),
        }
    }

    pub async fn state(&self) -> DriverState {
        *self.state.lock().await
    }

    pub async fn engine_name(&self) -> Option<String> {
        self.engine_name.lock().await.clone()
    }

    pub async fn engine_author(&self) -> Option<String> {
        self.engine_author.lock().await.clone()
    }

    pub async fn engine_options(&self) -> IndexMap<String, UciOption> {
        self.options.lock().await.clone()
    }

    /// Spawns the engine, performs the `uci`/`ucinewgame`/`isready` handshake.
    /// Fails (returns `false`) if the executable can't be spawned or any
    /// handshake sentinel doesn't arrive in time (spec §4.4, §7
    /// `EngineUnavailable`/`EngineTimeout`).
    pub async fn start(&self) -> bool {
        *self.state.lock().await = DriverState::Spawning;

        let spawned = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                warn!("{}: {err}", ChessRelayError::EngineUnavailable);
                *self.state.lock().await = DriverState::Idle;
                return false;
            }
        };

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            warn!("{}: engine gave us no stdin/stdout pipe", ChessRelayError::EngineUnavailable);
            *self.state.lock().await = DriverState::Idle;
            return false;
        };

        *self.stdin.lock().await = Some(stdin);
        *self.child.lock().await = Some(child);

        let handle = spawn_reader(stdout, self.recv_buffer.clone(), self.pending.clone(), self.cancel.clone());
        *self.reader_task.lock().await = Some(handle);

        *self.state.lock().await = DriverState::Handshaking;
        let handshake_ok = self.run_handshake().await;
        *self.state.lock().await = if handshake_ok { DriverState::Ready } else { DriverState::Terminated };
        handshake_ok
    }

    async fn run_handshake(&self) -> bool {
        if self.request("uci".to_string(), Some("uciok"), self.handshake_timeout).await.is_none() {
            return false;
        }
        self.harvest_identity().await;
        if self.request(protocol::fmt_ucinewgame(), None, self.handshake_timeout).await.is_none() {
            return false;
        }
        self.request(protocol::fmt_isready(), Some("readyok"), self.handshake_timeout).await.is_some()
    }

    async fn harvest_identity(&self) {
        let lines: Vec<String> = self.recv_buffer.lock().await.iter().cloned().collect();
        let mut name = self.engine_name.lock().await;
        let mut author = self.engine_author.lock().await;
        let mut opts = self.options.lock().await;
        for line in &lines {
            if let Some(rest) = line.strip_prefix("id name ") {
                *name = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("id author ") {
                *author = Some(rest.trim().to_string());
            } else if line.starts_with("option ") {
                let option = options::parse_option_line(line);
                if let OptionKind::Unknown(raw) = &option.kind {
                    debug!("{}", ChessRelayError::ProtocolParse(raw.clone()));
                }
                opts.insert(option.name.clone(), option);
            }
        }
    }

    /// Best-effort shutdown (spec §4.4): `quit`, close stdin, wait up to one
    /// second, then force-kill. Always releases the child handle.
    pub async fn stop(&self) {
        *self.state.lock().await = DriverState::Quitting;
        let _ = self.write_line(&protocol::fmt_quit()).await;
        self.stdin.lock().await.take();

        let exited = {
            let mut guard = self.child.lock().await;
            match guard.as_mut() {
                Some(child) => timeout(Duration::from_secs(1), child.wait()).await.is_ok(),
                None => true,
            }
        };

        if !exited {
            let mut guard = self.child.lock().await;
            if let Some(child) = guard.as_mut() {
                let _ = child.start_kill();
                let _ = child.wait().await;
            }
        }

        self.cancel.cancel();
        if let Some(handle) = self.reader_task.lock().await.take() {
            let _ = handle.await;
        }
        self.child.lock().await.take();
        *self.state.lock().await = DriverState::Terminated;
    }

    pub async fn set_option(&self, name: &str, value: SetOptionValue) -> bool {
        let command = protocol::fmt_set_option(name, &value);
        let ok = self.request(command, None, self.movetime()).await.is_some();
        if ok {
            if let Some(option) = self.options.lock().await.get_mut(name) {
                apply_current_value(option, &value);
            }
        }
        ok
    }

    pub async fn set_debug(&self, on: bool) -> bool {
        self.request(protocol::fmt_debug(on), None, self.movetime()).await.is_some()
    }

    pub async fn new_game(&self) -> bool {
        if self.request(protocol::fmt_ucinewgame(), None, self.movetime()).await.is_none() {
            return false;
        }
        self.request(protocol::fmt_isready(), Some("readyok"), self.handshake_timeout).await.is_some()
    }

    pub async fn position_from_fen(&self, fen: &str) -> bool {
        self.request(protocol::fmt_position_fen(fen), None, self.movetime()).await.is_some()
    }

    pub async fn position_from_moves(&self, moves: &[String]) -> bool {
        self.request(protocol::fmt_position_startpos(moves), None, self.movetime()).await.is_some()
    }

    /// Sends `go movetime <T>`, waits for `bestmove`, and folds in the last
    /// buffered `score cp`/`score mate` pair (spec §4.4, §4.5).
    pub async fn best_move(&self) -> Option<BestMoveResult> {
        *self.state.lock().await = DriverState::Working;
        let deadline = self.movetime();
        let line = self
            .request(protocol::fmt_go_movetime(self.movetime_ms), Some("bestmove"), deadline)
            .await;
        *self.state.lock().await = DriverState::Ready;
        let line = line?;

        let info_lines: Vec<String> = self
            .recv_buffer
            .lock()
            .await
            .iter()
            .filter(|l| l.starts_with("info "))
            .cloned()
            .collect();

        let mut result = bestmove::parse_bestmove_line(&line)?;
        result.score = bestmove::latest_score(&info_lines);
        Some(result)
    }

    fn movetime(&self) -> Duration {
        Duration::from_millis(self.movetime_ms)
    }

    async fn write_line(&self, line: &str) -> bool {
        let mut guard = self.stdin.lock().await;
        match guard.as_mut() {
            Some(stdin) => {
                let full = format!("{line}\n");
                debug!("-> {line}");
                stdin.write_all(full.as_bytes()).await.is_ok() && stdin.flush().await.is_ok()
            }
            None => false,
        }
    }

    /// The single-flight request algorithm of spec §4.4: the `stdin` mutex
    /// doubles as the send lock, held across drain + install + send + wait,
    /// exactly matching "the send lock is held across send + wait" (§5).
    async fn request(&self, command: String, sentinel: Option<&str>, deadline: Duration) -> Option<String> {
        let mut stdin_guard = self.stdin.lock().await;

        self.recv_buffer.lock().await.clear();

        let installed = match sentinel {
            Some(expected) => Some(self.pending.install(expected).await),
            None => None,
        };

        let Some(stdin) = stdin_guard.as_mut() else {
            if let Some((generation, _)) = &installed {
                self.pending.clear(*generation).await;
            }
            return None;
        };

        let full = format!("{command}\n");
        debug!("-> {command}");
        let sent = stdin.write_all(full.as_bytes()).await.is_ok() && stdin.flush().await.is_ok();
        if !sent {
            if let Some((generation, _)) = &installed {
                self.pending.clear(*generation).await;
            }
            return None;
        }

        let Some((generation, rx)) = installed else {
            return Some(String::new());
        };

        let outcome = timeout(deadline, rx).await;
        self.pending.clear(generation).await;
        match outcome {
            Ok(Ok(line)) => Some(line),
            Ok(Err(_)) => {
                debug!("{}: {command}", ChessRelayError::EngineExited);
                None
            }
            Err(_) => {
                debug!("{}: {command}", ChessRelayError::EngineTimeout);
                None
            }
        }
    }
}

fn apply_current_value(option: &mut UciOption, value: &SetOptionValue) {
    match (&mut option.kind, value) {
        (OptionKind::Check { current, .. }, SetOptionValue::Check(v)) => *current = *v,
        (OptionKind::Spin { current, .. }, SetOptionValue::Other(v)) => {
            if let Ok(n) = v.parse() {
                *current = n;
            }
        }
        (OptionKind::Combo { current, .. }, SetOptionValue::Other(v)) => *current = v.clone(),
        (OptionKind::Text { current, .. }, SetOptionValue::Other(v)) => *current = v.clone(),
        _ => {}
    }
}

/// Background line ingestion (spec §4.4/§5): reads stdout lines, pushes each
/// trimmed line onto the receive buffer, then offers it to the pending
/// sentinel wait (if any). Pipe closure (EOF) or a read error is treated as
/// the process-exit event: any pending wait resolves to "no result".
fn spawn_reader(
    stdout: ChildStdout,
    recv_buffer: Arc<Mutex<VecDeque<String>>>,
    pending: Arc<PendingSentinel>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                next = lines.next_line() => match next {
                    Ok(Some(raw)) => {
                        let line = raw.trim().to_string();
                        debug!("<- {line}");
                        recv_buffer.lock().await.push_back(line.clone());
                        pending.try_complete(&line).await;
                    }
                    Ok(None) | Err(_) => {
                        debug!("{}", ChessRelayError::EngineExited);
                        pending.fail_pending().await;
                        break;
                    }
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starting_unspawnable_executable_reports_failure() {
        let driver = UciDriver::new(PathBuf::from("/nonexistent/definitely-not-an-engine"), 100, 200);
        assert!(!driver.start().await);
        assert_eq!(driver.state().await, DriverState::Idle);
    }
}
