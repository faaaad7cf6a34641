//! Bootstrap: load config, spawn the engine, hand off to the REPL.

use std::path::PathBuf;
use std::process::ExitCode;

use chessrelay::board::Board;
use chessrelay::config::AppConfig;
use chessrelay::repl;
use chessrelay::uci::UciDriver;
use log::error;

const DEFAULT_CONFIG_PATH: &str = "chessrelay.toml";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let raw = match std::fs::read_to_string(&config_path) {
        Ok(raw) => raw,
        Err(err) => {
            error!("failed to read config {config_path:?}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::from_toml_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            error!("failed to parse config {config_path:?}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let driver = UciDriver::new(
        config.engine.executable.clone(),
        config.engine.movetime_ms,
        config.engine.handshake_timeout_ms,
    );

    if !driver.start().await {
        error!("engine {:?} failed to start or complete the UCI handshake", config.engine.executable);
        return ExitCode::FAILURE;
    }

    let mut board = Board::new();
    repl::run(&mut board, &driver).await;

    driver.stop().await;
    ExitCode::SUCCESS
}
