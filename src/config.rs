//! Bootstrap configuration — spec §6.4: an engine group (executable path,
//! per-request timeout) and a board group (rendering metrics, opaque to the
//! core). Loaded from TOML the way the teacher's `serde`+`toml` pairing
//! already implies; `board`/`uci` only ever see already-parsed values.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub executable: PathBuf,
    #[serde(default = "default_movetime_ms")]
    pub movetime_ms: u64,
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
}

fn default_movetime_ms() -> u64 {
    1000
}

fn default_handshake_timeout_ms() -> u64 {
    2000
}

/// Rendering metrics/colors; opaque to the core per §6.4 ("not part of the
/// core contract").
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_light_square_color")]
    pub light_square_color: String,
    #[serde(default = "default_dark_square_color")]
    pub dark_square_color: String,
    #[serde(default = "default_square_width")]
    pub square_width: u8,
}

fn default_light_square_color() -> String {
    "#eeeed2".to_string()
}

fn default_dark_square_color() -> String {
    "#769656".to_string()
}

fn default_square_width() -> u8 {
    4
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            light_square_color: default_light_square_color(),
            dark_square_color: default_dark_square_color(),
            square_width: default_square_width(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_and_fills_defaults() {
        let cfg = AppConfig::from_toml_str("[engine]\nexecutable = \"/usr/bin/stockfish\"\n").unwrap();
        assert_eq!(cfg.engine.movetime_ms, 1000);
        assert_eq!(cfg.board.square_width, 4);
    }

    #[test]
    fn overrides_defaults_when_present() {
        let cfg = AppConfig::from_toml_str(
            "[engine]\nexecutable = \"/usr/bin/stockfish\"\nmovetime_ms = 250\n\n[board]\nsquare_width = 6\n",
        )
        .unwrap();
        assert_eq!(cfg.engine.movetime_ms, 250);
        assert_eq!(cfg.board.square_width, 6);
    }
}
