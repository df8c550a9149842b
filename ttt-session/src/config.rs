//! 会话配置
//!
//! JSON 格式，缺省字段使用默认值

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ttt_ai::AiConfig;

use crate::error::{Result, SessionError};
use crate::player::GameMode;

/// 电脑落子前的默认“思考”时间（毫秒）
pub const DEFAULT_THINK_DELAY_MS: u64 = 500;

/// 事件通道容量
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 配置目录名
const CONFIG_DIR_NAME: &str = "tictactoe";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

/// 会话配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 对局模式
    pub mode: GameMode,
    /// 电脑落子前的等待时间（毫秒）
    pub think_delay_ms: u64,
    /// 搜索引擎配置
    pub ai: AiConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
            ai: AiConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        debug!("已加载配置: {:?}", path);
        Ok(config)
    }

    /// 加载配置：优先使用指定路径，其次默认路径，都没有则用默认值
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                info!("未找到配置文件，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 检查取值范围
    pub fn validate(&self) -> Result<()> {
        // 上限 10 秒
        if self.think_delay_ms > 10_000 {
            return Err(SessionError::Config(format!(
                "think_delay_ms too large: {} (max 10000)",
                self.think_delay_ms
            )));
        }
        Ok(())
    }
}

/// 默认配置文件路径：`<config_dir>/tictactoe/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use ttt_rules::Player;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.mode, GameMode::TwoPlayer);
        assert_eq!(config.think_delay(), Duration::from_millis(500));
        assert_eq!(config.ai, AiConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(r#"{"mode": {"type": "vs_computer", "computer": "X"}}"#);
        let config = SessionConfig::load(file.path()).unwrap();

        assert_eq!(config.mode, GameMode::VsComputer { computer: Player::X });
        assert_eq!(config.think_delay_ms, DEFAULT_THINK_DELAY_MS);
    }

    #[test]
    fn test_load_explicit_path() {
        let file = write_config(r#"{"think_delay_ms": 0, "ai": {"alpha_beta": false}}"#);
        let config = SessionConfig::load_or_default(Some(file.path())).unwrap();

        assert_eq!(config.think_delay_ms, 0);
        assert!(!config.ai.alpha_beta);
    }

    #[test]
    fn test_load_errors() {
        let file = write_config("not json");
        assert!(matches!(SessionConfig::load(file.path()), Err(SessionError::Json(_))));

        let file = write_config(r#"{"think_delay_ms": 500000}"#);
        assert!(matches!(SessionConfig::load(file.path()), Err(SessionError::Config(_))));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(SessionConfig::load(&missing), Err(SessionError::Io(_))));
    }
}
