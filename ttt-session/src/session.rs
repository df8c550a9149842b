//! 会话
//!
//! 持有对局、比分、模式与 AI 引擎，状态变化通过广播通道发布，
//! 界面层只需订阅事件并渲染。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};
use ttt_ai::AiEngine;
use ttt_rules::{Board, GameOutcome, Move, Player, RuleError, WinningLine};

use crate::config::{SessionConfig, EVENT_CHANNEL_CAPACITY};
use crate::error::{Result, SessionError};
use crate::game::{Game, MoveReport};
use crate::player::{Controller, GameMode};
use crate::scoreboard::Scoreboard;

/// 可在任务间共享的会话
pub type SharedSession = Arc<Mutex<Session>>;

/// 会话事件
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 已落子
    MovePlayed {
        mv: Move,
        by: Controller,
        board: Board,
    },
    /// 走子被拒绝，状态未改变
    MoveRejected { index: usize, reason: RuleError },
    /// 轮到某方
    TurnChanged { player: Player, controller: Controller },
    /// 某方获胜
    GameWon {
        winner: Player,
        line: Option<WinningLine>,
        by: Controller,
    },
    /// 和棋
    GameDrawn,
    /// 比分变化
    ScoreUpdated(Scoreboard),
    /// 新对局开始
    NewGame { version: u64 },
    /// 模式变化
    ModeChanged(GameMode),
}

/// 会话
pub struct Session {
    game: Game,
    scores: Scoreboard,
    mode: GameMode,
    engine: AiEngine,
    think_delay: Duration,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// 按配置创建会话
    pub fn new(config: &SessionConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let mode = config.mode;

        Self {
            game: Game::new(mode.label(Player::X), mode.label(Player::O)),
            scores: Scoreboard::default(),
            mode,
            engine: AiEngine::new(config.ai),
            think_delay: config.think_delay(),
            events,
        }
    }

    /// 包装为共享会话
    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    /// 当前是否该电脑走子
    pub fn needs_computer_move(&self) -> bool {
        !self.game.is_over()
            && self.mode.controller(self.game.current_player()) == Controller::Computer
    }

    /// 人类玩家落子
    pub fn human_move(&mut self, index: usize) -> Result<MoveReport> {
        let player = self.game.current_player();
        if !self.game.is_over() && self.mode.controller(player) == Controller::Computer {
            return Err(SessionError::NotHumanTurn(player));
        }
        self.apply(index, Controller::Human)
    }

    /// 电脑立即落子（不等待）
    ///
    /// 终局时搜索引擎返回的 `NoLegalMove` 原样上报。
    pub fn computer_move(&mut self) -> Result<MoveReport> {
        let player = self.game.current_player();
        if self.mode.controller(player) != Controller::Computer {
            return Err(SessionError::NotComputerTurn(player));
        }

        let result = self.engine.best_move(self.game.board(), player).map_err(|e| {
            error!("电脑无法走子: {} (棋盘 {})", e, self.game.board());
            e
        })?;
        self.apply(result.index, Controller::Computer)
    }

    /// 等待思考时间后在后台线程搜索并落子
    ///
    /// 等待或搜索期间对局被重开时丢弃结果，返回 `Ok(None)`。
    pub async fn run_computer_turn(shared: &SharedSession) -> Result<Option<MoveReport>> {
        let (version, board, player, config, delay) = {
            let session = shared.lock().await;
            let player = session.game.current_player();
            if session.mode.controller(player) != Controller::Computer {
                return Err(SessionError::NotComputerTurn(player));
            }
            (
                session.game.version(),
                *session.game.board(),
                player,
                session.engine.config(),
                session.think_delay,
            )
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if shared.lock().await.game.version() != version {
            warn!("等待期间对局已重开，取消电脑走子");
            return Ok(None);
        }

        let search =
            tokio::task::spawn_blocking(move || AiEngine::new(config).best_move(&board, player))
                .await
                .map_err(|e| SessionError::Task(e.to_string()))?;

        let mut session = shared.lock().await;
        if session.game.version() != version || *session.game.board() != board {
            warn!("AI 计算期间对局已改变，丢弃 AI 走法");
            return Ok(None);
        }

        let result = search.map_err(|e| {
            error!("电脑无法走子: {} (棋盘 {})", e, board);
            e
        })?;
        session.apply(result.index, Controller::Computer).map(Some)
    }

    /// 执行走子并发布事件
    fn apply(&mut self, index: usize, by: Controller) -> Result<MoveReport> {
        let report = match self.game.play(index) {
            Ok(report) => report,
            Err(reason) => {
                debug!("拒绝走子 {}: {}", index, reason);
                self.emit(SessionEvent::MoveRejected {
                    index,
                    reason: reason.clone(),
                });
                return Err(reason.into());
            }
        };

        self.emit(SessionEvent::MovePlayed {
            mv: report.mv,
            by,
            board: *self.game.board(),
        });

        match report.outcome {
            GameOutcome::Ongoing => {
                let next = self.game.current_player();
                self.emit(SessionEvent::TurnChanged {
                    player: next,
                    controller: self.mode.controller(next),
                });
            }
            GameOutcome::Win(winner) => {
                info!("对局结束: {} 获胜", self.mode.label(winner));
                self.emit(SessionEvent::GameWon {
                    winner,
                    line: report.line,
                    by,
                });
                self.finish(report.outcome);
            }
            GameOutcome::Draw => {
                info!("对局结束: 和棋");
                self.emit(SessionEvent::GameDrawn);
                self.finish(report.outcome);
            }
        }

        Ok(report)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        if self.scores.record(outcome) {
            self.emit(SessionEvent::ScoreUpdated(self.scores));
        }
    }

    /// 重新开局（比分保留）
    pub fn new_game(&mut self) {
        self.game
            .reset_with_labels(self.mode.label(Player::X), self.mode.label(Player::O));
        info!("新对局 #{}", self.game.version());

        self.emit(SessionEvent::NewGame {
            version: self.game.version(),
        });
        self.emit(SessionEvent::TurnChanged {
            player: Player::X,
            controller: self.mode.controller(Player::X),
        });
    }

    /// 切换模式并重新开局
    pub fn set_mode(&mut self, mode: GameMode) {
        info!("切换模式: {:?}", mode);
        self.mode = mode;
        self.emit(SessionEvent::ModeChanged(mode));
        self.new_game();
    }

    /// 比分清零
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        self.emit(SessionEvent::ScoreUpdated(self.scores));
    }

    /// 状态提示
    pub fn status_text(&self) -> String {
        match self.game.outcome() {
            GameOutcome::Ongoing => format!("Player {}'s turn", self.game.current_player()),
            GameOutcome::Win(winner) => match self.mode.controller(winner) {
                Controller::Computer => "AI wins!".to_string(),
                Controller::Human => format!("{} wins!", winner),
            },
            GameOutcome::Draw => "It's a draw!".to_string(),
        }
    }

    fn emit(&self, event: SessionEvent) {
        // 没有订阅者时发送失败，忽略即可
        let _ = self.events.send(event);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttt_ai::AiError;

    fn vs_computer(computer: Player) -> SessionConfig {
        SessionConfig {
            mode: GameMode::VsComputer { computer },
            ..SessionConfig::default()
        }
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_two_player_game_and_scores() {
        let mut session = Session::default();
        let mut rx = session.subscribe();

        for index in [0, 3, 1, 4] {
            session.human_move(index).unwrap();
        }
        assert_eq!(session.status_text(), "Player X's turn");

        let report = session.human_move(2).unwrap();
        assert_eq!(report.outcome, GameOutcome::Win(Player::X));
        assert_eq!(session.status_text(), "X wins!");
        assert_eq!(session.scores().x_wins, 1);

        let events = drain(&mut rx);
        assert!(events.contains(&SessionEvent::GameWon {
            winner: Player::X,
            line: Some([0, 1, 2]),
            by: Controller::Human,
        }));
        assert_eq!(events.last(), Some(&SessionEvent::ScoreUpdated(*session.scores())));

        // 比分跨局保留
        session.new_game();
        assert_eq!(session.scores().x_wins, 1);
        assert_eq!(*session.game().board(), Board::empty());
        assert_eq!(session.status_text(), "Player X's turn");
    }

    #[test]
    fn test_illegal_move_is_reported_and_ignored() {
        let mut session = Session::default();
        let mut rx = session.subscribe();
        session.human_move(4).unwrap();
        drain(&mut rx);

        let err = session.human_move(4).unwrap_err();
        assert!(matches!(err, SessionError::Rule(RuleError::CellOccupied { index: 4, .. })));
        assert_eq!(session.game().current_player(), Player::O);

        let events = drain(&mut rx);
        assert!(matches!(events.as_slice(), [SessionEvent::MoveRejected { index: 4, .. }]));
    }

    #[test]
    fn test_draw_counts_once() {
        let mut session = Session::default();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            session.human_move(index).unwrap();
        }
        assert_eq!(session.status_text(), "It's a draw!");
        assert_eq!(session.scores().draws, 1);

        // 终局后继续点击不影响比分
        assert!(matches!(
            session.human_move(0),
            Err(SessionError::Rule(RuleError::GameOver))
        ));
        assert_eq!(session.scores().games_played(), 1);
    }

    #[test]
    fn test_controller_checks() {
        let mut session = Session::new(&vs_computer(Player::O));
        assert!(matches!(
            session.computer_move(),
            Err(SessionError::NotComputerTurn(Player::X))
        ));

        session.human_move(0).unwrap();
        assert!(session.needs_computer_move());
        assert!(matches!(session.human_move(1), Err(SessionError::NotHumanTurn(Player::O))));

        let report = session.computer_move().unwrap();
        assert_eq!(report.mv.player, Player::O);
        assert!(!session.needs_computer_move());
    }

    #[test]
    fn test_computer_never_loses_in_session() {
        let mut session = Session::new(&vs_computer(Player::O));

        // 人类总是下第一个空格
        for _ in 0..10 {
            while !session.game().is_over() {
                if session.needs_computer_move() {
                    session.computer_move().unwrap();
                } else {
                    let index = session.game().board().empty_indices()[0];
                    session.human_move(index).unwrap();
                }
            }
            assert_ne!(session.game().outcome(), GameOutcome::Win(Player::X));
            session.new_game();
        }
        assert_eq!(session.scores().games_played(), 10);
        assert_eq!(session.scores().x_wins, 0);
    }

    #[test]
    fn test_computer_plays_first_as_x() {
        let mut session = Session::default();
        let mut rx = session.subscribe();
        session.set_mode(GameMode::VsComputer { computer: Player::X });

        let events = drain(&mut rx);
        assert_eq!(events[0], SessionEvent::ModeChanged(GameMode::VsComputer { computer: Player::X }));
        assert!(events.contains(&SessionEvent::TurnChanged {
            player: Player::X,
            controller: Controller::Computer,
        }));

        assert!(session.needs_computer_move());
        session.computer_move().unwrap();
        assert_eq!(session.game().board().count(ttt_rules::Cell::X), 1);
        assert_eq!(session.game().record().metadata.player_x, "AI");
    }

    #[test]
    fn test_ai_win_and_no_legal_move() {
        let mut session = Session::new(&vs_computer(Player::O));
        // 人类总是下第一个空格：X 0, O 4, X 1, O 2, X 3, O 6
        while !session.game().is_over() {
            if session.needs_computer_move() {
                session.computer_move().unwrap();
            } else {
                let index = session.game().board().empty_indices()[0];
                session.human_move(index).unwrap();
            }
        }

        assert_eq!(session.game().outcome(), GameOutcome::Win(Player::O));
        assert_eq!(session.game().board().to_string(), "XXOXO.O..");
        assert_eq!(session.status_text(), "AI wins!");
        assert_eq!(session.scores().o_wins, 1);

        // 终局后仍要求电脑走子属于调用方错误，原样上报
        assert!(matches!(
            session.computer_move(),
            Err(SessionError::Ai(AiError::NoLegalMove))
        ));
    }

    #[test]
    fn test_reset_scores() {
        let mut session = Session::default();
        for index in [0, 3, 1, 4, 2] {
            session.human_move(index).unwrap();
        }
        session.reset_scores();
        assert_eq!(session.scores().games_played(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_turn_waits_then_moves() {
        let shared = Session::new(&vs_computer(Player::O)).shared();
        shared.lock().await.human_move(4).unwrap();

        let start = tokio::time::Instant::now();
        let report = Session::run_computer_turn(&shared).await.unwrap().unwrap();

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(report.mv.player, Player::O);
        let session = shared.lock().await;
        assert_eq!(session.game().current_player(), Player::X);
        assert_eq!(session.game().board().count(ttt_rules::Cell::O), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_delay_discards_move() {
        let shared = Session::new(&vs_computer(Player::O)).shared();
        shared.lock().await.human_move(4).unwrap();

        let task = tokio::spawn({
            let shared = shared.clone();
            async move { Session::run_computer_turn(&shared).await }
        });
        // 后台任务此时仍在等待思考时间
        tokio::time::sleep(Duration::from_millis(100)).await;

        shared.lock().await.new_game();

        let result = task.await.unwrap().unwrap();
        assert!(result.is_none());
        let session = shared.lock().await;
        assert_eq!(*session.game().board(), Board::empty());
        assert_eq!(session.game().current_player(), Player::X);
    }

    #[tokio::test]
    async fn test_run_computer_turn_rejects_human_turn() {
        let shared = Session::new(&vs_computer(Player::O)).shared();
        let result = Session::run_computer_turn(&shared).await;
        assert!(matches!(result, Err(SessionError::NotComputerTurn(Player::X))));
    }
}
