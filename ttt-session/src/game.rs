//! 对局控制
//!
//! 持有权威棋盘、走子方与对局记录

use tracing::debug;
use ttt_rules::{
    Board, GameOutcome, GameRecord, Move, MoveRecord, Notation, Player, RuleError, WinningLine,
};

/// 一步走子的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// 已执行的走法
    pub mv: Move,
    /// 走子后的局面结果
    pub outcome: GameOutcome,
    /// 获胜连线（仅在获胜时存在）
    pub line: Option<WinningLine>,
}

/// 对局
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Player,
    outcome: GameOutcome,
    record: GameRecord,
    /// 每次重开递增，用于识别过期的 AI 结果
    version: u64,
}

impl Game {
    /// 创建新对局（X 先手）
    pub fn new(player_x: impl Into<String>, player_o: impl Into<String>) -> Self {
        Self {
            board: Board::empty(),
            current: Player::X,
            outcome: GameOutcome::Ongoing,
            record: GameRecord::new(player_x, player_o),
            version: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// 当前走子方在 `index` 落子
    ///
    /// 终局后返回 `GameOver`；越界或占用时状态不变。
    pub fn play(&mut self, index: usize) -> Result<MoveReport, RuleError> {
        if self.is_over() {
            return Err(RuleError::GameOver);
        }

        let player = self.current;
        self.board.place(index, player)?;

        let mv = Move::new(index, player);
        self.record.add_move(MoveRecord::now(mv));
        self.outcome = self.board.evaluate();
        debug!("{} -> {}", Notation::move_name(&mv), self.board);

        let line = match self.outcome {
            GameOutcome::Win(winner) => self.board.winning_line(winner),
            _ => None,
        };

        if self.outcome.is_terminal() {
            self.record.set_outcome(self.outcome);
        } else {
            self.current = player.opponent();
        }

        Ok(MoveReport {
            mv,
            outcome: self.outcome,
            line,
        })
    }

    /// 重新开局，保留玩家名称
    pub fn reset(&mut self) {
        let metadata = &self.record.metadata;
        self.record = GameRecord::new(metadata.player_x.clone(), metadata.player_o.clone());
        self.board = Board::empty();
        self.current = Player::X;
        self.outcome = GameOutcome::Ongoing;
        self.version += 1;
    }

    /// 重新开局并更换玩家名称
    pub fn reset_with_labels(&mut self, player_x: impl Into<String>, player_o: impl Into<String>) {
        self.reset();
        self.record = GameRecord::new(player_x, player_o);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new("Player X", "Player O")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::default();
        assert_eq!(game.current_player(), Player::X);

        game.play(4).unwrap();
        assert_eq!(game.current_player(), Player::O);
        game.play(0).unwrap();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.board().to_string(), "O...X....");
        assert_eq!(game.record().moves.len(), 2);
    }

    #[test]
    fn test_illegal_move_leaves_state() {
        let mut game = Game::default();
        game.play(4).unwrap();

        let err = game.play(4).unwrap_err();
        assert!(err.is_illegal_move());
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.record().moves.len(), 1);

        assert_eq!(game.play(9), Err(RuleError::OutOfRange { index: 9 }));
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::default();
        for index in [0, 3, 1, 4] {
            game.play(index).unwrap();
        }
        let report = game.play(2).unwrap();

        assert_eq!(report.outcome, GameOutcome::Win(Player::X));
        assert_eq!(report.line, Some([0, 1, 2]));
        assert!(game.is_over());
        // 终局后走子方不再切换
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.play(5), Err(RuleError::GameOver));
        assert_eq!(game.record().metadata.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.record().replay().unwrap(), *game.board());
    }

    #[test]
    fn test_draw() {
        let mut game = Game::default();
        // X O X / X O O / O X X
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.play(index).unwrap();
        }
        assert_eq!(game.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new("甲", "乙");
        game.play(0).unwrap();
        game.reset();

        assert_eq!(*game.board(), Board::empty());
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
        assert_eq!(game.version(), 1);
        assert!(game.record().moves.is_empty());
        assert_eq!(game.record().metadata.player_x, "甲");

        game.reset_with_labels("Player X", "AI");
        assert_eq!(game.version(), 2);
        assert_eq!(game.record().metadata.player_o, "AI");
    }
}
