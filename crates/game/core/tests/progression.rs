use std::sync::Mutex;

use maze_core::{
    Cell, CoinReason, Command, CommandError, Difficulty, Direction, Env, ExecuteError, GameConfig,
    GameEngine, GameEvent, GameState, Grid, MoveReason, PcgRng, Phase, Position, ProgressError,
    ProgressOracle, Question, QuestionBank, QuestionId, QuestionSource, TimeoutTicket, Warning,
    start_session,
};

/// Straight corridor: right along the top row, then down the last column.
/// The origin carries the `DeadEnd` marking every generated maze has.
const CORRIDOR: &str = "
    x....
    ####.
    ####.
    ####.
    ####.
";

#[derive(Default)]
struct MemoryProgress {
    completed: Mutex<Vec<Difficulty>>,
    total: Mutex<i64>,
    failing: bool,
}

impl MemoryProgress {
    fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ProgressError> {
        if self.failing {
            Err(ProgressError::Unavailable("disk unplugged".into()))
        } else {
            Ok(())
        }
    }
}

impl ProgressOracle for MemoryProgress {
    fn load_custom_questions(&self) -> Result<Vec<Question>, ProgressError> {
        self.check()?;
        Ok(vec![Question {
            source: QuestionSource::Custom,
            ..question("custom-1")
        }])
    }

    fn load_disabled_ids(&self) -> Result<Vec<QuestionId>, ProgressError> {
        self.check()?;
        Ok(vec![QuestionId::new("q-0")])
    }

    fn load_completed_difficulties(&self) -> Result<Vec<Difficulty>, ProgressError> {
        self.check()?;
        Ok(self.completed.lock().unwrap().clone())
    }

    fn save_completed_difficulty(&self, tier: Difficulty) -> Result<(), ProgressError> {
        self.check()?;
        let mut completed = self.completed.lock().unwrap();
        if !completed.contains(&tier) {
            completed.push(tier);
        }
        Ok(())
    }

    fn load_total_coins(&self) -> Result<i64, ProgressError> {
        self.check()?;
        Ok(*self.total.lock().unwrap())
    }

    fn save_total_coins(&self, total: i64) -> Result<(), ProgressError> {
        self.check()?;
        *self.total.lock().unwrap() = total;
        Ok(())
    }
}

fn question(id: &str) -> Question {
    Question {
        id: QuestionId::new(id),
        text: format!("Question {id}?"),
        answer: "A".into(),
        explanation: format!("Because of {id}."),
        options: Some(vec!["yes".into(), "no".into(), "maybe".into(), "never".into()]),
        difficulty: Difficulty::Easy,
        source: QuestionSource::Builtin,
    }
}

fn questions(prefix: &str, count: usize) -> Vec<Question> {
    (0..count).map(|i| question(&format!("{prefix}-{i}"))).collect()
}

struct Harness {
    state: GameState,
    rng: PcgRng,
    progress: MemoryProgress,
}

impl Harness {
    fn new(layout: &str, pool: Vec<Question>) -> Self {
        Self::with_pools(layout, pool, Vec::new())
    }

    fn with_pools(layout: &str, pool: Vec<Question>, dead_end_pool: Vec<Question>) -> Self {
        let grid = Grid::parse(layout).unwrap();
        Self {
            state: GameState::from_grid(
                GameConfig::default(),
                Difficulty::Easy,
                7,
                grid,
                pool,
                dead_end_pool,
            ),
            rng: PcgRng,
            progress: MemoryProgress::default(),
        }
    }

    fn run(&mut self, command: Command) -> Result<Vec<GameEvent>, ExecuteError> {
        let env = Env::with_all(&self.rng, &self.progress).into_game_env();
        GameEngine::new(&mut self.state)
            .execute(&env, &command)
            .map(|outcome| outcome.events)
    }

    fn step(&mut self, direction: Direction) -> Vec<GameEvent> {
        self.run(Command::step(direction)).unwrap()
    }

    fn rejection(&mut self, command: Command) -> CommandError {
        match self.run(command) {
            Err(ExecuteError::Rejected { error, .. }) => error,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    /// Answers the pending question, correctly or not.
    fn answer(&mut self, correct: bool) -> Vec<GameEvent> {
        let Phase::AwaitingAnswer { question, .. } = &self.state.session.phase else {
            panic!("no question pending: {:?}", self.state.session.phase);
        };
        let raw = if correct {
            format!("  {} ", question.answer.to_lowercase())
        } else {
            "Z".to_string()
        };
        self.run(Command::answer(raw)).unwrap()
    }

    fn advance(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = self.step(direction);
        events.extend(self.answer(true));
        events
    }

    fn place_player(&mut self, position: Position) {
        self.state.maze.player = position;
        self.state.session.first_move = false;
        self.state.recompute_remaining();
    }
}

fn armed_ticket(events: &[GameEvent]) -> TimeoutTicket {
    events
        .iter()
        .find_map(|event| match event {
            GameEvent::TimeoutArmed { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("a timeout should have been armed")
}

fn count(events: &[GameEvent], predicate: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

fn walk_corridor(harness: &mut Harness) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..4 {
        events.extend(harness.advance(Direction::Right));
    }
    for _ in 0..4 {
        events.extend(harness.advance(Direction::Down));
    }
    events
}

#[test]
fn answering_every_question_completes_the_run() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 10));
    assert_eq!(harness.state.session.remaining, 8);

    let mut remaining = Vec::new();
    for direction in [Direction::Right; 4].into_iter().chain([Direction::Down; 4]) {
        harness.advance(direction);
        remaining.push(harness.state.session.remaining);
    }

    assert_eq!(remaining, [7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(harness.state.player(), Position::new(4, 4));
    assert_eq!(harness.state.session.balance, 80);
    assert_eq!(harness.state.session.phase, Phase::Complete);
    assert_eq!(harness.state.session.pool.len(), 2);
    assert_eq!(harness.state.grid().cell(Position::new(2, 0)), Some(Cell::CorrectPath));

    assert_eq!(*harness.progress.completed.lock().unwrap(), [Difficulty::Easy]);
    assert_eq!(*harness.progress.total.lock().unwrap(), 80 + 50);
    assert!(*harness.progress.total.lock().unwrap() >= 80);

    assert_eq!(
        harness.rejection(Command::step(Direction::Left)),
        CommandError::SessionComplete
    );
}

#[test]
fn completing_the_last_tier_awards_the_all_clear_bonus_once() {
    let mut first = Harness::new(CORRIDOR, questions("q", 8));
    *first.progress.completed.lock().unwrap() = vec![Difficulty::Medium, Difficulty::Hard];
    *first.progress.total.lock().unwrap() = 1_000;

    let events = walk_corridor(&mut first);
    let summary = events
        .iter()
        .find_map(|event| match event {
            GameEvent::GameCompleted(summary) => Some(summary.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(summary.all_clear_bonus, 200);
    assert_eq!(summary.total_coins, 1_000 + 80 + 50 + 200);

    let mut second = Harness::new(CORRIDOR, questions("q", 8));
    second.progress = first.progress;
    walk_corridor(&mut second);
    assert_eq!(
        *second.progress.total.lock().unwrap(),
        1_000 + 80 + 50 + 200 + 80 + 50
    );
}

#[test]
fn only_one_question_is_in_flight() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));

    let events = harness.step(Direction::Right);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::QuestionIssued { .. })), 1);
    assert!(harness.state.session.move_locked);

    let before = harness.state.clone();
    assert_eq!(
        harness.rejection(Command::step(Direction::Right)),
        CommandError::MoveLocked
    );
    assert_eq!(harness.state, before);
    assert_eq!(harness.state.session.pool.len(), 4);
    assert_eq!(harness.state.player(), Position::ORIGIN);
}

#[test]
fn wrong_first_answer_without_coins_retreats_to_origin() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.step(Direction::Right);

    let events = harness.answer(false);

    assert_eq!(harness.state.player(), Position::ORIGIN);
    assert_eq!(harness.state.session.balance, -5 - 2);
    assert_eq!(harness.state.session.remaining, 8);
    assert!(!harness.state.session.move_locked);
    assert_eq!(harness.state.session.phase, Phase::Idle);
    assert!(events.contains(&GameEvent::MoveExecuted {
        from: Position::ORIGIN,
        to: Position::ORIGIN,
        reason: MoveReason::Retreat,
    }));
    assert_eq!(count(&events, |e| matches!(e, GameEvent::TimeoutCancelled { .. })), 1);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::OverrideOffered { .. })), 0);
}

#[test]
fn retreat_targets_the_last_recorded_dead_end() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 8));

    // First failure marks (1, 0) and sends the player home.
    harness.step(Direction::Right);
    harness.answer(false);
    assert_eq!(harness.state.grid().cell(Position::new(1, 0)), Some(Cell::DeadEnd));
    assert_eq!(harness.state.session.last_dead_end, Some(Position::new(1, 0)));

    // Entering the marked cell costs the dead-end penalty on top of the reward.
    harness.advance(Direction::Right);
    assert!(harness.state.session.in_dead_end);
    assert_eq!(harness.state.session.balance, -7 + 10 - 2);
    // Standing on a dead end records it as the retreat target too.
    assert_eq!(harness.state.session.last_dead_end, Some(Position::new(1, 0)));

    harness.advance(Direction::Right);
    harness.step(Direction::Right);
    harness.answer(false);
    harness.run(Command::ResolveOverride { accept: false }).unwrap();

    // Retreat goes to the dead end recorded before this failure.
    assert_eq!(harness.state.player(), Position::new(1, 0));
    assert_eq!(harness.state.session.last_dead_end, Some(Position::new(3, 0)));
    assert_eq!(
        harness.state.maze.dead_ends,
        [Position::new(1, 0), Position::new(3, 0)]
    );
}

#[test]
fn accepted_override_moves_and_charges() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = 20;
    let ticket = armed_ticket(&harness.step(Direction::Right));

    let events = harness.answer(false);
    assert_eq!(harness.state.session.balance, 15);
    assert!(events.contains(&GameEvent::OverrideOffered {
        target: Position::new(1, 0),
        cost: 5,
    }));
    assert!(harness.state.session.move_locked);

    let events = harness.run(Command::ResolveOverride { accept: true }).unwrap();
    assert_eq!(harness.state.player(), Position::new(1, 0));
    assert_eq!(harness.state.session.balance, 10);
    assert_eq!(harness.state.session.remaining, 7);
    assert!(!harness.state.session.move_locked);
    assert!(events.contains(&GameEvent::TimeoutCancelled { ticket }));
    assert_eq!(harness.state.grid().cell(Position::new(1, 0)), Some(Cell::Path));
}

#[test]
fn declined_override_retreats() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = 20;
    harness.step(Direction::Right);
    harness.answer(false);

    harness.run(Command::ResolveOverride { accept: false }).unwrap();
    assert_eq!(harness.state.player(), Position::ORIGIN);
    assert_eq!(harness.state.session.balance, 20 - 5 - 2);
    assert_eq!(
        harness.rejection(Command::ResolveOverride { accept: true }),
        CommandError::NoPendingDecision
    );
}

#[test]
fn timeout_unlocks_and_stale_tickets_are_ignored() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    let ticket = armed_ticket(&harness.step(Direction::Right));

    assert_eq!(
        harness.rejection(Command::Timeout { ticket: ticket.next() }),
        CommandError::StaleTimeout { ticket: ticket.next() }
    );

    let events = harness.run(Command::Timeout { ticket }).unwrap();
    assert!(events.contains(&GameEvent::Warning(Warning::QuestionTimedOut)));
    assert!(!harness.state.session.move_locked);
    assert_eq!(harness.state.session.phase, Phase::Idle);
    assert_eq!(harness.state.player(), Position::ORIGIN);
    assert_eq!(harness.state.session.pool.len(), 4);

    assert_eq!(
        harness.rejection(Command::Timeout { ticket }),
        CommandError::StaleTimeout { ticket }
    );

    // A timeout for an answered question arrives too late to matter.
    let next = armed_ticket(&harness.step(Direction::Right));
    assert_ne!(next, ticket);
    harness.answer(true);
    assert_eq!(
        harness.rejection(Command::Timeout { ticket: next }),
        CommandError::StaleTimeout { ticket: next }
    );
}

#[test]
fn timeout_during_override_offer_counts_as_declined() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = 20;
    let ticket = armed_ticket(&harness.step(Direction::Right));
    harness.answer(false);

    let events = harness.run(Command::Timeout { ticket }).unwrap();
    assert_eq!(harness.state.player(), Position::ORIGIN);
    assert_eq!(harness.state.session.balance, 13);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::TimeoutCancelled { .. })), 0);
    assert!(!harness.state.session.move_locked);
}

#[test]
fn exhausted_pool_allows_free_movement() {
    let mut harness = Harness::new(CORRIDOR, Vec::new());
    let events = harness.step(Direction::Right);

    assert_eq!(count(&events, |e| matches!(e, GameEvent::QuestionIssued { .. })), 0);
    assert!(events.contains(&GameEvent::MoveExecuted {
        from: Position::ORIGIN,
        to: Position::new(1, 0),
        reason: MoveReason::Free,
    }));
    assert_eq!(harness.state.session.remaining, 7);
    assert_eq!(harness.state.session.balance, 0);
}

#[test]
fn coins_are_collected_once() {
    let mut harness = Harness::new(
        "
        ..$..
        ####.
        ####.
        ####.
        ####.
        ",
        Vec::new(),
    );

    let mut events = Vec::new();
    for direction in [Direction::Right, Direction::Right, Direction::Left, Direction::Right] {
        events.extend(harness.step(direction));
    }

    assert_eq!(count(&events, |e| matches!(e, GameEvent::CoinCollected { .. })), 1);
    assert_eq!(harness.state.session.balance, 5);
    assert!(harness.state.maze.coins.is_empty());
    assert_eq!(harness.state.grid().cell(Position::new(2, 0)), Some(Cell::Path));
}

#[test]
fn debt_relief_is_offered_once_and_resets_balance() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = -46;
    harness.step(Direction::Right);

    let events = harness.answer(false);
    assert_eq!(harness.state.session.balance, -53);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::DebtReliefOffered { .. })), 1);
    assert!(harness.state.session.debt_relief_pending);

    let events = harness.run(Command::ResolveDebtRelief { accept: true }).unwrap();
    assert_eq!(harness.state.session.balance, 0);
    assert_eq!(
        events,
        [GameEvent::CoinsChanged {
            delta: 53,
            balance: 0,
            reason: CoinReason::DebtRelief,
        }]
    );
    assert_eq!(
        harness.rejection(Command::ResolveDebtRelief { accept: true }),
        CommandError::NoPendingDecision
    );
}

#[test]
fn declined_debt_relief_keeps_playing() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = -60;
    harness.step(Direction::Right);
    harness.answer(false);

    harness.run(Command::ResolveDebtRelief { accept: false }).unwrap();
    assert_eq!(harness.state.session.balance, -67);

    // Still in debt: the next penalty offers relief again.
    harness.step(Direction::Right);
    let events = harness.answer(false);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::DebtReliefOffered { .. })), 1);
}

#[test]
fn reaching_the_exit_early_is_a_false_exit() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    harness.state.session.balance = 20;
    harness.place_player(Position::new(4, 3));
    assert_eq!(harness.state.session.remaining, 1);

    harness.step(Direction::Down);
    harness.answer(false);
    let events = harness.run(Command::ResolveOverride { accept: true }).unwrap();

    assert!(events.contains(&GameEvent::Warning(Warning::FalseExit)));
    assert_eq!(harness.state.player(), Position::ORIGIN);
    assert_eq!(harness.state.session.remaining, 8);
    assert_ne!(harness.state.session.phase, Phase::Complete);
    assert_eq!(*harness.progress.total.lock().unwrap(), 0);
}

#[test]
fn dead_ends_are_closed_once_nothing_remains() {
    // Unreachable exit: the counter is forced to zero.
    let mut harness = Harness::new(
        "
        ..x##
        #####
        #####
        #####
        ####.
        ",
        questions("q", 5),
    );
    assert_eq!(harness.state.session.remaining, 0);

    let events = harness.step(Direction::Right);
    assert!(events.iter().any(|e| matches!(e, GameEvent::ConsistencyViolation { .. })));
    assert_eq!(harness.state.player(), Position::new(1, 0));

    let events = harness.step(Direction::Right);
    assert_eq!(events, [GameEvent::Warning(Warning::DeadEndBlocked)]);
    assert_eq!(harness.state.player(), Position::new(1, 0));
    assert_eq!(harness.state.session.pool.len(), 5);
}

#[test]
fn invalid_input_is_a_silent_no_op() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 5));
    let before = harness.state.clone();

    assert_eq!(
        harness.rejection(Command::Move { dx: 1, dy: 1 }),
        CommandError::InvalidDirection { dx: 1, dy: 1 }
    );
    assert_eq!(
        harness.rejection(Command::Move { dx: 0, dy: 0 }),
        CommandError::InvalidDirection { dx: 0, dy: 0 }
    );
    assert_eq!(
        harness.rejection(Command::step(Direction::Up)),
        CommandError::OutOfBounds {
            target: Position::new(0, -1)
        }
    );
    assert_eq!(
        harness.rejection(Command::step(Direction::Down)),
        CommandError::Blocked {
            target: Position::new(0, 1)
        }
    );
    assert_eq!(
        harness.rejection(Command::answer("A")),
        CommandError::NoPendingQuestion
    );
    assert_eq!(harness.state, before);
}

#[test]
fn dead_end_occupants_draw_dead_end_questions() {
    let mut harness = Harness::with_pools(
        "
        .x...
        ####.
        ####.
        ####.
        ####.
        ",
        questions("q", 5),
        questions("dead", 1),
    );

    harness.advance(Direction::Right);
    assert!(harness.state.session.in_dead_end);
    assert_eq!(harness.state.session.balance, 10 - 2);

    harness.step(Direction::Right);
    let Phase::AwaitingAnswer { question, .. } = &harness.state.session.phase else {
        panic!("question expected");
    };
    assert_eq!(question.id.as_str(), "dead-0");
    assert_eq!(harness.state.session.consumed_dead_end, [QuestionId::new("dead-0")]);

    harness.answer(true);
    assert!(!harness.state.session.in_dead_end);
}

fn pending_question_id(harness: &Harness) -> String {
    let Phase::AwaitingAnswer { question, .. } = &harness.state.session.phase else {
        panic!("question expected: {:?}", harness.state.session.phase);
    };
    question.id.as_str().to_string()
}

#[test]
fn leaving_the_origin_draws_from_the_dead_end_pool() {
    let mut harness = Harness::with_pools(CORRIDOR, questions("q", 5), questions("dead", 2));
    assert!(harness.state.session.in_dead_end);

    harness.step(Direction::Right);
    assert!(pending_question_id(&harness).starts_with("dead-"));
    harness.answer(true);
    assert!(!harness.state.session.in_dead_end);

    // A regenerated maze puts the player back on the marked origin.
    harness.run(Command::Regenerate).unwrap();
    assert_eq!(harness.state.grid().cell(Position::ORIGIN), Some(Cell::DeadEnd));
    assert!(harness.state.session.in_dead_end);

    harness.step(Direction::Right);
    assert!(pending_question_id(&harness).starts_with("dead-"));
    assert_eq!(harness.state.session.consumed_dead_end.len(), 2);
    assert_eq!(harness.state.session.pool.len(), 5);
}

#[test]
fn progress_failures_do_not_block_completion() {
    let mut harness = Harness::new(CORRIDOR, questions("q", 8));
    harness.progress = MemoryProgress::failing();

    let events = walk_corridor(&mut harness);
    assert_eq!(harness.state.session.phase, Phase::Complete);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::PersistenceFailed(_))),
        3
    );
    assert_eq!(count(&events, |e| matches!(e, GameEvent::GameCompleted(_))), 1);
}

#[test]
fn regeneration_keeps_balance_and_pool() {
    let bank = QuestionBank::new(questions("q", 6), Vec::new());
    let rng = PcgRng;
    let progress = MemoryProgress::default();
    let env = Env::with_all(&rng, &progress).into_game_env();

    let (mut state, events) =
        start_session(&env, &bank, GameConfig::default(), Difficulty::Easy, 42).unwrap();
    assert!(events.iter().any(|e| matches!(e, GameEvent::MazeRegenerated { size: 5, .. })));
    // q-0 is disabled; the custom question joins the pool.
    assert_eq!(state.session.pool.len(), 6);
    assert!(state.session.pool.iter().all(|q| q.id.as_str() != "q-0"));
    assert!(state.session.remaining >= 8);

    state.session.balance = 33;
    let events = GameEngine::new(&mut state)
        .execute(&env, &Command::Regenerate)
        .unwrap()
        .events;

    assert!(events.contains(&GameEvent::MazeRegenerated {
        size: 5,
        digest: state.grid().digest(),
    }));
    assert_eq!(state.maze.generation, 1);
    assert_eq!(state.player(), Position::ORIGIN);
    assert_eq!(state.session.balance, 33);
    assert_eq!(state.session.pool.len(), 6);
    assert!(state.session.first_move);

    // The origin's neighbours are always open, so this move asks a question.
    GameEngine::new(&mut state)
        .execute(&env, &Command::step(Direction::Right))
        .unwrap();
    assert!(state.session.move_locked);
    assert!(matches!(
        GameEngine::new(&mut state).execute(&env, &Command::Regenerate),
        Err(ExecuteError::Rejected {
            error: CommandError::MoveLocked,
            ..
        })
    ));
}

#[test]
fn missing_collaborators_are_fatal() {
    let mut state = Harness::new(CORRIDOR, Vec::new()).state;
    let env = Env::<PcgRng, MemoryProgress>::empty().into_game_env();
    assert!(matches!(
        GameEngine::new(&mut state).execute(&env, &Command::step(Direction::Right)),
        Err(ExecuteError::Oracle(_))
    ));
}
