use glam::Vec2;
use hecs::World;

use crate::error::ConfigError;
use crate::fsm::{GameAction, GameFsm, MatchState};
use crate::input::InputSnapshot;
use crate::render::{compose, Frame};
use crate::systems::{apply_intents, serve_ball};
use crate::{
    create_ball, create_paddle, step, Ball, Config, Events, GameMap, GameRng, Paddle,
    PaddleIntent, Score, ServeState, Side, Time,
};

/// Whether the orchestrator should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// All state of one local match, owned by the game loop
pub struct GameSession {
    world: World,
    time: Time,
    map: GameMap,
    config: Config,
    score: Score,
    events: Events,
    serve: ServeState,
    rng: GameRng,
    fsm: GameFsm,
}

impl GameSession {
    /// Validate `config` and set up paddles and ball on the title screen
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let map = GameMap::from_config(&config);
        let mut world = World::new();
        create_paddle(&mut world, Side::Left, &config);
        create_paddle(&mut world, Side::Right, &config);
        create_ball(&mut world, map.ball_spawn(), Vec2::ZERO, config.ball_radius);

        log::info!(
            "New session: field {}x{}, first to {}, seed {}",
            map.width,
            map.height,
            config.win_score,
            seed
        );

        Ok(Self {
            world,
            time: Time::default(),
            map,
            config,
            score: Score::new(),
            events: Events::new(),
            serve: ServeState::new(),
            rng: GameRng::new(seed),
            fsm: GameFsm::new(),
        })
    }

    /// Run one tick: key presses, simulation, then win evaluation
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> LoopControl {
        for &key in &input.pressed {
            let result = self.fsm.transition(GameAction::from_key(key));
            if result.exit {
                return LoopControl::Exit;
            }
            if result.success && result.to_state == MatchState::Playing {
                self.begin_match();
            }
        }

        if !self.fsm.is_playing() {
            self.events.clear();
            return LoopControl::Continue;
        }

        apply_intents(&mut self.world, input.left, input.right);
        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.map,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.serve,
            &mut self.rng,
        );

        if let Some(winner) = self.score.has_winner(self.config.win_score) {
            self.fsm.transition(GameAction::WinnerDecided(winner));
            log::info!(
                "{} wins the match {} - {}",
                winner.name(),
                self.score.left,
                self.score.right
            );
        }

        LoopControl::Continue
    }

    /// Fresh score, centered paddles, opening serve
    fn begin_match(&mut self) {
        self.score.reset();
        self.events.clear();
        for (_entity, (paddle, intent)) in self
            .world
            .query_mut::<(&mut Paddle, &mut PaddleIntent)>()
        {
            paddle.reset(self.map.height);
            *intent = PaddleIntent::new();
        }
        serve_ball(
            &mut self.world,
            &self.map,
            &self.config,
            &mut self.serve,
            &mut self.rng,
            None,
        );
    }

    /// Draw list for the current state
    pub fn frame(&self) -> Frame {
        let paddles = [self.paddle(Side::Left), self.paddle(Side::Right)];
        let paddles: Vec<Paddle> = paddles.into_iter().flatten().collect();
        let ball = self.ball();
        compose(
            &self.map,
            &paddles,
            ball.as_ref(),
            &self.score,
            self.fsm.state(),
        )
    }

    pub fn state(&self) -> MatchState {
        self.fsm.state()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Events from the most recent tick
    pub fn events(&self) -> Events {
        self.events
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn time(&self) -> Time {
        self.time
    }

    /// Ball is waiting at center for the serve pause to elapse
    pub fn is_serving(&self) -> bool {
        !self.serve.in_play()
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, b)| *b)
    }

    /// Direct world access for tests and tools
    #[doc(hidden)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[doc(hidden)]
    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    /// Skip the remaining serve pause
    #[doc(hidden)]
    pub fn release_serve(&mut self) {
        self.serve = ServeState::new();
    }
}
