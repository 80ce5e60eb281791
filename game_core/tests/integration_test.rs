use std::collections::VecDeque;
use std::io;

use game_core::*;
use glam::Vec2;
use hecs::World;
use proptest::prelude::*;

struct Sim {
    world: World,
    time: Time,
    map: GameMap,
    config: Config,
    score: Score,
    events: Events,
    serve: ServeState,
    rng: GameRng,
}

impl Sim {
    fn new() -> Self {
        let config = Config::new();
        let map = GameMap::from_config(&config);
        let mut world = World::new();
        create_paddle(&mut world, Side::Left, &config);
        create_paddle(&mut world, Side::Right, &config);
        Self {
            world,
            time: Time::default(),
            map,
            config,
            score: Score::new(),
            events: Events::new(),
            serve: ServeState::new(),
            rng: GameRng::new(7),
        }
    }

    fn step(&mut self, dt: f32) {
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
    }

    fn ball(&self) -> Ball {
        let mut query = self.world.query::<&Ball>();
        let (_e, ball) = query.iter().next().unwrap();
        *ball
    }

    fn paddle(&self, side: Side) -> Paddle {
        let mut query = self.world.query::<&Paddle>();
        let (_e, paddle) = query.iter().find(|(_e, p)| p.side == side).unwrap();
        *paddle
    }
}

#[test]
fn test_ball_moves_in_straight_line() {
    let mut game = Sim::new();
    create_ball(
        &mut game.world,
        Vec2::new(450.0, 300.0),
        Vec2::new(120.0, 60.0),
        8.0,
    );

    game.step(0.1);

    let ball = game.ball();
    assert!((ball.pos - Vec2::new(462.0, 306.0)).length() < 1e-3);
    assert_eq!(game.events, Events::new());
}

#[test]
fn test_ball_bounces_off_bottom_wall() {
    let mut game = Sim::new();
    create_ball(
        &mut game.world,
        Vec2::new(450.0, 595.0),
        Vec2::new(0.0, 200.0),
        8.0,
    );

    game.step(Params::FIXED_DT);

    let ball = game.ball();
    assert!(ball.vel.y < 0.0);
    assert_eq!(ball.pos.y, 592.0);
    assert!(game.events.ball_hit_wall);
}

#[test]
fn test_rally_off_left_paddle() {
    let mut game = Sim::new();
    let paddle = game.paddle(Side::Left);
    let center_y = paddle.rect().center().y;
    create_ball(
        &mut game.world,
        Vec2::new(paddle.rect().right() + 10.0, center_y),
        Vec2::new(-340.0, 0.0),
        8.0,
    );

    game.step(0.05);

    let ball = game.ball();
    assert!(ball.vel.x > 0.0, "Ball heads back right");
    assert!((ball.vel.length() - 340.0 * 1.05).abs() < 0.5);
    assert!(game.events.ball_hit_paddle);
    assert_eq!(game.score, Score::new());
}

#[test]
fn test_miss_awards_point_and_serves_toward_conceder() {
    let mut game = Sim::new();
    create_ball(
        &mut game.world,
        Vec2::new(5.0, 40.0),
        Vec2::new(-340.0, 0.0),
        8.0,
    );

    game.step(0.05);

    assert_eq!(game.score, Score { left: 0, right: 1 });
    assert!(game.events.right_scored);
    assert!(!game.events.left_scored);
    let ball = game.ball();
    assert_eq!(ball.pos, game.map.ball_spawn());
    assert!(ball.vel.x < 0.0, "Left conceded, so the serve goes left");
    assert!(!game.serve.in_play());

    // Ball waits at center for the serve pause
    game.step(0.1);
    assert_eq!(game.ball().pos, game.map.ball_spawn());
}

#[test]
fn test_large_dt_is_clamped() {
    let mut game = Sim::new();
    create_ball(
        &mut game.world,
        Vec2::new(450.0, 300.0),
        Vec2::new(100.0, 0.0),
        8.0,
    );

    game.step(5.0);

    let ball = game.ball();
    assert!((ball.pos.x - (450.0 + 100.0 * Params::MAX_DT)).abs() < 1e-3);
    assert!((game.time.now - Params::MAX_DT).abs() < 1e-6);
}

#[test]
fn test_negative_and_nan_dt_do_nothing() {
    let mut game = Sim::new();
    create_ball(
        &mut game.world,
        Vec2::new(450.0, 300.0),
        Vec2::new(100.0, 50.0),
        8.0,
    );

    game.step(-1.0);
    game.step(f32::NAN);

    assert_eq!(game.ball().pos, Vec2::new(450.0, 300.0));
    assert_eq!(game.time.now, 0.0);
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<Frame>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

struct ScriptedInput {
    script: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    fn new(script: Vec<InputSnapshot>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        Ok(self.script.pop_front().unwrap_or(InputSnapshot {
            close_requested: true,
            ..InputSnapshot::new()
        }))
    }
}

struct BrokenInput;

impl InputSource for BrokenInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        Err(io::Error::other("keyboard unplugged"))
    }
}

#[test]
fn test_loop_runs_until_close() {
    let mut script = vec![InputSnapshot::with_presses(&[Key::Space])];
    script.extend((0..5).map(|_| InputSnapshot::with_directions(Direction::Up, Direction::Down)));

    let session = GameSession::new(Config::new(), 11).unwrap();
    let mut game = GameLoop::new(session, RecordingRenderer::default(), ScriptedInput::new(script))
        .with_target_fps(1000);

    assert!(game.run().is_ok());

    let frames = &game.renderer().frames;
    assert_eq!(frames.len(), 6);
    assert!(frames.iter().all(|f| f.commands[0] == DrawCommand::Clear(Color::BLACK)));
    assert_eq!(game.session().state(), MatchState::Playing);

    let left = game.session().paddle(Side::Left).unwrap();
    let right = game.session().paddle(Side::Right).unwrap();
    let center = (600.0 - 100.0) / 2.0;
    assert!(left.pos.y < center);
    assert!(right.pos.y > center);
}

#[test]
fn test_input_failure_ends_loop_with_error() {
    let session = GameSession::new(Config::new(), 11).unwrap();
    let mut game = GameLoop::new(session, RecordingRenderer::default(), BrokenInput);

    assert!(matches!(game.run(), Err(LoopError::Input(_))));
    assert!(game.renderer().frames.is_empty());
}

#[test]
fn test_full_match_then_restart_then_quit() {
    let config = Config {
        win_score: 2,
        ..Config::new()
    };
    let mut session = GameSession::new(config, 5).unwrap();
    session.update(&InputSnapshot::with_presses(&[Key::Enter]), 0.0);

    // Right misses twice
    for expected in 1..=2 {
        session.release_serve();
        for (_e, ball) in session.world_mut().query_mut::<&mut Ball>() {
            ball.pos = Vec2::new(895.0, 50.0);
            ball.vel = Vec2::new(400.0, 0.0);
        }
        session.update(&InputSnapshot::new(), 0.05);
        assert_eq!(session.score().left, expected);
        assert!(session.events().left_scored);
    }

    assert_eq!(
        session.state(),
        MatchState::GameOver {
            winner: Side::Left
        }
    );
    let over = session.frame();
    assert!(over.texts().any(|t| t == "Green wins!"));

    // Simulation is frozen on the game over screen
    let ball = session.ball().unwrap();
    session.update(&InputSnapshot::new(), 0.1);
    assert_eq!(session.ball().unwrap().pos, ball.pos);

    session.update(&InputSnapshot::with_presses(&[Key::R]), 0.0);
    assert_eq!(session.state(), MatchState::Playing);
    assert_eq!(session.score(), Score::new());

    // Quit is only honoured once the match is over
    assert_eq!(
        session.update(&InputSnapshot::with_presses(&[Key::Q]), 0.0),
        LoopControl::Continue
    );
}

#[test]
fn test_config_file_drives_session() {
    let config = Config::from_toml_str(
        r#"
        win_score = 3
        ball_speed_initial = 200.0
        serve_direction = "random"
        "#,
    )
    .unwrap();
    let mut session = GameSession::new(config, 9).unwrap();
    session.update(&InputSnapshot::with_presses(&[Key::Other]), 0.0);

    let ball = session.ball().unwrap();
    assert!((ball.vel.length() - 200.0).abs() < 1e-3);
    assert_eq!(session.config().win_score, 3);
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::None)
    ]
}

proptest! {
    #[test]
    fn prop_paddles_stay_on_field(moves in prop::collection::vec((direction(), direction(), 0.0f32..0.2), 1..60)) {
        let mut session = GameSession::new(Config::new(), 1).unwrap();
        session.update(&InputSnapshot::with_presses(&[Key::Space]), 0.0);

        for (left, right, dt) in moves {
            session.update(&InputSnapshot::with_directions(left, right), dt);
            for side in [Side::Left, Side::Right] {
                let paddle = session.paddle(side).unwrap();
                prop_assert!(paddle.pos.y >= 0.0);
                prop_assert!(paddle.pos.y + paddle.size.y <= 600.0 + 1e-3);
            }
        }
    }

    #[test]
    fn prop_ball_stays_between_walls_and_flips_on_bounce(
        x in 50.0f32..850.0,
        y in 8.0f32..592.0,
        vx in -800.0f32..800.0,
        vy in -800.0f32..800.0,
        dts in prop::collection::vec(0.0f32..0.1, 1..40),
    ) {
        let mut game = Sim::new();
        create_ball(&mut game.world, Vec2::new(x, y), Vec2::new(vx, vy), 8.0);

        for dt in dts {
            let before = game.ball().vel.y;
            game.step(dt);
            let ball = game.ball();
            prop_assert!(ball.pos.y >= 8.0 && ball.pos.y <= 592.0, "y = {}", ball.pos.y);

            // At most one wall fits in a capped step, so a lone wall hit flips vy once
            let events = game.events;
            if events.ball_hit_wall && !events.ball_hit_paddle && !events.scored() {
                prop_assert!(
                    before * ball.vel.y < 0.0,
                    "vy {} -> {} after a wall bounce",
                    before,
                    ball.vel.y
                );
            }
        }
    }

    #[test]
    fn prop_score_only_grows_one_point_at_a_time(
        x in 0.0f32..900.0,
        y in 8.0f32..592.0,
        vx in -900.0f32..900.0,
        vy in -300.0f32..300.0,
        dts in prop::collection::vec(0.0f32..0.1, 1..80),
    ) {
        let mut game = Sim::new();
        create_ball(&mut game.world, Vec2::new(x, y), Vec2::new(vx, vy), 8.0);

        let mut total = 0;
        for dt in dts {
            game.step(dt);
            let now = game.score.left + game.score.right;
            prop_assert!(now == total || now == total + 1);
            prop_assert_eq!(now > total, game.events.scored());
            total = now;
        }
    }
}
