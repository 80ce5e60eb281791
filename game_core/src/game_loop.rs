//! Frame loop: poll input, update the session, render.

use std::time::{Duration, Instant};

use crate::error::LoopError;
use crate::input::InputSource;
use crate::params::Params;
use crate::render::Renderer;
use crate::session::{GameSession, LoopControl};

/// Wall-clock frame timing with a spiral-of-death cap
pub struct FrameClock {
    frame_budget: Duration,
    max_dt: f32,
    last_instant: Instant,
    frame_start: Instant,
    pub frame_count: u64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            max_dt: Params::MAX_DT,
            last_instant: now,
            frame_start: now,
            frame_count: 0,
        }
    }

    /// Seconds since the previous frame began, capped at `MAX_DT`
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.frame_start = now;
        self.frame_count += 1;

        if dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms, capping to {:.0}ms",
                dt * 1000.0,
                self.max_dt * 1000.0
            );
            dt = self.max_dt;
        }
        dt
    }

    /// Sleep off whatever is left of this frame's budget
    pub fn end_frame(&self) {
        let spent = self.frame_start.elapsed();
        if let Some(rest) = self.frame_budget.checked_sub(spent) {
            std::thread::sleep(rest);
        }
    }
}

/// Owns the session and both collaborators for the life of the process
pub struct GameLoop<R: Renderer, I: InputSource> {
    session: GameSession,
    renderer: R,
    input: I,
    target_fps: u32,
}

impl<R: Renderer, I: InputSource> GameLoop<R, I> {
    pub fn new(session: GameSession, renderer: R, input: I) -> Self {
        Self {
            session,
            renderer,
            input,
            target_fps: Params::TARGET_FPS,
        }
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// One frame: input → update → render, in that order
    pub fn frame(&mut self, dt: f32) -> Result<LoopControl, LoopError> {
        let input = self.input.poll().map_err(LoopError::Input)?;

        if input.close_requested {
            log::info!("Close requested");
            return Ok(LoopControl::Exit);
        }

        if self.session.update(&input, dt) == LoopControl::Exit {
            return Ok(LoopControl::Exit);
        }

        self.renderer
            .render(&self.session.frame())
            .map_err(LoopError::Render)?;
        Ok(LoopControl::Continue)
    }

    /// Run until quit or close; collaborator failures end the loop with an error
    pub fn run(&mut self) -> Result<(), LoopError> {
        let mut clock = FrameClock::new(self.target_fps);
        log::info!("Game loop started at {} fps", self.target_fps);

        loop {
            let dt = clock.begin_frame();
            if self.frame(dt)? == LoopControl::Exit {
                break;
            }
            clock.end_frame();
        }

        log::info!("Game loop finished after {} frames", clock.frame_count);
        Ok(())
    }
}
