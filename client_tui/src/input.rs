use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::{InputSnapshot, InputSource, InputState, Key};

/// Keyboard input from crossterm events
///
/// Most terminals never report key releases, only presses and auto-repeat.
/// Without release events a key counts as held until `hold_timeout` passes
/// with no repeat.
pub struct TerminalInput {
    state: InputState,
    last_seen: HashMap<Key, Instant>,
    hold_timeout: Duration,
    release_events: bool,
}

impl TerminalInput {
    pub fn new(hold_timeout: Duration, release_events: bool) -> Self {
        Self {
            state: InputState::new(),
            last_seen: HashMap::new(),
            hold_timeout,
            release_events,
        }
    }

    fn handle_key(&mut self, ev: KeyEvent, now: Instant) {
        let close = ev.code == KeyCode::Esc
            || (ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL));
        if close {
            if ev.kind != KeyEventKind::Release {
                self.state.request_close();
            }
            return;
        }

        let key = map_key(ev.code);
        match ev.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.state.key_down(key);
                self.last_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                self.release_events = true;
                self.state.key_up(key);
                self.last_seen.remove(&key);
            }
        }
    }

    fn release_all(&mut self) {
        for (key, _) in self.last_seen.drain() {
            self.state.key_up(key);
        }
    }

    /// Release keys whose repeats stopped arriving
    fn expire(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        let timeout = self.hold_timeout;
        let state = &mut self.state;
        self.last_seen.retain(|key, seen| {
            let held = now.duration_since(*seen) < timeout;
            if !held {
                state.key_up(*key);
            }
            held
        });
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char('w' | 'W') => Key::W,
        KeyCode::Char('s' | 'S') => Key::S,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char('r' | 'R') => Key::R,
        KeyCode::Char('q' | 'Q') => Key::Q,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(ev) => self.handle_key(ev, Instant::now()),
                Event::FocusLost => self.release_all(),
                _ => {}
            }
        }
        self.expire(Instant::now());
        Ok(self.state.take_snapshot())
    }
}
