//! Terminal input to game commands.
//!
//! Terminals speaking the kitty keyboard protocol report key releases, and
//! those drive `Command::Release` directly. Classic terminals only send a
//! press followed by OS auto-repeat; there the held state is inferred from
//! the repeat stream and a release is synthesised once it goes quiet.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::Command;

/// How long a fresh press counts as held before the first auto-repeat must
/// arrive. Above the common 500–660 ms OS repeat delays.
pub const FIRST_REPEAT_MS: u64 = 700;
/// How long a repeating key counts as held after each repeat.
pub const REPEAT_WINDOW_MS: u64 = 120;

// ── Held-key tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct HeldKey {
    last_seen: Option<u64>,
    repeating: bool,
}

impl HeldKey {
    /// Record a press or repeat. Returns `true` for a fresh press.
    pub fn press(&mut self, now_ms: u64) -> bool {
        let fresh = self.last_seen.is_none();
        self.repeating = !fresh;
        self.last_seen = Some(now_ms);
        fresh
    }

    /// Returns `true` if the key was held.
    pub fn release(&mut self) -> bool {
        self.repeating = false;
        self.last_seen.take().is_some()
    }

    /// Release the key if it has gone quiet for too long.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let window = if self.repeating { REPEAT_WINDOW_MS } else { FIRST_REPEAT_MS };
        match self.last_seen {
            Some(last) if now_ms.saturating_sub(last) > window => self.release(),
            _ => false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.last_seen.is_some()
    }
}

// ── Mapper ────────────────────────────────────────────────────────────────────

/// Space and the left mouse button both work the jetpack. While either is
/// down the other's presses and releases are swallowed.
#[derive(Debug)]
pub struct InputMapper {
    space: HeldKey,
    mouse_down: bool,
    reports_release: bool,
}

impl InputMapper {
    /// `reports_release` is what the terminal claims up front; a real release
    /// event later switches it on regardless.
    pub fn new(reports_release: bool) -> Self {
        InputMapper { space: HeldKey::default(), mouse_down: false, reports_release }
    }

    /// Whether releases come from the terminal rather than from expiry.
    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn map(&mut self, ev: &Event, now_ms: u64, commands: &mut Vec<Command>) {
        match ev {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => match (code, kind) {
                (KeyCode::Char(' '), KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if self.space.press(now_ms) && !self.mouse_down {
                        commands.push(Command::Press);
                    }
                }
                (KeyCode::Char(' '), KeyEventKind::Release) => {
                    if !self.reports_release {
                        log::info!("terminal reports key releases, synthetic release off");
                        self.reports_release = true;
                    }
                    if self.space.release() && !self.mouse_down {
                        commands.push(Command::Release);
                    }
                }
                (KeyCode::Esc, KeyEventKind::Press) => commands.push(Command::Quit),
                (KeyCode::Char('c'), KeyEventKind::Press)
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    commands.push(Command::Quit)
                }
                (KeyCode::Char('m') | KeyCode::Char('M'), KeyEventKind::Press) => {
                    commands.push(Command::ToggleMusic)
                }
                (KeyCode::Char('s') | KeyCode::Char('S'), KeyEventKind::Press) => {
                    commands.push(Command::ToggleSfx)
                }
                _ => {}
            },
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), .. }) => {
                if !self.mouse_down && !self.space.is_held() {
                    commands.push(Command::Press);
                }
                self.mouse_down = true;
            }
            Event::Mouse(MouseEvent { kind: MouseEventKind::Up(MouseButton::Left), .. }) => {
                if self.mouse_down && !self.space.is_held() {
                    commands.push(Command::Release);
                }
                self.mouse_down = false;
            }
            _ => {}
        }
    }

    /// Synthesise the release a classic terminal never sends. A no-op once
    /// the terminal is known to report releases itself.
    pub fn expire(&mut self, now_ms: u64, commands: &mut Vec<Command>) {
        if self.reports_release {
            return;
        }
        if self.space.expire(now_ms) && !self.mouse_down {
            commands.push(Command::Release);
        }
    }
}
