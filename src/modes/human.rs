use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{NullSound, SoundEngine, SynthSound};
use crate::game::{GameConfig, GameEvent, GameSession, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Interactive terminal play
///
/// Drives one `GameSession::frame()` per display tick (60 FPS) from a
/// single tokio task; keyboard events land in the snake's input queue
/// asynchronously and are consumed at the next frame. Audio is best
/// effort: with no output device the game runs silent.
pub struct HumanMode {
    session: GameSession,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sound: Box<dyn SoundEngine>,
    should_quit: bool,
    /// Simulation frozen while the terminal is unfocused; this is the
    /// pause/tab-hidden rule that also silences the music
    focus_paused: bool,
    dash_held: bool,
    /// Terminal reports key releases (kitty protocol); without it the
    /// space bar toggles the dash instead
    release_supported: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, volume: f32, muted: bool) -> Result<Self> {
        let session = GameSession::new(config).context("Invalid game configuration")?;

        let sound: Box<dyn SoundEngine> = match SynthSound::new(volume, muted) {
            Ok(synth) => Box::new(synth),
            // No audio device; play on silently
            Err(_) => Box::new(NullSound),
        };

        Ok(Self {
            session,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sound,
            should_quit: false,
            focus_paused: false,
            dash_held: false,
            release_supported: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        self.release_supported =
            crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_supported {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release reporting")?;
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation + render step per display tick
        let mut frame_timer = interval(Duration::from_millis(16));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = frame_timer.tick() => {
                    if !self.focus_paused {
                        let events = self.session.frame();
                        self.dispatch(&events);
                    }
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.session,
                            &self.metrics,
                            self.sound.volume(),
                            self.sound.muted(),
                        );
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(self.input_handler.handle_key_event(key)),
            Event::FocusLost => {
                self.focus_paused = true;
                // Dropping focus also drops the dash
                self.dash_held = false;
                if let Some(ev) = self.session.set_dash_held(false) {
                    self.dispatch(&[ev]);
                }
            }
            Event::FocusGained => {
                self.focus_paused = false;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(dir) => {
                if self.session.queue_turn(dir) {
                    self.sound.on_move();
                }
            }
            KeyAction::DashPress => {
                // Without release reporting the space bar toggles
                let held = if self.release_supported {
                    true
                } else {
                    !self.dash_held
                };
                self.dash_held = held;
                if let Some(ev) = self.session.set_dash_held(held) {
                    self.dispatch(&[ev]);
                }
            }
            KeyAction::DashRelease => {
                self.dash_held = false;
                if let Some(ev) = self.session.set_dash_held(false) {
                    self.dispatch(&[ev]);
                }
            }
            KeyAction::Start => {
                if self.session.phase != Phase::Running {
                    self.session.start();
                    self.metrics.on_run_start();
                }
            }
            KeyAction::ToggleMute => {
                self.sound.set_muted(!self.sound.muted());
            }
            KeyAction::VolumeUp => self.adjust_volume(0.1),
            KeyAction::VolumeDown => self.adjust_volume(-0.1),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Volume and mute stay coupled the way the original UI did it:
    /// raising the volume unmutes, dropping it to zero mutes
    fn adjust_volume(&mut self, delta: f32) {
        let volume = (self.sound.volume() + delta).clamp(0.0, 1.0);
        self.sound.set_volume(volume);
        if volume > 0.0 && self.sound.muted() {
            self.sound.set_muted(false);
        }
        if volume == 0.0 && !self.sound.muted() {
            self.sound.set_muted(true);
        }
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Started => {}
                GameEvent::Ate { .. } => self.sound.on_eat(),
                GameEvent::Crashed { final_score } => {
                    self.sound.on_crash();
                    self.metrics.on_run_over(final_score);
                }
                GameEvent::DashStarted => self.sound.on_dash_start(),
                GameEvent::DashEnded => {}
                GameEvent::MusicStep { step, dashing } => self.sound.on_step(step, dashing),
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        if self.release_supported {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to disable key release reporting")?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
