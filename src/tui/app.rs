//! Application loop and key routing.

use std::io;

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::registry::ChannelRegistry;

use super::screens::DeskScreen;

/// Runs the TUI event loop until the user quits.
pub fn run(registry: &ChannelRegistry) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, registry);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, registry: &ChannelRegistry) -> io::Result<()> {
    let mut screen = DeskScreen::new(registry);
    tracing::debug!(channel = %screen.current_channel().id, "desk opened");

    loop {
        terminal.draw(|frame| screen.render(frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if screen.in_channel_list() {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => screen.move_up(),
                    KeyCode::Down | KeyCode::Char('j') => screen.move_down(),
                    KeyCode::Char('d') => screen.jump_to_default(),
                    KeyCode::Enter | KeyCode::Tab => screen.on_enter(),
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Esc => screen.on_esc(),
                    KeyCode::Enter => screen.on_enter(),
                    KeyCode::Tab | KeyCode::Down => screen.on_tab(),
                    KeyCode::BackTab | KeyCode::Up => screen.on_back_tab(),
                    KeyCode::Backspace => screen.on_backspace(),
                    KeyCode::Char(c) => screen.on_char(c),
                    _ => {}
                }
            }
        }
    }
}
