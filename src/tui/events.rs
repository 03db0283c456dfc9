use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

use crate::tui::app::Mode;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::{App, render};
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the user's
/// terminal will be unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit).
    /// After calling this, the guard will do nothing on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            render(f, &mut app, &layout);
        })?;

        // Poll with a timeout so status messages clear without a keypress
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key_event) = event::read()? {
            // Ignore key release events (Windows sends both press and release)
            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            if app.delete_pending.is_some() {
                handle_delete_confirmation(&mut app, key_event)?;
            } else {
                match app.mode {
                    Mode::Entry | Mode::Edit => handle_input_mode(&mut app, key_event)?,
                    Mode::Help => handle_help_mode(&mut app, key_event)?,
                    Mode::View => handle_view_mode(&mut app, key_event)?,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    guard.restore()?;
    Ok(())
}

fn handle_delete_confirmation(app: &mut App, key_event: KeyEvent) -> Result<(), TuiError> {
    match key_event.code {
        KeyCode::Left | KeyCode::Up => {
            app.delete_modal_selection = 0;
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
            app.delete_modal_selection = 1;
        }
        KeyCode::Enter => {
            if app.delete_modal_selection == 0 {
                app.confirm_delete()?;
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Esc => {
            app.cancel_delete();
        }
        _ => {}
    }
    Ok(())
}

fn handle_input_mode(app: &mut App, key_event: KeyEvent) -> Result<(), TuiError> {
    match key_event.code {
        KeyCode::Enter => {
            app.submit_input()?;
        }
        KeyCode::Esc => {
            app.cancel_input();
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            app.input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<(), TuiError> {
    let help_binding = binding(&app.config.key_bindings.help)?;
    if key_event.code == KeyCode::Esc || matches_key_event(key_event, &help_binding) {
        app.mode = Mode::View;
    }
    Ok(())
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<(), TuiError> {
    // Calendar navigation is fixed to the arrow keys
    match key_event.code {
        KeyCode::Left => {
            app.move_selection_days(-1);
            return Ok(());
        }
        KeyCode::Right => {
            app.move_selection_days(1);
            return Ok(());
        }
        KeyCode::Up => {
            app.move_selection_days(-7);
            return Ok(());
        }
        KeyCode::Down => {
            app.move_selection_days(7);
            return Ok(());
        }
        _ => {}
    }

    let bindings = app.config.key_bindings.clone();

    if matches_key_event(key_event, &binding(&bindings.quit)?) {
        app.should_quit = true;
    } else if matches_key_event(key_event, &binding(&bindings.new)?) {
        app.enter_entry_mode();
    } else if matches_key_event(key_event, &binding(&bindings.edit)?) {
        app.enter_edit_mode();
    } else if matches_key_event(key_event, &binding(&bindings.delete)?) {
        app.request_delete();
    } else if matches_key_event(key_event, &binding(&bindings.export)?) {
        app.export_all();
    } else if matches_key_event(key_event, &binding(&bindings.today)?) {
        app.jump_to_today();
    } else if matches_key_event(key_event, &binding(&bindings.prev_month)?) {
        app.previous_month();
    } else if matches_key_event(key_event, &binding(&bindings.next_month)?) {
        app.next_month();
    } else if matches_key_event(key_event, &binding(&bindings.list_up)?) {
        app.list_up();
    } else if matches_key_event(key_event, &binding(&bindings.list_down)?) {
        app.list_down();
    } else if matches_key_event(key_event, &binding(&bindings.help)?) {
        app.mode = Mode::Help;
    }

    Ok(())
}

fn binding(key_str: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(key_str).map_err(TuiError::KeyBindingError)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Primary modifier is Ctrl on Windows/Linux, Option/Alt on macOS
    let has_primary_mod = has_primary_modifier(key_event.modifiers);
    if binding.requires_ctrl != has_primary_mod {
        return false;
    }

    binding.key_code == key_event.code
}
