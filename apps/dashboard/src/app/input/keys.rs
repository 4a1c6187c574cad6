use crate::app::state::{App, Focus};
use crate::Commodity;
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.picker.open {
        handle_picker_key(app, key.code);
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = true,
        KeyCode::Tab => {
            let next = wrap_increment(app.focus.index(), Focus::ALL.len());
            app.focus = Focus::ALL[next];
        }
        KeyCode::BackTab => {
            let prev = wrap_decrement(app.focus.index(), Focus::ALL.len());
            app.focus = Focus::ALL[prev];
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            if let Some(commodity) = Commodity::from_index(index) {
                app.set_commodity(commodity);
            }
        }
        KeyCode::Char('b') => app.restore_last_valid_country(),
        KeyCode::Esc => app.status_message.clear(),
        code => match app.focus {
            Focus::Commodity => handle_commodity_key(app, code),
            Focus::Year => handle_year_key(app, code),
            Focus::Country => {
                if matches!(code, KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ')) {
                    app.picker.open();
                }
            }
        },
    }
}

fn handle_commodity_key(app: &mut App, code: KeyCode) {
    let current = app.controller.selection().commodity.index();
    let next = match code {
        KeyCode::Left => wrap_decrement(current, Commodity::ALL.len()),
        KeyCode::Right => wrap_increment(current, Commodity::ALL.len()),
        _ => return,
    };
    if let Some(commodity) = Commodity::from_index(next) {
        app.set_commodity(commodity);
    }
}

fn handle_year_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.slider.step(-1),
        KeyCode::Right => app.slider.step(1),
        KeyCode::PageDown => app.slider.step(-5),
        KeyCode::PageUp => app.slider.step(5),
        KeyCode::Home => app.slider.set(i32::MIN),
        KeyCode::End => app.slider.set(i32::MAX),
        KeyCode::Enter => app.commit_year(),
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, code: KeyCode) {
    let count = app
        .picker
        .matches(app.controller.store().countries())
        .len();

    match code {
        KeyCode::Esc => app.picker.close(),
        KeyCode::Enter => {
            if let Some(country) = app.picker_choice() {
                app.choose_country(&country);
            }
        }
        KeyCode::Up => app.picker.cursor = wrap_decrement(app.picker.cursor, count),
        KeyCode::Down => app.picker.cursor = wrap_increment(app.picker.cursor, count),
        KeyCode::Backspace => app.picker.pop(),
        KeyCode::Char(c) => app.picker.push(c),
        _ => {}
    }
}

/// Previous index, wrapping to the end.
const fn wrap_decrement(index: usize, len: usize) -> usize {
    match (index, len) {
        (_, 0) => 0,
        (0, _) => len - 1,
        _ => index - 1,
    }
}

const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}
