//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::scroller::{Direction, GestureDelta, GestureOutcome, VisibilityScroller};
use crate::ui::layout::point_in_rect;

use super::state::AppState;
use super::strip::ThumbState;
use super::thumb_runtime::ThumbUpdate;

/// Process a key event against the configured bindings.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, whatever the bindings say.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    let focused = state.focused;
    match action {
        Action::Prev => step_strip(state, focused, Direction::Prev),
        Action::Next => step_strip(state, focused, Direction::Next),
        Action::Start => {
            if let Some(strip) = state.focused_strip_mut() {
                strip.scroll_to_start();
            }
        }
        Action::End => {
            if let Some(strip) = state.focused_strip_mut() {
                strip.scroll_to_end();
            }
        }
        Action::FocusUp => state.focus(focused.saturating_sub(1)),
        Action::FocusDown => state.focus(focused + 1),
        Action::Quit => state.should_quit = true,
    }
}

/// Step the strip at `index`.  A strip that is off screen has nothing to
/// measure and is left alone.
fn step_strip(state: &mut AppState, index: usize, direction: Direction) {
    let tolerances = state.config.tolerances;
    let Some(strip) = state.strips.get_mut(index) else {
        return;
    };
    let Some(mut scroller) = VisibilityScroller::bind(strip, tolerances) else {
        tracing::debug!(index, "step on detached strip ignored");
        return;
    };
    scroller.step(direction);
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.layout();
    let under_pointer = layout.strip_at(mouse.column, mouse.row).copied();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = under_pointer else {
                return;
            };
            state.focus(area.index);
            if point_in_rect(area.prev_button, mouse.column, mouse.row) {
                step_strip(state, area.index, Direction::Prev);
            } else if point_in_rect(area.next_button, mouse.column, mouse.row) {
                step_strip(state, area.index, Direction::Next);
            }
        }
        MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight
        | MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown => {
            let Some(delta) = gesture_for(mouse.kind, mouse.modifiers, state.config.wheel_step)
            else {
                return;
            };
            let outcome = match under_pointer {
                Some(area) => apply_gesture(state, area.index, delta),
                None => GestureOutcome::Ignored,
            };
            if outcome.suppresses_default() {
                return;
            }
            // Default wheel behaviour: move focus between strips.
            let focused = state.focused;
            if delta.dy > 0.0 {
                state.focus(focused + 1);
            } else if delta.dy < 0.0 {
                state.focus(focused.saturating_sub(1));
            }
        }
        _ => {}
    }
}

fn apply_gesture(state: &mut AppState, index: usize, delta: GestureDelta) -> GestureOutcome {
    let tolerances = state.config.tolerances;
    let Some(strip) = state.strips.get_mut(index) else {
        return GestureOutcome::Ignored;
    };
    match VisibilityScroller::bind(strip, tolerances) {
        Some(mut scroller) => scroller.handle_horizontal_delta(delta),
        None => GestureOutcome::Ignored,
    }
}

/// Translate a wheel event into a gesture delta in columns.  Shift turns the
/// vertical wheel sideways.
fn gesture_for(kind: MouseEventKind, modifiers: KeyModifiers, step: u16) -> Option<GestureDelta> {
    let step = f64::from(step);
    let sideways = modifiers.contains(KeyModifiers::SHIFT);
    let delta = match kind {
        MouseEventKind::ScrollLeft => GestureDelta::new(-step, 0.0),
        MouseEventKind::ScrollRight => GestureDelta::new(step, 0.0),
        MouseEventKind::ScrollUp if sideways => GestureDelta::new(-step, 0.0),
        MouseEventKind::ScrollDown if sideways => GestureDelta::new(step, 0.0),
        MouseEventKind::ScrollUp => GestureDelta::new(0.0, -step),
        MouseEventKind::ScrollDown => GestureDelta::new(0.0, step),
        _ => return None,
    };
    Some(delta)
}

pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.set_terminal_area(Rect::new(0, 0, width, height));
}

pub fn handle_thumb_update(state: &mut AppState, update: ThumbUpdate) {
    match update {
        ThumbUpdate::Ready { strip, item, image } => {
            if let Some(s) = state.strips.get_mut(strip) {
                s.set_thumb(item, ThumbState::Ready(image));
            }
        }
        ThumbUpdate::Failed { strip, item, error } => {
            if let Some(s) = state.strips.get_mut(strip) {
                if let Some(entry) = s.items.get(item) {
                    state.status_message = Some(format!("{}: {error}", entry.entry.name));
                }
                s.set_thumb(item, ThumbState::Failed);
            }
        }
    }
}
