use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::AboutConfig;
use crate::session::PredictionSession;

use super::form::FormState;

/// Slider ticks moved per arrow press while Shift is held.
const COARSE_STEPS: i32 = 10;

pub enum Action {
    None,
    Quit,
}

/// Everything the prediction screen renders.
pub struct App {
    pub form: FormState,
    pub session: PredictionSession,
    pub about: AboutConfig,
}

impl App {
    pub fn new(session: PredictionSession, about: AboutConfig) -> Self {
        Self {
            form: FormState::new(),
            session,
            about,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let steps = if key.modifiers.contains(KeyModifiers::SHIFT) {
            COARSE_STEPS
        } else {
            1
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.form.focus_next(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.form.focus_prev(),
            KeyCode::Right | KeyCode::Char('l') => self.form.adjust(steps),
            KeyCode::Left | KeyCode::Char('h') => self.form.adjust(-steps),
            KeyCode::Char(' ') => self.form.toggle(),
            KeyCode::Char('r') => {
                self.form.reset();
                self.session.clear();
            }
            KeyCode::Enter => match self.session.predict(self.form.specs()) {
                Ok(range) => debug!(range = %range, "Predict action succeeded"),
                // kept on the session and drawn in the status line
                Err(e) => debug!(error = %e, "Predict action failed"),
            },
            _ => {}
        }

        Action::None
    }
}
