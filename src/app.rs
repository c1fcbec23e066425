use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::algo::{AlgoId, ALL_ALGORITHMS};
use crate::api::{AlgoOutcome, SortClient};
use crate::config::AppConfig;
use crate::model;
use crate::session::{self, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Array,
    Algorithms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Array input (top box)
    pub input_buffer: String,
    /// Last successfully parsed or generated array; drawn as the plain
    /// preview whenever no sessions exist.
    pub preview: Vec<i64>,

    // Algorithm selection (checkbox list)
    pub selected_algo: usize,
    pub algo_selected: Vec<bool>,

    // Animation sessions, one per algorithm with a usable result
    pub sessions: Vec<Session>,
    /// Global pause flag; toggled in lockstep across every session.
    pub paused: bool,
    /// Animation speed 1-10; delay is 1100 - speed*100 ms.
    pub speed: u8,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Config
    pub config: AppConfig,

    client: SortClient,
    completion_announced: bool,
}

impl App {
    pub fn new(config: AppConfig, initial_array: Option<Vec<i64>>) -> Result<Self> {
        let client = SortClient::new(&config.endpoint)?;

        let preview = initial_array.unwrap_or_else(model::generate_random);
        let input_buffer = model::join_array(&preview);

        let algo_selected = ALL_ALGORITHMS
            .iter()
            .map(|a| config.algorithms.contains(a))
            .collect();

        Ok(Self {
            section: Section::Array,
            popup: Popup::None,

            input_buffer,
            preview,

            selected_algo: 0,
            algo_selected,

            sessions: Vec::new(),
            paused: false,
            speed: config.speed.clamp(1, 10),

            status_message: None,
            status_message_time: None,

            config,

            client,
            completion_announced: false,
        })
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Whether any session still has steps left to play.
    pub fn is_animating(&self) -> bool {
        self.sessions.iter().any(|s| !s.is_finished())
    }

    pub fn selected_algorithms(&self) -> Vec<AlgoId> {
        ALL_ALGORITHMS
            .iter()
            .zip(&self.algo_selected)
            .filter(|(_, sel)| **sel)
            .map(|(a, _)| *a)
            .collect()
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }
        self.handle_normal_key(key).await
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(
            key.code,
            KeyCode::Esc
                | KeyCode::Char('?')
                | KeyCode::Char('h')
                | KeyCode::Enter
                | KeyCode::Char('q')
        ) {
            self.popup = Popup::None;
        }
        Ok(())
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Navigation between sections (Array ↔ Algorithms)
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Array => Section::Algorithms,
                    Section::Algorithms => Section::Array,
                };
            }

            // Vertical navigation in the algorithm list
            KeyCode::Down | KeyCode::Char('j') if self.section == Section::Algorithms => {
                self.selected_algo = (self.selected_algo + 1) % ALL_ALGORITHMS.len();
            }
            KeyCode::Up | KeyCode::Char('k') if self.section == Section::Algorithms => {
                self.selected_algo = self
                    .selected_algo
                    .checked_sub(1)
                    .unwrap_or(ALL_ALGORITHMS.len() - 1);
            }

            // Space toggles a checkbox while idle, pause/resume while animating
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.is_animating() {
                    self.toggle_pause();
                } else if self.section == Section::Algorithms {
                    self.toggle_selected_algorithm();
                }
            }

            KeyCode::Char('p') => self.toggle_pause(),
            KeyCode::Char('n') => self.step_once(),
            KeyCode::Char('s') => self.start().await?,
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('g') => self.generate_random(),

            // Speed slider
            KeyCode::Right => self.adjust_speed(1),
            KeyCode::Left => self.adjust_speed(-1),

            // Array text editing (digits, commas, minus; space is reserved
            // for pause/toggle)
            KeyCode::Char(c)
                if self.section == Section::Array
                    && (c.is_ascii_digit() || c == ',' || c == '-') =>
            {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace if self.section == Section::Array => {
                self.input_buffer.pop();
            }

            // Help (? or h)
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn toggle_selected_algorithm(&mut self) {
        if let Some(sel) = self.algo_selected.get_mut(self.selected_algo) {
            *sel = !*sel;
        }
        self.config.algorithms = self.selected_algorithms();
        let _ = self.config.save();
    }

    fn adjust_speed(&mut self, delta: i8) {
        let speed = (self.speed as i8 + delta).clamp(1, 10) as u8;
        if speed != self.speed {
            self.speed = speed;
            self.config.speed = speed;
            let _ = self.config.save();
        }
    }

    /// Generate a random array and write it back into the input field.
    fn generate_random(&mut self) {
        if self.is_animating() {
            self.set_status("Reset before generating a new array");
            return;
        }
        self.preview = model::generate_random();
        self.input_buffer = model::join_array(&self.preview);
        self.sessions.clear();
    }

    /// Validate input, fetch step sequences and spawn one session per
    /// algorithm with a usable result.
    async fn start(&mut self) -> Result<()> {
        if self.is_animating() {
            self.set_status("Already running, reset first");
            return Ok(());
        }

        let array = match model::parse_input(&self.input_buffer) {
            Ok(a) => a,
            Err(e) => {
                self.set_status(format!("⚠ {}", e));
                return Ok(());
            }
        };

        let algorithms = self.selected_algorithms();
        if algorithms.is_empty() {
            self.set_status("⚠ Select at least one algorithm");
            return Ok(());
        }

        self.preview = array.clone();
        self.set_status("Fetching steps…");

        let mut response = match self.client.fetch_steps(&array, &algorithms).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("sort request failed: {:#}", e);
                self.set_status(format!("⚠ {:#}", e));
                self.reset();
                return Ok(());
            }
        };

        let mut sessions = Vec::new();
        for algo in &algorithms {
            match response.remove(algo.id()) {
                Some(AlgoOutcome::Run(run)) => {
                    sessions.push(Session::new(*algo, &array, run.steps, run.time_taken));
                }
                Some(AlgoOutcome::Error(e)) => {
                    // per-algorithm failures are skipped, the rest proceed
                    tracing::warn!("{} skipped: {}", algo, e.error);
                }
                None => {
                    tracing::warn!("{} missing from response", algo);
                }
            }
        }

        if sessions.is_empty() {
            self.set_status("⚠ No algorithm returned steps");
            self.reset();
            return Ok(());
        }

        tracing::info!(count = sessions.len(), "starting animation sessions");
        self.sessions = sessions;
        self.paused = false;
        self.completion_announced = false;
        self.status_message = None;
        self.status_message_time = None;
        Ok(())
    }

    /// Pause/resume every session in lockstep.
    fn toggle_pause(&mut self) {
        if !self.is_animating() {
            return;
        }

        self.paused = !self.paused;
        let now = Instant::now();
        let delay = session::delay_for_speed(self.speed);
        for s in &mut self.sessions {
            if self.paused {
                s.pause();
            } else {
                s.resume(now, delay);
            }
        }
    }

    /// Manual single-advance: one session only, applies one step and stays
    /// paused.
    fn step_once(&mut self) {
        if self.sessions.is_empty() {
            return;
        }
        if self.sessions.len() > 1 {
            self.set_status("Stepping works with a single algorithm only");
            return;
        }

        if !self.paused {
            self.paused = true;
            for s in &mut self.sessions {
                s.pause();
            }
        }

        let session = &mut self.sessions[0];
        if !session.is_finished() {
            session.advance();
        }
    }

    /// Cancel everything and repaint the plain input array.
    fn reset(&mut self) {
        self.sessions.clear();
        self.paused = false;
        self.completion_announced = false;
        self.preview = model::parse_input(&self.input_buffer).unwrap_or_default();
    }

    /// Periodic pass from the main loop: advances session timers and
    /// expires the status message.
    pub fn tick(&mut self) {
        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        if self.sessions.is_empty() {
            return;
        }

        if !self.paused {
            let now = Instant::now();
            let delay = session::delay_for_speed(self.speed);
            for s in &mut self.sessions {
                s.tick(now, delay);
            }
        }

        // once every session has drained, controls return to the initial
        // configuration (start enabled again)
        if !self.completion_announced && self.sessions.iter().all(|s| s.is_finished()) {
            self.completion_announced = true;
            self.paused = false;
            self.set_status("All algorithms finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    fn app() -> App {
        let mut app = App::new(AppConfig::default(), Some(vec![5, 3, 8, 1])).unwrap();
        app.algo_selected = vec![true, false, false, false, false];
        app
    }

    fn running_session() -> Session {
        Session::new(
            AlgoId::Bubble,
            &[5, 3, 8, 1],
            vec![Step::Compare(0, 1), Step::Swap(0, 1)],
            None,
        )
    }

    #[test]
    fn test_initial_controls_idle() {
        let app = app();
        assert!(!app.is_animating());
        assert_eq!(app.input_buffer, "5,3,8,1");
        assert_eq!(app.preview, vec![5, 3, 8, 1]);
        assert_eq!(app.selected_algorithms(), vec![AlgoId::Bubble]);
    }

    #[test]
    fn test_step_requires_single_session() {
        let mut app = app();
        app.sessions = vec![running_session(), running_session()];
        app.step_once();
        assert!(app.status_message.is_some());
        assert_eq!(app.sessions[0].cursor(), 0);
    }

    #[test]
    fn test_step_pauses_then_advances() {
        let mut app = app();
        app.sessions = vec![running_session()];
        app.step_once();
        assert!(app.paused);
        assert_eq!(app.sessions[0].cursor(), 1);
        app.step_once();
        assert_eq!(app.sessions[0].cursor(), 2);
        assert!(app.sessions[0].is_finished());
        app.step_once();
        assert_eq!(app.sessions[0].cursor(), 2);
    }

    #[test]
    fn test_reset_discards_sessions_and_repaints() {
        let mut app = app();
        app.sessions = vec![running_session()];
        app.paused = true;
        app.reset();
        assert!(app.sessions.is_empty());
        assert!(!app.paused);
        assert_eq!(app.preview, vec![5, 3, 8, 1]);
    }

    #[test]
    fn test_reset_with_bad_input_clears_preview() {
        let mut app = app();
        app.input_buffer = "not numbers".to_string();
        app.reset();
        assert!(app.preview.is_empty());
    }

    #[test]
    fn test_completion_restores_controls() {
        let mut app = app();
        app.sessions = vec![running_session()];
        app.sessions[0].advance();
        app.sessions[0].advance();
        assert!(!app.is_animating());
        app.tick();
        assert_eq!(app.status_message.as_deref(), Some("All algorithms finished"));
    }

    #[test]
    fn test_speed_clamped() {
        let mut app = app();
        app.speed = 10;
        app.adjust_speed(1);
        assert_eq!(app.speed, 10);
        app.speed = 1;
        app.adjust_speed(-1);
        assert_eq!(app.speed, 1);
    }
}
