//! Presentation of a session
//!
//! [`View`] holds everything a front end needs to draw the session;
//! [`render_text`] draws it for a terminal.

use pv_core::domain::session::messages;
use pv_core::domain::{Session, Step};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub step: Step,
    pub time_left: u32,
    /// Remaining time as a share of the full countdown, 0 to 100
    pub progress_percent: f64,
    pub unlocked: bool,
    pub input_placeholder: &'static str,
    pub input_disabled: bool,
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub message: Option<String>,
    pub expired_notice: Option<&'static str>,
}

impl View {
    pub fn of(session: &Session) -> Self {
        let loading = session.is_loading();
        let expired = session.is_expired();

        let (input_placeholder, button_label, button_disabled) = match session.step() {
            Step::Phone => (
                "Enter your phone number",
                if loading { "Sending..." } else { "Verify" },
                loading,
            ),
            Step::Code => (
                "Enter verification code",
                if loading { "Verifying..." } else { "Submit Code" },
                loading || expired,
            ),
        };

        Self {
            step: session.step(),
            time_left: session.time_left(),
            progress_percent: session.progress_percent(),
            unlocked: session.is_unlocked(),
            input_placeholder,
            input_disabled: expired,
            button_label,
            button_disabled,
            message: session.message().map(str::to_string),
            expired_notice: expired.then_some(messages::EXPIRED),
        }
    }

    /// Countdown as `m:ss`
    pub fn clock(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

/// Multi-line terminal rendering of a view
pub fn render_text(view: &View) -> String {
    let filled = ((view.progress_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}{}] {} {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        view.clock(),
        if view.unlocked { "(unlocked)" } else { "(locked)" },
    );

    let input_state = if view.input_disabled { " (disabled)" } else { "" };
    let button_state = if view.button_disabled { " (disabled)" } else { "" };
    let _ = writeln!(
        out,
        "{}{}  [{}]{}",
        view.input_placeholder, input_state, view.button_label, button_state
    );

    if let Some(message) = &view.message {
        let _ = writeln!(out, "{}", message);
    }
    if let Some(notice) = view.expired_notice {
        let _ = writeln!(out, "{}", notice);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_core::domain::GatewayReply;

    fn code_step() -> Session {
        let mut session = Session::new();
        session.set_phone("+14155552671");
        session.begin_send().unwrap();
        session.finish_send(GatewayReply::Status("pending".to_string()));
        session
    }

    #[test]
    fn test_initial_view() {
        let view = View::of(&Session::new());
        assert_eq!(view.step, Step::Phone);
        assert_eq!(view.progress_percent, 100.0);
        assert_eq!(view.button_label, "Verify");
        assert!(!view.button_disabled);
        assert!(!view.input_disabled);
        assert!(!view.unlocked);
        assert_eq!(view.message, None);
        assert_eq!(view.expired_notice, None);
        assert_eq!(view.clock(), "2:00");
    }

    #[test]
    fn test_loading_labels() {
        let mut session = Session::new();
        session.set_phone("+14155552671");
        session.begin_send().unwrap();
        let view = View::of(&session);
        assert_eq!(view.button_label, "Sending...");
        assert!(view.button_disabled);

        let mut session = code_step();
        session.set_code("123456");
        session.begin_check().unwrap();
        let view = View::of(&session);
        assert_eq!(view.button_label, "Verifying...");
        assert!(view.button_disabled);
    }

    #[test]
    fn test_expired_view_disables_input() {
        let mut session = code_step();
        while session.tick() {}

        let view = View::of(&session);
        assert_eq!(view.time_left, 0);
        assert_eq!(view.progress_percent, 0.0);
        assert!(view.input_disabled);
        assert!(view.button_disabled);
        assert_eq!(view.expired_notice, Some(messages::EXPIRED));

        let text = render_text(&view);
        assert!(text.contains("[--------------------] 0:00 (locked)"));
        assert!(text.contains(messages::EXPIRED));
    }

    #[test]
    fn test_unlocked_render() {
        let mut session = code_step();
        for _ in 0..30 {
            session.tick();
        }
        session.set_code("123456");
        session.begin_check().unwrap();
        session.finish_check(GatewayReply::Status("approved".to_string()));

        let view = View::of(&session);
        assert!(view.unlocked);
        assert_eq!(view.clock(), "1:30");

        let text = render_text(&view);
        assert!(text.contains("[###############-----] 1:30 (unlocked)"));
        assert!(text.contains(messages::VERIFIED));
    }
}
