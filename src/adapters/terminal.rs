use crate::domain::model::{ChatMessage, DisplayModel, Speaker};
use crate::domain::ports::{ChatView, Presenter};
use std::io::Write;

/// Renders forecasts and chat turns as plain text.
///
/// Results go to `out`; progress indicators and errors go to `err`.
pub struct TerminalRenderer<O: Write, E: Write> {
    out: O,
    err: E,
    json: bool,
    busy: bool,
}

impl TerminalRenderer<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(json: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), json)
    }
}

impl<O: Write, E: Write> TerminalRenderer<O, E> {
    pub fn new(out: O, err: E, json: bool) -> Self {
        Self {
            out,
            err,
            json,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_out(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write output: {}", e);
        }
    }

    fn write_err(&mut self, text: &str) {
        if let Err(e) = writeln!(self.err, "{}", text) {
            tracing::warn!("Failed to write to stderr: {}", e);
        }
    }
}

pub fn render_display(display: &DisplayModel) -> String {
    let mut lines = vec![
        display.intro.clone(),
        String::new(),
        format!("  Predicted date:     {}", display.predicted_date),
        format!("  Mean cycle length:  {}", display.mean_cycle),
        format!("  Variation:          {}", display.std_dev),
        format!("  Confidence range:   {}", display.confidence_range),
        format!("  Fertile window:     {}", display.fertile_window),
    ];
    if let Some(note) = &display.note {
        lines.push(String::new());
        lines.push(format!("  ⚠️  {}", note));
    }
    lines.join("\n")
}

impl<O: Write, E: Write> Presenter for TerminalRenderer<O, E> {
    fn show_loading(&mut self) {
        self.busy = true;
        self.write_err("⏳ Predicting your next cycle...");
    }

    fn hide_loading(&mut self) {
        self.busy = false;
        if let Err(e) = self.err.flush() {
            tracing::warn!("Failed to flush stderr: {}", e);
        }
    }

    fn show_result(&mut self, display: &DisplayModel) {
        if self.json {
            match serde_json::to_string_pretty(display) {
                Ok(json) => self.write_out(&json),
                Err(e) => tracing::error!("Failed to encode result: {}", e),
            }
        } else {
            let text = render_display(display);
            self.write_out(&text);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.write_err(&format!(
            "⚠️ Oops!\n\n{}\n\nPlease check your input and try again.",
            message
        ));
    }
}

impl<O: Write, E: Write> ChatView for TerminalRenderer<O, E> {
    fn show_typing(&mut self) {
        self.busy = true;
        self.write_err("Hayya is typing...");
    }

    fn hide_typing(&mut self) {
        self.busy = false;
    }

    fn append_message(&mut self, message: &ChatMessage) {
        let label = match message.speaker {
            Speaker::User => "You",
            Speaker::Assistant => "Hayya",
        };
        self.write_out(&format!("{}: {}", label, message.text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(note: Option<&str>) -> DisplayModel {
        DisplayModel {
            intro: "You might expect your next period around November 28, 2025 (±1 days). 💖"
                .to_string(),
            predicted_date: "November 28, 2025".to_string(),
            mean_cycle: "28.6 days".to_string(),
            std_dev: "±0.9 days".to_string(),
            confidence_range: "Nov 28 - Nov 28".to_string(),
            fertile_window: "Nov 10 - Nov 18".to_string(),
            note: note.map(str::to_string),
        }
    }

    fn rendered(renderer: TerminalRenderer<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = renderer.into_parts();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_note_region_only_when_present() {
        assert!(!render_display(&display(None)).contains("⚠️"));
        let text = render_display(&display(Some("Your cycles appear irregular.")));
        assert!(text.ends_with("⚠️  Your cycles appear irregular."));
    }

    #[test]
    fn test_result_goes_to_stdout_and_progress_to_stderr() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Vec::new(), false);
        renderer.show_loading();
        assert!(renderer.is_busy());
        renderer.show_result(&display(None));
        renderer.hide_loading();
        assert!(!renderer.is_busy());

        let (out, err) = rendered(renderer);
        assert!(out.contains("Predicted date:     November 28, 2025"));
        assert!(out.contains("Fertile window:     Nov 10 - Nov 18"));
        assert!(err.contains("Predicting"));
    }

    #[test]
    fn test_json_output() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Vec::new(), true);
        renderer.show_result(&display(None));
        let (out, _) = rendered(renderer);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["predicted_date"], "November 28, 2025");
        assert!(value["note"].is_null());
    }

    #[test]
    fn test_error_and_chat_lines() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Vec::new(), false);
        renderer.show_error("lookback must be positive");
        renderer.append_message(&ChatMessage::user("hi"));
        renderer.append_message(&ChatMessage::assistant("Hello!"));

        let (out, err) = rendered(renderer);
        assert_eq!(out, "You: hi\nHayya: Hello!\n");
        assert!(err.starts_with("⚠️ Oops!\n\nlookback must be positive"));
    }
}
