use crate::models::{PageState, Property};
use crate::ui::form::FormController;
use crate::ui::render::{format_pager, format_table, Pager, RowView};
use crate::ui::toast::Toast;
use crate::ui::view::View;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Line-oriented terminal front end
pub struct TerminalView<R, W> {
    input: R,
    output: W,
    last_toast: Option<Toast>,
}

impl TerminalView<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            last_toast: None,
        }
    }

    /// Next line typed by the user, `None` at end of input.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self, text: &str) {
        self.emit(format_args!("{}", text), false);
    }

    pub fn print(&mut self, text: &str) {
        self.emit(format_args!("{}", text), true);
    }

    /// Toast still on screen at `now`, if any
    pub fn active_toast(&self, now: chrono::DateTime<chrono::Utc>) -> Option<&Toast> {
        self.last_toast.as_ref().filter(|t| !t.is_expired(now))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>, newline: bool) {
        let result = if newline {
            writeln!(self.output, "{}", args)
        } else {
            write!(self.output, "{}", args)
        }
        .and_then(|_| self.output.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> View for TerminalView<R, W> {
    fn render_rows(&mut self, rows: &[RowView]) {
        let table = format_table(rows);
        self.emit(format_args!("{}", table), false);
    }

    fn render_pager(&mut self, pager: &Pager, state: &PageState) {
        if pager.is_empty() {
            self.emit(format_args!("{} properties", state.total_elements), true);
            return;
        }
        self.emit(
            format_args!(
                "{}   page {}/{} - {} properties",
                format_pager(pager),
                state.page + 1,
                state.total_pages,
                state.total_elements
            ),
            true,
        );
    }

    fn render_form(&mut self, form: &FormController) {
        let fields = form.fields();
        self.emit(format_args!("== {} ==", form.title()), true);
        self.emit(format_args!("  address:     {}", fields.address), true);
        self.emit(format_args!("  price:       {}", fields.price), true);
        self.emit(format_args!("  size:        {}", fields.size), true);
        self.emit(format_args!("  description: {}", fields.description), true);
        let cancel = if form.cancel_visible() { " | cancel" } else { "" };
        self.emit(
            format_args!("  (submit: {}{})", form.submit_label(), cancel),
            true,
        );
    }

    fn show_record(&mut self, property: &Property) {
        self.emit(format_args!("Property {}", property.id), true);
        self.emit(format_args!("  address:     {}", property.address), true);
        self.emit(format_args!("  price:       {}", property.price), true);
        self.emit(format_args!("  size:        {}", property.size), true);
        self.emit(format_args!("  description: {}", property.description), true);
    }

    fn toast(&mut self, toast: Toast) {
        self.emit(format_args!(">> {}", toast.message), true);
        self.last_toast = Some(toast);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.emit(format_args!("{} [y/N] ", prompt), false);
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyId;
    use crate::ui::render::build_rows;
    use std::io::Cursor;

    fn view(input: &str) -> TerminalView<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalView::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(v: TerminalView<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(v.into_output()).unwrap()
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut v = view("y\nno\n\nYES\n");
        assert!(v.confirm("Delete this property?"));
        assert!(!v.confirm("Delete this property?"));
        assert!(!v.confirm("Delete this property?"));
        assert!(v.confirm("Delete this property?"));
        // input exhausted
        assert!(!v.confirm("Delete this property?"));
        assert!(output(v).starts_with("Delete this property? [y/N] "));
    }

    #[test]
    fn rows_and_pager_are_written() {
        let mut v = view("");
        let rows = build_rows(&[Property {
            id: PropertyId::Number(1),
            address: "Calle 5".into(),
            price: 10.0,
            size: 20.0,
            description: "d".into(),
        }]);
        v.render_rows(&rows);
        let state = PageState {
            total_elements: 1,
            ..PageState::default()
        };
        v.render_pager(&Pager::default(), &state);
        let out = output(v);
        assert!(out.contains("Calle 5"));
        assert!(out.ends_with("1 properties\n"));
    }

    #[test]
    fn toast_is_printed_and_remembered() {
        let mut v = view("");
        let toast = Toast::new("Property deleted");
        let shown = toast.shown_at;
        v.toast(toast);
        assert_eq!(v.active_toast(shown).unwrap().message, "Property deleted");
        assert!(v
            .active_toast(shown + chrono::Duration::seconds(3))
            .is_none());
        assert_eq!(output(v), ">> Property deleted\n");
    }

    #[test]
    fn read_line_strips_newline() {
        let mut v = view("list\r\nquit\n");
        assert_eq!(v.read_line().unwrap().as_deref(), Some("list"));
        assert_eq!(v.read_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(v.read_line().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_line_does_not_end_input() {
        let mut bytes = vec![0xff, 0xfe, b'\n'];
        bytes.extend_from_slice(b"list\n");
        let mut v: TerminalView<Cursor<Vec<u8>>, Vec<u8>> =
            TerminalView::new(Cursor::new(bytes), Vec::new());
        assert_eq!(v.read_line().unwrap().as_deref(), Some("\u{fffd}\u{fffd}"));
        assert_eq!(v.read_line().unwrap().as_deref(), Some("list"));
        assert_eq!(v.read_line().unwrap(), None);
    }
}
