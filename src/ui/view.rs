use crate::models::{PageState, Property};
use crate::ui::form::FormController;
use crate::ui::render::{Pager, RowView};
use crate::ui::toast::Toast;

/// Output surface driven by the page controller.
///
/// Every render call replaces what was shown before.
pub trait View: Send {
    fn render_rows(&mut self, rows: &[RowView]);

    fn render_pager(&mut self, pager: &Pager, state: &PageState);

    fn render_form(&mut self, form: &FormController);

    /// Show a single record fetched by id
    fn show_record(&mut self, property: &Property);

    fn toast(&mut self, toast: Toast);

    /// Ask a yes/no question. `false` aborts the pending operation.
    fn confirm(&mut self, prompt: &str) -> bool;
}
