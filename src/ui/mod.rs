pub mod form;
pub mod render;
pub mod terminal;
pub mod toast;
pub mod view;

pub use form::{Field, FormController};
pub use render::{build_pager, build_rows, Pager, RowView};
pub use terminal::TerminalView;
pub use toast::Toast;
pub use view::View;
