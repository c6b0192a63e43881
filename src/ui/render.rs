use crate::models::{PageState, Property, PropertyId};
use serde::Serialize;
use std::fmt::Write as _;

/// Maximum number of numbered page buttons
pub const PAGER_WINDOW: u32 = 7;

/// Trigger in a row's actions cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowAction {
    Edit(PropertyId),
    Delete(PropertyId),
}

/// One table row, ready to print
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
    pub actions: [RowAction; 2],
}

impl RowView {
    pub fn from_property(p: &Property) -> Self {
        Self {
            address: p.address.clone(),
            price: p.price.to_string(),
            size: p.size.to_string(),
            description: p.description.clone(),
            actions: [RowAction::Edit(p.id.clone()), RowAction::Delete(p.id.clone())],
        }
    }
}

/// Rebuild every row from the records
pub fn build_rows(items: &[Property]) -> Vec<RowView> {
    items.iter().map(RowView::from_property).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PagerKind {
    Prev,
    Page,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerButton {
    pub kind: PagerKind,
    pub label: String,
    /// Page this button navigates to. Prev/next may point outside the
    /// valid range; navigation clamps.
    pub target: i64,
    pub disabled: bool,
    pub active: bool,
}

/// Pagination controls. Empty when there is at most one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub buttons: Vec<PagerButton>,
}

impl Pager {
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Numbered buttons only
    pub fn pages(&self) -> impl Iterator<Item = &PagerButton> {
        self.buttons.iter().filter(|b| b.kind == PagerKind::Page)
    }
}

/// First and last page index of the numbered window
pub fn page_window(page: u32, total_pages: u32) -> (u32, u32) {
    let upper = total_pages.saturating_sub(PAGER_WINDOW);
    let start = page.saturating_sub(2).min(upper);
    let end = (start + PAGER_WINDOW - 1).min(total_pages.saturating_sub(1));
    (start, end)
}

pub fn build_pager(state: &PageState) -> Pager {
    if state.total_pages <= 1 {
        return Pager::default();
    }

    let current = i64::from(state.page);
    let mut buttons = Vec::with_capacity(PAGER_WINDOW as usize + 2);

    buttons.push(PagerButton {
        kind: PagerKind::Prev,
        label: "«".to_string(),
        target: current - 1,
        disabled: state.page == 0,
        active: false,
    });

    let (start, end) = page_window(state.page, state.total_pages);
    for p in start..=end {
        buttons.push(PagerButton {
            kind: PagerKind::Page,
            label: (p + 1).to_string(),
            target: i64::from(p),
            disabled: false,
            active: p == state.page,
        });
    }

    buttons.push(PagerButton {
        kind: PagerKind::Next,
        label: "»".to_string(),
        target: current + 1,
        disabled: state.is_last_page(),
        active: false,
    });

    Pager { buttons }
}

const COLUMNS: [&str; 5] = ["#", "Address", "Price", "Size", "Description"];

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Plain-text table. Rows are numbered from 1; the number is what the
/// edit/delete commands take.
pub fn format_table(rows: &[RowView]) -> String {
    if rows.is_empty() {
        return "(no properties)\n".to_string();
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                truncate(&r.address, 40),
                r.price.clone(),
                r.size.clone(),
                truncate(&r.description, 50),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let pad = |values: &[&str]| -> String {
        values
            .iter()
            .zip(widths.iter())
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}  actions", pad(&COLUMNS[..]));
    for (row, view) in cells.iter().zip(rows) {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        let actions: Vec<String> = view
            .actions
            .iter()
            .map(|a| match a {
                RowAction::Edit(id) => format!("edit({})", id),
                RowAction::Delete(id) => format!("delete({})", id),
            })
            .collect();
        let _ = writeln!(out, "{}  {}", pad(&values[..]), actions.join(" | "));
    }
    out
}

/// Single-line pager, current page in brackets, disabled controls blanked
pub fn format_pager(pager: &Pager) -> String {
    pager
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else if b.disabled {
                " ".repeat(b.label.chars().count())
            } else {
                b.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
