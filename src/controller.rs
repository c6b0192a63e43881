//! Page controller: owns the page state, the filter inputs and the form,
//! and turns user actions into API calls plus re-renders.
//!
//! Every failure is caught here, logged, and surfaced as a toast. Nothing
//! is retried and the previous render stays on screen.

use crate::api::normalize::{decode_records, normalize_list};
use crate::api::traits::PropertyApi;
use crate::api::types::ListQuery;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{Filters, PageState, Property, PropertyId};
use crate::ui::form::{Field, FormController};
use crate::ui::render::{build_pager, build_rows};
use crate::ui::toast::Toast;
use crate::ui::view::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, error, info};

pub const MSG_LOAD_FAILED: &str = "Error loading properties";
pub const MSG_SAVE_FAILED: &str = "Save failed";
pub const MSG_CREATED: &str = "Property created";
pub const MSG_UPDATED: &str = "Property updated";
pub const MSG_DELETED: &str = "Property deleted";
pub const MSG_DELETE_FAILED: &str = "Delete failed";
pub const CONFIRM_DELETE: &str = "Delete this property?";

/// Filter panel inputs besides the free-text search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Address,
    MinPrice,
    MaxPrice,
    MinSize,
    MaxSize,
}

impl FromStr for FilterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "address" => Ok(FilterKey::Address),
            "minprice" => Ok(FilterKey::MinPrice),
            "maxprice" => Ok(FilterKey::MaxPrice),
            "minsize" => Ok(FilterKey::MinSize),
            "maxsize" => Ok(FilterKey::MaxSize),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

/// Raw text of the search box and filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInputs {
    pub search: String,
    pub address: String,
    pub min_price: String,
    pub max_price: String,
    pub min_size: String,
    pub max_size: String,
}

impl FilterInputs {
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            FilterKey::Address => self.address = value,
            FilterKey::MinPrice => self.min_price = value,
            FilterKey::MaxPrice => self.max_price = value,
            FilterKey::MinSize => self.min_size = value,
            FilterKey::MaxSize => self.max_size = value,
        }
    }

    /// Empty the filter panel. The search box is left alone.
    pub fn clear_panel(&mut self) {
        *self = Self {
            search: std::mem::take(&mut self.search),
            ..Self::default()
        };
    }

    /// Filters for the next request; blank inputs are left out
    pub fn to_filters(&self) -> Filters {
        fn non_empty(raw: &str) -> Option<String> {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        Filters {
            q: non_empty(&self.search),
            address: non_empty(&self.address),
            min_price: non_empty(&self.min_price),
            max_price: non_empty(&self.max_price),
            min_size: non_empty(&self.min_size),
            max_size: non_empty(&self.max_size),
        }
    }
}

pub struct PageController<A, V> {
    api: A,
    view: V,
    state: PageState,
    filters: FilterInputs,
    form: FormController,
    rows: Vec<Property>,
}

impl<A: PropertyApi, V: View> PageController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self::with_config(api, view, &ClientConfig::default())
    }

    pub fn with_config(api: A, view: V, config: &ClientConfig) -> Self {
        Self {
            api,
            view,
            state: PageState {
                size: config.page_size,
                sort: config.sort.clone(),
                ..PageState::default()
            },
            filters: FilterInputs::default(),
            form: FormController::new(),
            rows: Vec::new(),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Records of the last successful render
    pub fn rows(&self) -> &[Property] {
        &self.rows
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn filters(&self) -> &FilterInputs {
        &self.filters
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.view.toast(Toast::new(message));
    }

    /// Fetch and render page `page` with the current filters.
    pub async fn load_page(&mut self, page: u32) {
        self.state.page = page;
        let query = ListQuery::new(&self.state, self.filters.to_filters());
        debug!(page, filters = ?query.filters, "Loading properties");

        match self.api.list(&query).await {
            Ok(raw) => self.apply_listing(&raw),
            Err(e) => {
                error!(error = %e, page, "Failed to load properties");
                self.toast(MSG_LOAD_FAILED);
            }
        }
    }

    fn apply_listing(&mut self, raw: &Value) {
        self.state.total_pages = count_field(raw, "totalPages").map_or(1, |n| n as u32);
        self.state.total_elements = count_field(raw, "totalElements").map_or(0, |n| n as u64);

        self.rows = decode_records(normalize_list(raw));
        info!(
            page = self.state.page,
            total_pages = self.state.total_pages,
            shown = self.rows.len(),
            "Loaded properties"
        );

        self.view.render_rows(&build_rows(&self.rows));
        self.view.render_pager(&build_pager(&self.state), &self.state);
    }

    /// Navigate to `page`, clamped into the known page range
    pub async fn goto_page(&mut self, page: i64) {
        let target = self.state.clamp(page);
        self.load_page(target).await;
    }

    pub async fn next_page(&mut self) {
        self.goto_page(i64::from(self.state.page) + 1).await;
    }

    pub async fn prev_page(&mut self) {
        self.goto_page(i64::from(self.state.page) - 1).await;
    }

    /// Replace the free-text search and start over from the first page
    pub async fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
        self.load_page(0).await;
    }

    /// Edit one filter input. Takes effect on the next load.
    pub fn set_filter(&mut self, key: FilterKey, value: impl Into<String>) {
        self.filters.set(key, value);
    }

    pub async fn apply_filters(&mut self) {
        self.load_page(0).await;
    }

    pub async fn clear_filters(&mut self) {
        self.filters.clear_panel();
        self.load_page(0).await;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn show_form(&mut self) {
        self.view.render_form(&self.form);
    }

    /// Load `property` into the form and switch to edit mode
    pub fn start_edit(&mut self, property: &Property) {
        debug!(id = %property.id, "Editing property");
        self.form.start_edit(property);
        self.view.render_form(&self.form);
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.view.render_form(&self.form);
    }

    /// Validate the form and create or update the record.
    ///
    /// A new record sends the listing back to page 0, where newest-first
    /// ordering puts it. An update reloads the current page.
    pub async fn submit(&mut self) {
        let input = match self.form.read().validate() {
            Ok(input) => input,
            Err(e) => {
                debug!(reason = %e, "Form rejected");
                self.toast(e.to_string());
                return;
            }
        };

        let result = match self.form.editing().cloned() {
            None => self.api.create(&input).await.map(|_| None),
            Some(id) => self.api.update(&id, &input).await.map(|_| Some(id)),
        };

        match result {
            Ok(None) => {
                info!(address = %input.address, "Property created");
                self.toast(MSG_CREATED);
                self.load_page(0).await;
            }
            Ok(Some(id)) => {
                info!(%id, "Property updated");
                self.toast(MSG_UPDATED);
                self.load_page(self.state.page).await;
            }
            Err(e) => {
                self.report_failure("Save", &e, MSG_SAVE_FAILED);
                return;
            }
        }

        self.form.reset();
        self.view.render_form(&self.form);
    }

    /// Delete after the user confirms. Declining sends nothing.
    pub async fn delete(&mut self, id: &PropertyId) {
        if !self.view.confirm(CONFIRM_DELETE) {
            debug!(%id, "Delete cancelled");
            return;
        }

        if let Err(e) = self.api.delete(id).await {
            self.report_failure("Delete", &e, MSG_DELETE_FAILED);
            return;
        }

        info!(%id, "Property deleted");
        self.toast(MSG_DELETED);
        self.load_page(self.state.page).await;

        // The last record of a trailing page is gone; step back one page.
        if self.rows.is_empty() && self.state.page > 0 {
            let previous = self.state.page - 1;
            self.load_page(previous).await;
        }
    }

    /// Fetch one record by id and show it
    pub async fn show(&mut self, id: &PropertyId) {
        match self.api.get(id).await {
            Ok(property) => self.view.show_record(&property),
            Err(e) => self.report_failure("Fetch", &e, MSG_LOAD_FAILED),
        }
    }

    fn report_failure(&mut self, action: &str, e: &ClientError, fallback: &str) {
        error!(error = %e, action, "Request failed");
        let message = e.to_string();
        if message.is_empty() {
            self.toast(fallback);
        } else {
            self.toast(message);
        }
    }
}

/// Numeric paging field, truncated toward zero and floored at zero.
/// `None` when the field is absent or not a number.
fn count_field(raw: &Value, key: &str) -> Option<f64> {
    let n = raw.get(key)?.as_f64()?;
    Some(n.trunc().max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paging_fields_accept_any_number() {
        let raw = json!({"totalPages": 3.0, "totalElements": 14.9, "bogus": "7"});
        assert_eq!(count_field(&raw, "totalPages"), Some(3.0));
        assert_eq!(count_field(&raw, "totalElements"), Some(14.0));
        assert_eq!(count_field(&json!({"totalPages": -2}), "totalPages"), Some(0.0));
        assert_eq!(count_field(&raw, "bogus"), None);
        assert_eq!(count_field(&raw, "missing"), None);
    }

    #[test]
    fn filter_inputs_drop_blank_values() {
        let inputs = FilterInputs {
            search: "  ".into(),
            address: " Usaquen ".into(),
            min_price: "100".into(),
            max_size: "".into(),
            ..FilterInputs::default()
        };
        let filters = inputs.to_filters();
        assert_eq!(filters.q, None);
        assert_eq!(filters.address.as_deref(), Some("Usaquen"));
        assert_eq!(filters.min_price.as_deref(), Some("100"));
        assert_eq!(filters.max_size, None);
    }

    #[test]
    fn clearing_panel_keeps_search() {
        let mut inputs = FilterInputs::default();
        inputs.search = "terraza".into();
        inputs.set(FilterKey::MaxPrice, "9000");
        inputs.set(FilterKey::Address, "Suba");
        inputs.clear_panel();
        assert_eq!(inputs.search, "terraza");
        assert_eq!(inputs.max_price, "");
        assert_eq!(inputs.address, "");
    }

    #[test]
    fn filter_keys_accept_several_spellings() {
        assert_eq!("minPrice".parse::<FilterKey>(), Ok(FilterKey::MinPrice));
        assert_eq!("max-size".parse::<FilterKey>(), Ok(FilterKey::MaxSize));
        assert_eq!("min_size".parse::<FilterKey>(), Ok(FilterKey::MinSize));
        assert!("rooms".parse::<FilterKey>().is_err());
    }
}
