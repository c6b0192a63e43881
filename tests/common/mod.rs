//! In-memory backend and recording view shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use properties_client::api::{ListQuery, PropertyApi};
use properties_client::error::{ClientError, Result};
use properties_client::models::{PageState, Property, PropertyId, PropertyInput};
use properties_client::ui::{FormController, Pager, RowView, Toast, View};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Request as seen by the fake server
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(PropertyId),
    Create(PropertyInput),
    Update(PropertyId, PropertyInput),
    Delete(PropertyId),
}

/// Page envelope server that keeps records sorted by id, newest first
#[derive(Default)]
pub struct FakeApi {
    records: Mutex<Vec<Property>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<Call>>,
    fail_next: Mutex<VecDeque<ClientError>>,
}

impl FakeApi {
    pub fn with_records(count: i64) -> Self {
        let api = FakeApi::default();
        for n in 1..=count {
            api.insert(PropertyInput {
                address: format!("Calle {}", n),
                price: 1000.0 * n as f64,
                size: 10.0 * n as f64,
                description: format!("Listing {}", n),
            });
        }
        api.calls.lock().unwrap().clear();
        api
    }

    fn insert(&self, input: PropertyInput) -> Property {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let property = Property {
            id: PropertyId::Number(*next),
            address: input.address,
            price: input.price,
            size: input.size,
            description: input.description,
        };
        self.records.lock().unwrap().push(property.clone());
        property
    }

    /// Make the next request fail with `status`
    pub fn fail_next(&self, status: u16, message: &str) {
        self.fail_next.lock().unwrap().push_back(ClientError::Http {
            status,
            message: message.to_string(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn id_of(p: &Property) -> i64 {
        match &p.id {
            PropertyId::Number(n) => *n,
            PropertyId::Text(_) => 0,
        }
    }

    fn matches(p: &Property, query: &ListQuery) -> bool {
        let f = &query.filters;
        let contains = |hay: &str, needle: &str| hay.to_lowercase().contains(&needle.to_lowercase());
        let num = |v: &Option<String>| v.as_deref().and_then(|s| s.parse::<f64>().ok());

        f.q.as_deref()
            .map_or(true, |q| contains(&p.address, q) || contains(&p.description, q))
            && f.address.as_deref().map_or(true, |a| contains(&p.address, a))
            && num(&f.min_price).map_or(true, |min| p.price >= min)
            && num(&f.max_price).map_or(true, |max| p.price <= max)
            && num(&f.min_size).map_or(true, |min| p.size >= min)
            && num(&f.max_size).map_or(true, |max| p.size <= max)
    }
}

#[async_trait]
impl PropertyApi for FakeApi {
    async fn list(&self, query: &ListQuery) -> Result<Value> {
        self.record(Call::List(query.clone()))?;

        let mut matching: Vec<Property> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| Self::matches(p, query))
            .cloned()
            .collect();
        matching.sort_by_key(|p| std::cmp::Reverse(Self::id_of(p)));

        let size = query.size as usize;
        let total = matching.len();
        let total_pages = total.div_ceil(size);
        let content: Vec<Property> = matching
            .into_iter()
            .skip(query.page as usize * size)
            .take(size)
            .collect();

        Ok(json!({
            "content": content,
            "totalPages": total_pages,
            "totalElements": total,
            "number": query.page,
            "size": query.size,
        }))
    }

    async fn get(&self, id: &PropertyId) -> Result<Property> {
        self.record(Call::Get(id.clone()))?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or(ClientError::Http {
                status: 404,
                message: "404 Not Found - Property not found".into(),
            })
    }

    async fn create(&self, input: &PropertyInput) -> Result<Value> {
        self.record(Call::Create(input.clone()))?;
        Ok(serde_json::to_value(self.insert(input.clone()))?)
    }

    async fn update(&self, id: &PropertyId, input: &PropertyInput) -> Result<Value> {
        self.record(Call::Update(id.clone(), input.clone()))?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(ClientError::Http {
                status: 404,
                message: "404 Not Found - Property not found".into(),
            })?;
        record.address = input.address.clone();
        record.price = input.price;
        record.size = input.size;
        record.description = input.description.clone();
        Ok(serde_json::to_value(record.clone())?)
    }

    async fn delete(&self, id: &PropertyId) -> Result<()> {
        self.record(Call::Delete(id.clone()))?;
        self.records.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

/// View that keeps what it was asked to show and answers confirms from a script
#[derive(Default)]
pub struct RecordingView {
    pub rows: Vec<RowView>,
    pub pager: Pager,
    pub toasts: Vec<String>,
    pub form_titles: Vec<String>,
    pub shown: Vec<Property>,
    pub confirm_prompts: Vec<String>,
    pub confirm_answers: VecDeque<bool>,
    pub last_state: Option<PageState>,
}

impl RecordingView {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            confirm_answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn addresses(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.address.clone()).collect()
    }

    pub fn last_toast(&self) -> Option<&str> {
        self.toasts.last().map(String::as_str)
    }
}

impl View for RecordingView {
    fn render_rows(&mut self, rows: &[RowView]) {
        self.rows = rows.to_vec();
    }

    fn render_pager(&mut self, pager: &Pager, state: &PageState) {
        self.pager = pager.clone();
        self.last_state = Some(state.clone());
    }

    fn render_form(&mut self, form: &FormController) {
        self.form_titles.push(form.title().to_string());
    }

    fn show_record(&mut self, property: &Property) {
        self.shown.push(property.clone());
    }

    fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast.message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirm_prompts.push(prompt.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }
}
