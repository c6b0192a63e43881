//! Terminal commands and their binding to the page controller.

use crate::api::traits::PropertyApi;
use crate::controller::{FilterKey, PageController};
use crate::models::Property;
use crate::ui::form::Field;
use crate::ui::view::View;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  list                 reload the current page
  page N               go to page N (1-based)
  next | prev          move one page
  search [TEXT]        free-text search (empty clears it)
  filter KEY VALUE     set a filter: address, minPrice, maxPrice, minSize, maxSize
  apply                reload from page 1 with the filters
  clear                clear the filters (search is kept)
  form                 show the form
  set FIELD VALUE      fill a form field: address, price, size, description
  submit               add the property, or save the one being edited
  edit ROW             load row ROW of the table into the form
  cancel               leave edit mode
  delete ROW           delete row ROW (asks first)
  show ROW             fetch row ROW from the server
  help                 this text
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reload,
    Page(i64),
    Next,
    Prev,
    Search(String),
    Filter(FilterKey, String),
    Apply,
    Clear,
    Form,
    Set(Field, String),
    Submit,
    Edit(usize),
    Cancel,
    Delete(usize),
    Show(usize),
    Help,
    Quit,
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

fn parse_row(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a row number, got '{}'", arg)),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "" | "list" | "ls" | "reload" => Command::Reload,
            "page" => {
                let n = rest
                    .parse::<i64>()
                    .map_err(|_| format!("expected a page number, got '{}'", rest))?;
                Command::Page(n.saturating_sub(1))
            }
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "search" | "find" => Command::Search(rest.to_string()),
            "filter" => {
                let (key, value) = split_word(rest);
                Command::Filter(key.parse()?, value.to_string())
            }
            "apply" => Command::Apply,
            "clear" => Command::Clear,
            "form" => Command::Form,
            "set" => {
                let (field, value) = split_word(rest);
                Command::Set(field.parse()?, value.to_string())
            }
            "submit" | "save" => Command::Submit,
            "edit" => Command::Edit(parse_row(rest)?),
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(parse_row(rest)?),
            "show" | "get" => Command::Show(parse_row(rest)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{}' (try `help`)", other)),
        };
        Ok(command)
    }
}

/// What the input loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Print this text and continue
    Message(String),
    Quit,
}

/// Record behind a 1-based table row of the last render
fn row_at<A, V>(controller: &PageController<A, V>, row: usize) -> Result<Property, Flow>
where
    A: PropertyApi,
    V: View,
{
    row.checked_sub(1)
        .and_then(|idx| controller.rows().get(idx))
        .cloned()
        .ok_or_else(|| Flow::Message(format!("no row {} on this page", row)))
}

/// Run one command against the controller
pub async fn dispatch<A, V>(controller: &mut PageController<A, V>, command: Command) -> Flow
where
    A: PropertyApi,
    V: View,
{
    match command {
        Command::Reload => {
            let page = controller.state().page;
            controller.load_page(page).await;
        }
        Command::Page(page) => controller.goto_page(page).await,
        Command::Next => controller.next_page().await,
        Command::Prev => controller.prev_page().await,
        Command::Search(text) => controller.set_search(text).await,
        Command::Filter(key, value) => controller.set_filter(key, value),
        Command::Apply => controller.apply_filters().await,
        Command::Clear => controller.clear_filters().await,
        Command::Form => controller.show_form(),
        Command::Set(field, value) => controller.set_field(field, value),
        Command::Submit => controller.submit().await,
        Command::Cancel => controller.cancel_edit(),
        Command::Edit(row) => match row_at(controller, row) {
            Ok(property) => controller.start_edit(&property),
            Err(flow) => return flow,
        },
        Command::Delete(row) => match row_at(controller, row) {
            Ok(property) => controller.delete(&property.id).await,
            Err(flow) => return flow,
        },
        Command::Show(row) => match row_at(controller, row) {
            Ok(property) => controller.show(&property.id).await,
            Err(flow) => return flow,
        },
        Command::Help => return Flow::Message(HELP.to_string()),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}
