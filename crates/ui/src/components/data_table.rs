//! # Data Table
//!
//! Generic table over a row entity type, driven by an async [`Loader`].
//!
//! ## Features
//!
//! - Spinner while loading, inline error plus a danger alert on failure
//! - Column formatters; the default cell is the field's value taken from the
//!   entity's JSON form
//! - Server-side search (re-invokes the loader from the first page) or local
//!   search (filters the fetched collection on one field)
//! - Pagination asking the loader for `max + 1` rows to learn whether a next
//!   page exists
//! - Row selection with "select all", cleared on every reload
//! - Reloads whenever the `refresh` signal or the global data version changes
//!
//! Loads run inside `use_resource`, so an in-flight load is dropped together
//! with the table.

use dioxus::prelude::*;
use futures::future::LocalBoxFuture;
use kc_console_core::{ConsoleResult, Notify, PAGE_SIZES};
use kc_console_model::filter_by;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::future::Future;
use std::rc::Rc;

use crate::state::{APP_STATE, GlobalAlerts};

// ============================================================================
// Loader
// ============================================================================

type LoadFn<T> = dyn Fn(usize, usize, Option<String>) -> LocalBoxFuture<'static, ConsoleResult<Vec<T>>>;

/// Async source of table rows: `(first, max, search) -> rows`
///
/// Unpaginated tables call it with `(0, 0, ..)`; loaders for them ignore the
/// paging arguments.
pub struct Loader<T>(Rc<LoadFn<T>>);

impl<T: 'static> Loader<T> {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn(usize, usize, Option<String>) -> Fut + 'static,
        Fut: Future<Output = ConsoleResult<Vec<T>>> + 'static,
    {
        Self(Rc::new(move |first, max, search| {
            Box::pin(load(first, max, search)) as LocalBoxFuture<'static, _>
        }))
    }

    pub fn load(
        &self,
        first: usize,
        max: usize,
        search: Option<String>,
    ) -> LocalBoxFuture<'static, ConsoleResult<Vec<T>>> {
        (self.0)(first, max, search)
    }
}

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for Loader<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Columns & Actions
// ============================================================================

/// A table column: entity field, header label and optional cell formatter
pub struct Column<T> {
    pub field: &'static str,
    pub label: &'static str,
    render: Option<Rc<dyn Fn(&T) -> Element>>,
}

impl<T> Column<T> {
    /// Column showing the raw field value
    pub fn new(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            render: None,
        }
    }

    /// Column rendering each cell with `render`
    pub fn render(field: &'static str, label: &'static str, render: impl Fn(&T) -> Element + 'static) -> Self {
        Self {
            field,
            label,
            render: Some(Rc::new(render)),
        }
    }

    /// Column whose cell text is computed from the entity
    pub fn text(field: &'static str, label: &'static str, format: impl Fn(&T) -> String + 'static) -> Self {
        Self::render(field, label, move |row| {
            let text = format(row);
            rsx! { "{text}" }
        })
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            label: self.label,
            render: self.render.clone(),
        }
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.label == other.label
            && match (&self.render, &other.render) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Per-row action (kebab item)
pub struct RowAction<T> {
    pub label: String,
    handler: Rc<dyn Fn(T)>,
}

impl<T> RowAction<T> {
    pub fn new(label: impl Into<String>, handler: impl Fn(T) + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Rc::new(handler),
        }
    }
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<T> PartialEq for RowAction<T> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Rc::ptr_eq(&self.handler, &other.handler)
    }
}

/// How the toolbar search box filters rows
pub enum SearchMode<T> {
    /// No search box
    None,
    /// Pass the term to the loader
    Server,
    /// Filter fetched rows on one field, ignoring case
    Local(Rc<dyn Fn(&T) -> &str>),
}

impl<T> SearchMode<T> {
    pub fn local(field: impl Fn(&T) -> &str + 'static) -> Self {
        SearchMode::Local(Rc::new(field))
    }
}

impl<T> Default for SearchMode<T> {
    fn default() -> Self {
        SearchMode::None
    }
}

impl<T> Clone for SearchMode<T> {
    fn clone(&self) -> Self {
        match self {
            SearchMode::None => SearchMode::None,
            SearchMode::Server => SearchMode::Server,
            SearchMode::Local(field) => SearchMode::Local(field.clone()),
        }
    }
}

impl<T> PartialEq for SearchMode<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SearchMode::None, SearchMode::None) | (SearchMode::Server, SearchMode::Server) => true,
            (SearchMode::Local(a), SearchMode::Local(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Table State
// ============================================================================

/// Paging window and applied search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub first: usize,
    pub max: usize,
    pub search: String,
}

impl TableState {
    pub fn new(max: usize) -> Self {
        Self {
            first: 0,
            max: max.max(1),
            search: String::new(),
        }
    }

    /// Rows to request: one more than shown, to detect a next page
    pub fn request_size(&self) -> usize {
        self.max + 1
    }

    /// Split a fetched page into the rows to show and whether more exist
    pub fn page<T>(&self, mut rows: Vec<T>) -> (Vec<T>, bool) {
        let has_next = rows.len() > self.max;
        rows.truncate(self.max);
        (rows, has_next)
    }

    pub fn has_previous(&self) -> bool {
        self.first > 0
    }

    pub fn next_page(&mut self) {
        self.first += self.max;
    }

    pub fn previous_page(&mut self) {
        self.first = self.first.saturating_sub(self.max);
    }

    /// Change the page size, back to the first page
    pub fn set_max(&mut self, max: usize) {
        self.max = max.max(1);
        self.first = 0;
    }

    /// Start with `term` already applied
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Apply a search term, back to the first page; true when the term changed
    pub fn set_search(&mut self, term: &str) -> bool {
        self.first = 0;
        if self.search == term {
            return false;
        }
        self.search = term.to_string();
        true
    }

    pub fn is_searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Term handed to a server-side loader
    pub fn server_search(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_string())
    }

    /// Rows whose `field` contains the search term; all rows when it is empty
    pub fn filter_local<T: Clone>(&self, rows: &[T], field: &dyn Fn(&T) -> &str) -> Vec<T> {
        filter_by(rows, &self.search, field)
    }
}

/// Selected row indices of the rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeSet<usize>,
}

impl RowSelection {
    pub fn toggle(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Select every rendered row, or clear when all already are
    pub fn toggle_all(&mut self, count: usize) {
        if self.is_all_selected(count) {
            self.selected.clear();
        } else {
            self.selected = (0..count).collect();
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn is_all_selected(&self, count: usize) -> bool {
        count > 0 && (0..count).all(|i| self.selected.contains(&i))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected rows out of `rows`
    pub fn pick<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        self.selected
            .iter()
            .filter_map(|&i| rows.get(i).cloned())
            .collect()
    }
}

/// Apply a search term to the table
///
/// Selected indices point into the rows shown before the change, so a new
/// term drops the selection. Returns whether it did.
pub fn apply_search(state: &mut TableState, selection: &mut RowSelection, term: &str) -> bool {
    let changed = state.set_search(term);
    if changed {
        selection.clear();
    }
    changed
}

/// Text of `field` in an entity's JSON form
///
/// Missing and null fields are empty; arrays are joined with ", ".
pub fn field_text(entity: &Value, field: &str) -> String {
    match entity.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Cell text for optional values: a dash when empty
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

// ============================================================================
// Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps<T: Clone + PartialEq + Serialize + 'static> {
    pub loader: Loader<T>,

    pub columns: Vec<Column<T>>,

    #[props(default)]
    pub actions: Vec<RowAction<T>>,

    #[props(default)]
    pub search: SearchMode<T>,

    #[props(default = "Search".to_string())]
    pub search_placeholder: String,

    /// Search term applied on the first load and shown in the search box
    #[props(default)]
    pub initial_search: Option<String>,

    #[props(default = false)]
    pub paginated: bool,

    #[props(default = 10)]
    pub page_size: usize,

    #[props(default = false)]
    pub selectable: bool,

    /// Called with the selected rows whenever the selection changes
    #[props(default)]
    pub on_selection_change: EventHandler<Vec<T>>,

    /// Bump to reload
    #[props(default)]
    pub refresh: Option<Signal<u64>>,

    /// Extra toolbar content next to the search box
    #[props(default)]
    pub toolbar: Option<Element>,

    /// Shown when the loader returns nothing and no search is applied
    #[props(default)]
    pub empty: Option<Element>,
}

#[component]
pub fn DataTable<T: Clone + PartialEq + Serialize + 'static>(props: DataTableProps<T>) -> Element {
    // latest loader, read when a load starts
    let latest = use_hook(|| Rc::new(RefCell::new(props.loader.clone())));
    *latest.borrow_mut() = props.loader.clone();

    let initial_search = props.initial_search.clone().unwrap_or_default();
    let mut state = use_signal(|| TableState::new(props.page_size).with_search(initial_search.clone()));
    let mut selection = use_signal(RowSelection::default);
    let mut search_text = use_signal(|| initial_search);

    let paginated = props.paginated;
    let server_search = props.search == SearchMode::Server;
    let refresh = props.refresh;
    let on_selection_change = props.on_selection_change;

    let data_version = use_memo(|| APP_STATE.read().data_version);
    let query = use_memo(move || {
        let s = state.read();
        let (first, max) = if paginated { (s.first, s.request_size()) } else { (0, 0) };
        let search = if server_search { s.server_search() } else { None };
        (first, max, search)
    });

    let rows = use_resource(move || {
        let loader = latest.borrow().clone();
        let _ = refresh.map(|r| r());
        let _ = data_version();
        let (first, max, search) = query();
        async move {
            selection.write().clear();
            on_selection_change.call(Vec::new());
            let result = loader.load(first, max, search).await;
            if let Err(err) = &result {
                tracing::warn!("Loading table rows failed: {}", err);
                GlobalAlerts.danger(format!("Could not load: '{}'", err));
            }
            result
        }
    });

    let table_state = state.read().clone();

    let body = match &*rows.read() {
        None => rsx! {
            div {
                class: "flex justify-center py-12 text-slate-400",
                span { class: "animate-spin text-2xl", "⏳" }
            }
        },
        Some(Err(err)) => rsx! {
            div {
                class: "m-4 p-4 rounded-lg border border-rose-600 bg-rose-950 text-rose-200 text-sm",
                "{err}"
            }
        },
        Some(Ok(fetched)) => {
            let (page_rows, has_next) = if paginated {
                table_state.page(fetched.clone())
            } else {
                (fetched.clone(), false)
            };
            let visible = match &props.search {
                SearchMode::Local(field) => table_state.filter_local(&page_rows, &**field),
                _ => page_rows,
            };

            if fetched.is_empty() && !table_state.is_searching() && !table_state.has_previous() {
                match props.empty.clone() {
                    Some(empty) => empty,
                    None => rsx! {
                        p { class: "py-12 text-center text-slate-400", "No items" }
                    },
                }
            } else if visible.is_empty() && table_state.is_searching() {
                rsx! {
                    div {
                        class: "py-12 text-center",
                        p { class: "text-lg text-slate-200 mb-2", "No search results" }
                        p { class: "text-sm text-slate-400", "Click on the search bar above to search again" }
                        button {
                            class: "mt-4 text-sm text-indigo-400 hover:text-indigo-300",
                            onclick: move |_| {
                                search_text.set(String::new());
                                if apply_search(&mut state.write(), &mut selection.write(), "") {
                                    on_selection_change.call(Vec::new());
                                }
                            },
                            "Clear all filters"
                        }
                    }
                }
            } else {
                let visible = Rc::new(visible);
                let selected = selection.read().clone();
                let count = visible.len();
                let all_selected = selected.is_all_selected(count);
                let all_rows = visible.clone();

                let header_cells = props.columns.iter().map(|col| {
                    rsx! {
                        th { key: "{col.field}", class: "px-4 py-2 text-left font-medium", "{col.label}" }
                    }
                });

                let body_rows = visible.iter().enumerate().map(|(index, row)| {
                    let json = serde_json::to_value(row).unwrap_or_default();
                    let cells = props.columns.iter().map(|col| {
                        let content = match &col.render {
                            Some(render) => render(row),
                            None => {
                                let text = field_text(&json, col.field);
                                rsx! { "{text}" }
                            }
                        };
                        rsx! { td { key: "{col.field}", class: "px-4 py-2", {content} } }
                    });
                    let actions = props.actions.iter().map(|action| {
                        let handler = action.handler.clone();
                        let row = row.clone();
                        rsx! {
                            button {
                                key: "{action.label}",
                                class: "px-2 py-1 text-xs rounded text-slate-300 hover:bg-slate-700",
                                onclick: move |_| handler(row.clone()),
                                "{action.label}"
                            }
                        }
                    });
                    let rows_for_select = visible.clone();
                    let is_selected = selected.is_selected(index);

                    rsx! {
                        tr {
                            key: "{index}",
                            class: "border-t border-slate-700 hover:bg-slate-800/60",
                            if props.selectable {
                                td {
                                    class: "px-4 py-2 w-8",
                                    input {
                                        r#type: "checkbox",
                                        class: "accent-indigo-600",
                                        checked: is_selected,
                                        onchange: move |_| {
                                            selection.write().toggle(index);
                                            on_selection_change.call(selection.read().pick(&rows_for_select));
                                        },
                                    }
                                }
                            }
                            {cells}
                            if !props.actions.is_empty() {
                                td {
                                    class: "px-4 py-2 text-right whitespace-nowrap",
                                    {actions}
                                }
                            }
                        }
                    }
                });

                rsx! {
                    table {
                        class: "w-full text-sm text-slate-200",
                        thead {
                            class: "text-slate-400 bg-slate-800/50",
                            tr {
                                if props.selectable {
                                    th {
                                        class: "px-4 py-2 w-8",
                                        input {
                                            r#type: "checkbox",
                                            class: "accent-indigo-600",
                                            title: "Select all rows",
                                            checked: all_selected,
                                            onchange: move |_| {
                                                selection.write().toggle_all(count);
                                                on_selection_change.call(selection.read().pick(&all_rows));
                                            },
                                        }
                                    }
                                }
                                {header_cells}
                                if !props.actions.is_empty() {
                                    th { class: "px-4 py-2" }
                                }
                            }
                        }
                        tbody { {body_rows} }
                    }

                    if paginated {
                        Pagination {
                            first: table_state.first,
                            shown: count,
                            max: table_state.max,
                            has_next,
                            on_previous: move |_| state.write().previous_page(),
                            on_next: move |_| state.write().next_page(),
                            on_max_change: move |max| state.write().set_max(max),
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "data-table bg-slate-900 rounded-lg border border-slate-700",

            div {
                class: "flex items-center gap-3 p-3 border-b border-slate-700",
                if props.search != SearchMode::None {
                    input {
                        class: "w-72 px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500/30",
                        r#type: "search",
                        placeholder: "{props.search_placeholder}",
                        value: "{search_text}",
                        oninput: move |e| {
                            let value = e.value();
                            if !server_search
                                && apply_search(&mut state.write(), &mut selection.write(), &value)
                            {
                                on_selection_change.call(Vec::new());
                            }
                            search_text.set(value);
                        },
                        onkeydown: move |e| {
                            if server_search && e.key() == Key::Enter {
                                let term = search_text.read().clone();
                                if apply_search(&mut state.write(), &mut selection.write(), &term) {
                                    on_selection_change.call(Vec::new());
                                }
                            }
                        },
                    }
                }
                if let Some(toolbar) = props.toolbar.clone() {
                    {toolbar}
                }
            }

            {body}
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[component]
fn Pagination(
    first: usize,
    shown: usize,
    max: usize,
    has_next: bool,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_max_change: EventHandler<usize>,
) -> Element {
    let last = first + shown;
    let from = if shown == 0 { first } else { first + 1 };

    rsx! {
        div {
            class: "flex items-center justify-end gap-3 p-3 border-t border-slate-700 text-sm text-slate-400",
            span { "{from} - {last}" }
            select {
                class: "bg-slate-800 border border-slate-700 rounded px-2 py-1",
                onchange: move |e| {
                    if let Ok(max) = e.value().parse::<usize>() {
                        on_max_change.call(max);
                    }
                },
                for size in PAGE_SIZES.iter() {
                    option {
                        key: "{size}",
                        value: "{size}",
                        selected: *size == max,
                        "{size} per page"
                    }
                }
            }
            button {
                class: "px-2 py-1 rounded hover:bg-slate-700 disabled:opacity-40",
                disabled: first == 0,
                title: "Previous page",
                onclick: move |_| on_previous.call(()),
                "‹"
            }
            button {
                class: "px-2 py-1 rounded hover:bg-slate-700 disabled:opacity-40",
                disabled: !has_next,
                title: "Next page",
                onclick: move |_| on_next.call(()),
                "›"
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_requests_one_extra_row() {
        let state = TableState::new(10);
        assert_eq!(state.request_size(), 11);

        let (rows, has_next) = state.page((0..11).collect::<Vec<_>>());
        assert_eq!(rows.len(), 10);
        assert!(has_next);

        let (rows, has_next) = state.page((0..4).collect::<Vec<_>>());
        assert_eq!(rows.len(), 4);
        assert!(!has_next);
    }

    #[test]
    fn test_paging_moves_by_max() {
        let mut state = TableState::new(20);
        state.next_page();
        state.next_page();
        assert_eq!(state.first, 40);
        state.previous_page();
        assert_eq!(state.first, 20);

        state.set_max(50);
        assert_eq!((state.first, state.max), (0, 50));

        state.previous_page();
        assert_eq!(state.first, 0);
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut state = TableState::new(10);
        state.next_page();
        assert!(state.set_search("  acc "));
        assert_eq!(state.first, 0);
        assert_eq!(state.server_search().as_deref(), Some("acc"));

        assert!(!state.set_search("  acc "));
        assert!(state.set_search(" "));
        assert!(!state.is_searching());
        assert_eq!(state.server_search(), None);
    }

    #[test]
    fn test_initial_search_is_applied() {
        let state = TableState::new(10).with_search("alice");
        assert!(state.is_searching());
        assert_eq!(state.server_search().as_deref(), Some("alice"));
        assert_eq!(TableState::new(10).server_search(), None);
    }

    #[test]
    fn test_new_search_drops_selection() {
        let rows = vec!["Admins".to_string(), "users".to_string(), "auditors".to_string()];
        let name: &dyn Fn(&String) -> &str = &|s| s.as_str();
        let mut state = TableState::new(10);
        let mut selection = RowSelection::default();

        selection.toggle(0);
        assert_eq!(selection.pick(&state.filter_local(&rows, name)), vec!["Admins".to_string()]);

        assert!(apply_search(&mut state, &mut selection, "aud"));
        let visible = state.filter_local(&rows, name);
        assert_eq!(visible, vec!["auditors".to_string()]);
        assert!(selection.pick(&visible).is_empty());
        assert!(!selection.is_selected(0));

        selection.toggle(0);
        assert_eq!(selection.pick(&visible), vec!["auditors".to_string()]);

        // same term again keeps what was picked
        assert!(!apply_search(&mut state, &mut selection, "aud"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_filter_local() {
        let mut state = TableState::new(10);
        let rows = vec!["Admins".to_string(), "users".to_string(), "auditors".to_string()];
        let name: &dyn Fn(&String) -> &str = &|s| s.as_str();

        assert_eq!(state.filter_local(&rows, name), rows);
        state.set_search("AD");
        assert_eq!(state.filter_local(&rows, name), vec!["Admins".to_string()]);
    }

    #[test]
    fn test_select_all_toggles() {
        let mut selection = RowSelection::default();
        selection.toggle(1);
        assert!(!selection.is_all_selected(3));

        selection.toggle_all(3);
        assert!(selection.is_all_selected(3));
        assert_eq!(selection.pick(&["a", "b", "c"]), vec!["a", "b", "c"]);

        selection.toggle_all(3);
        assert!(selection.is_empty());
        assert!(!selection.is_all_selected(0));
    }

    #[test]
    fn test_field_text() {
        let entity = json!({
            "clientId": "account",
            "enabled": true,
            "redirectUris": ["/a", "/b"],
            "description": null
        });
        assert_eq!(field_text(&entity, "clientId"), "account");
        assert_eq!(field_text(&entity, "enabled"), "true");
        assert_eq!(field_text(&entity, "redirectUris"), "/a, /b");
        assert_eq!(field_text(&entity, "description"), "");
        assert_eq!(field_text(&entity, "missing"), "");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "—");
        assert_eq!(or_dash("  "), "—");
        assert_eq!(or_dash("Account console"), "Account console");
    }
}
