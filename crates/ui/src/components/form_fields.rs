//! # Composite Form Fields
//!
//! - **MultiLineInput**: one editable row per list value (redirect URIs,
//!   web origins); always at least one row
//! - **KeyValueInput**: attribute rows
//! - **TimeSelector**: a duration in seconds edited as value + unit
//!
//! All three are controlled: they render the rows they are given and report
//! the full new list on every edit.

use dioxus::prelude::*;
use kc_console_core::TimeUnit;
use kc_console_model::{KeyValue, TimeValue};

use super::inputs::FormGroup;

// ============================================================================
// Row Editing
// ============================================================================

/// Replace row `index`
fn set_row<T: Clone>(rows: &[T], index: usize, value: T) -> Vec<T> {
    let mut rows = rows.to_vec();
    if let Some(row) = rows.get_mut(index) {
        *row = value;
    }
    rows
}

/// Remove row `index`, leaving one blank row when it was the last
fn remove_row<T: Clone + Default>(rows: &[T], index: usize) -> Vec<T> {
    let mut rows = rows.to_vec();
    if index < rows.len() {
        rows.remove(index);
    }
    if rows.is_empty() {
        rows.push(T::default());
    }
    rows
}

fn add_row<T: Clone + Default>(rows: &[T]) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.push(T::default());
    rows
}

const ROW_INPUT: &str = "flex-1 px-3 py-2 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100 focus:outline-none focus:ring-2 focus:ring-indigo-500/30";
const ROW_BUTTON: &str = "px-2 text-slate-400 hover:text-rose-400 disabled:opacity-30";
const ADD_BUTTON: &str = "mt-1 text-sm text-indigo-400 hover:text-indigo-300";

// ============================================================================
// Multi-Line Input
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct MultiLineInputProps {
    pub label: String,

    pub rows: Vec<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = "Add".to_string())]
    pub add_label: String,

    pub on_change: EventHandler<Vec<String>>,
}

#[component]
pub fn MultiLineInput(props: MultiLineInputProps) -> Element {
    let rows = props.rows.clone();
    let single = rows.len() <= 1;
    let on_change = props.on_change;

    rsx! {
        FormGroup {
            label: props.label.clone(),
            help_text: props.help_text.clone(),

            div {
                class: "space-y-2",
                for (index, value) in rows.iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "flex gap-2",
                        input {
                            class: ROW_INPUT,
                            value: "{value}",
                            oninput: {
                                let rows = rows.clone();
                                move |e: FormEvent| on_change.call(set_row(&rows, index, e.value()))
                            },
                        }
                        button {
                            r#type: "button",
                            class: ROW_BUTTON,
                            title: "Remove",
                            disabled: single && value.is_empty(),
                            onclick: {
                                let rows = rows.clone();
                                move |_| on_change.call(remove_row(&rows, index))
                            },
                            "✕"
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: ADD_BUTTON,
                    onclick: {
                        let rows = rows.clone();
                        move |_| on_change.call(add_row(&rows))
                    },
                    "+ {props.add_label}"
                }
            }
        }
    }
}

// ============================================================================
// Key / Value Input
// ============================================================================

#[component]
pub fn KeyValueInput(rows: Vec<KeyValue>, on_change: EventHandler<Vec<KeyValue>>) -> Element {
    rsx! {
        div {
            class: "space-y-2 max-w-2xl",
            div {
                class: "flex gap-2 text-xs font-medium text-slate-400",
                span { class: "flex-1", "Key" }
                span { class: "flex-1", "Value" }
                span { class: "w-6" }
            }
            for (index, row) in rows.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "flex gap-2",
                    input {
                        class: ROW_INPUT,
                        placeholder: "Type a key",
                        value: "{row.key}",
                        oninput: {
                            let rows = rows.clone();
                            let row = row.clone();
                            move |e: FormEvent| {
                                let edited = KeyValue::new(e.value(), row.value.clone());
                                on_change.call(set_row(&rows, index, edited));
                            }
                        },
                    }
                    input {
                        class: ROW_INPUT,
                        placeholder: "Type a value",
                        value: "{row.value}",
                        oninput: {
                            let rows = rows.clone();
                            let row = row.clone();
                            move |e: FormEvent| {
                                let edited = KeyValue::new(row.key.clone(), e.value());
                                on_change.call(set_row(&rows, index, edited));
                            }
                        },
                    }
                    button {
                        r#type: "button",
                        class: ROW_BUTTON,
                        title: "Remove",
                        onclick: {
                            let rows = rows.clone();
                            move |_| on_change.call(remove_row(&rows, index))
                        },
                        "✕"
                    }
                }
            }
            button {
                r#type: "button",
                class: ADD_BUTTON,
                onclick: {
                    let rows = rows.clone();
                    move |_| on_change.call(add_row(&rows))
                },
                "+ Add attribute"
            }
        }
    }
}

// ============================================================================
// Time Selector
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TimeSelectorProps {
    pub label: String,

    /// Duration in seconds
    pub seconds: u64,

    #[props(default)]
    pub help_text: Option<String>,

    pub on_change: EventHandler<u64>,
}

/// Seconds for a typed value in `unit`; blank input counts as zero
fn parse_duration(text: &str, unit: TimeUnit) -> Result<u64, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    let value = text
        .parse::<u64>()
        .map_err(|_| "Enter a whole number")?;
    TimeValue { value, unit }
        .to_seconds()
        .ok_or("Duration is too long")
}

#[component]
pub fn TimeSelector(props: TimeSelectorProps) -> Element {
    // the unit is the user's choice; it only falls back when the value does not divide
    let mut unit = use_signal(|| TimeValue::from_seconds(props.seconds).unit);
    let mut rejected = use_signal(|| None::<(String, &'static str)>);
    let on_change = props.on_change;

    let time = TimeValue::in_unit(props.seconds, unit());
    let (shown, error) = match rejected() {
        Some((text, message)) => (text, Some(message.to_string())),
        None => (time.value.to_string(), None),
    };

    rsx! {
        FormGroup {
            label: props.label.clone(),
            help_text: props.help_text.clone(),
            error,

            div {
                class: "flex gap-2 max-w-xs",
                input {
                    class: ROW_INPUT,
                    r#type: "number",
                    min: "0",
                    value: "{shown}",
                    oninput: move |e: FormEvent| {
                        let text = e.value();
                        match parse_duration(&text, time.unit) {
                            Ok(seconds) => {
                                rejected.set(None);
                                unit.set(time.unit);
                                on_change.call(seconds);
                            }
                            Err(message) => rejected.set(Some((text, message))),
                        }
                    },
                }
                select {
                    class: "px-3 py-2 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100",
                    onchange: move |e: FormEvent| {
                        let Some(next) = TimeUnit::parse(&e.value()) else {
                            return;
                        };
                        unit.set(next);
                        if rejected.peek().is_some() {
                            return;
                        }
                        match (TimeValue { value: time.value, unit: next }).to_seconds() {
                            Some(seconds) => on_change.call(seconds),
                            None => rejected.set(Some((time.value.to_string(), "Duration is too long"))),
                        }
                    },
                    for option_unit in TimeUnit::all().iter() {
                        option {
                            key: "{option_unit.as_str()}",
                            value: option_unit.as_str(),
                            selected: *option_unit == time.unit,
                            "{option_unit.display_name()}"
                        }
                    }
                }
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

    #[test]
    fn test_remove_last_row_leaves_blank() {
        let rows = vec!["https://app/*".to_string()];
        assert_eq!(remove_row(&rows, 0), vec![String::new()]);
    }

    #[test]
    fn test_row_edits() {
        let rows = vec!["a".to_string(), "b".to_string()];
        assert_eq!(set_row(&rows, 1, "c".to_string()), vec!["a", "c"]);
        assert_eq!(remove_row(&rows, 0), vec!["b"]);
        assert_eq!(add_row(&rows).len(), 3);
        // out of range is a no-op
        assert_eq!(set_row(&rows, 5, "x".to_string()), rows);
    }

    #[test]
    fn test_duration_input() {
        assert_eq!(parse_duration("60", TimeUnit::Minute), Ok(3_600));
        assert_eq!(parse_duration(" ", TimeUnit::Hour), Ok(0));
        assert_eq!(parse_duration("-1", TimeUnit::Second), Err("Enter a whole number"));
        assert_eq!(
            parse_duration("999999999999999999", TimeUnit::Day),
            Err("Duration is too long")
        );
    }

    #[test]
    fn test_key_value_rows() {
        let rows = vec![KeyValue::new("color", "blue")];
        let rows = add_row(&rows);
        assert_eq!(rows[1], KeyValue::default());
        assert_eq!(remove_row(&rows, 0), vec![KeyValue::default()]);
    }
}
