//! # Input Components
//!
//! Form controls shared by every detail form:
//! - **TextInput** / **TextArea**: text fields with label, help and inline error
//! - **Select**: dropdown over [`SelectOption`]s
//! - **Checkbox**: row selection and boolean options
//! - **Switch**: on/off setting rendered as a track and knob
//! - **FormGroup**: label + help + error wrapper around custom controls
//!
//! Inline errors come from [`FieldErrors`](kc_console_core::FieldErrors);
//! pass `errors.message("field")` as the `error` prop.

use dioxus::prelude::*;

// ============================================================================
// Label
// ============================================================================

#[component]
fn FieldLabel(label: String, #[props(default)] required: bool) -> Element {
    rsx! {
        label {
            class: "block text-sm font-medium text-slate-300 mb-1.5",
            "{label}"
            if required {
                span { class: "text-rose-400 ml-0.5", "*" }
            }
        }
    }
}

#[component]
fn FieldFeedback(error: Option<String>, help_text: Option<String>) -> Element {
    if let Some(error) = error {
        rsx! { p { class: "mt-1 text-xs text-rose-400", "{error}" } }
    } else if let Some(help) = help_text {
        rsx! { p { class: "mt-1 text-xs text-slate-500", "{help}" } }
    } else {
        rsx! {}
    }
}

// ============================================================================
// Text Input
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    /// Inline error; also switches the border to the error color
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default = false)]
    pub readonly: bool,

    /// `text`, `password`, `url`, ...
    #[props(default = "text".to_string())]
    pub input_type: String,

    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Called with the current value when Enter is pressed
    #[props(default)]
    pub on_enter: EventHandler<String>,

    /// Called with the current value when the input loses focus
    #[props(default)]
    pub on_blur: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let class = input_class(props.error.is_some(), props.disabled || props.readonly);
    let value = props.value.clone();
    let blur_value = props.value.clone();

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = props.label.clone() {
                FieldLabel { label, required: props.required }
            }

            input {
                class: "{class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.clone().unwrap_or_default(),
                disabled: props.disabled,
                readonly: props.readonly,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(value.clone());
                    }
                },
                onblur: move |_| props.on_blur.call(blur_value.clone()),
            }

            FieldFeedback { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Text Area
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub readonly: bool,

    #[props(default = 3)]
    pub rows: u32,

    /// Render the value in a monospace font (JSON, adapter snippets)
    #[props(default = false)]
    pub monospace: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let mut class = input_class(props.error.is_some(), props.readonly);
    class.push_str(" resize-y");
    if props.monospace {
        class.push_str(" font-mono text-xs");
    }

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = props.label.clone() {
                FieldLabel { label, required: props.required }
            }

            textarea {
                class: "{class}",
                rows: "{props.rows}",
                readonly: props.readonly,
                value: "{props.value}",
                oninput: move |e| props.on_change.call(e.value()),
            }

            FieldFeedback { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Select
// ============================================================================

/// One entry of a [`Select`]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    /// Leading empty option, selected when `value` is empty
    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown selection component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let mut class = input_class(props.error.is_some(), props.disabled);
    class.push_str(" appearance-none cursor-pointer");

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = props.label.clone() {
                FieldLabel { label, required: props.required }
            }

            select {
                class: "{class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for option in props.options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }

            FieldFeedback { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Checkbox
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        label {
            class: "inline-flex items-center gap-2 text-sm text-slate-200 cursor-pointer select-none",
            class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "" },

            input {
                class: "w-4 h-4 rounded border-slate-500 bg-slate-800 accent-indigo-600",
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
            }

            if let Some(label) = &props.label {
                span { "{label}" }
            }
        }
    }
}

// ============================================================================
// Switch
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SwitchProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    /// Text next to the track when on / off
    #[props(default = "On".to_string())]
    pub on_label: String,

    #[props(default = "Off".to_string())]
    pub off_label: String,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// On/off switch for boolean settings
#[component]
pub fn Switch(props: SwitchProps) -> Element {
    let (track, knob) = switch_classes(props.checked);
    let state_label = if props.checked {
        props.on_label.clone()
    } else {
        props.off_label.clone()
    };

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = props.label.clone() {
                FieldLabel { label }
            }

            button {
                r#type: "button",
                class: "flex items-center gap-3",
                class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "cursor-pointer" },
                disabled: props.disabled,
                onclick: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
                span {
                    class: "{track}",
                    span { class: "{knob}" }
                }
                span { class: "text-sm text-slate-300", "{state_label}" }
            }

            FieldFeedback { error: None, help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Form Group
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct FormGroupProps {
    pub label: String,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    pub children: Element,
}

/// Label and feedback around an arbitrary control
#[component]
pub fn FormGroup(props: FormGroupProps) -> Element {
    rsx! {
        div {
            class: "form-group",
            FieldLabel { label: props.label.clone(), required: props.required }
            {props.children}
            FieldFeedback { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Classes for text-like controls
fn input_class(has_error: bool, inactive: bool) -> String {
    let border = if has_error {
        "border-rose-500 focus:ring-rose-500/30 focus:border-rose-500"
    } else {
        "border-slate-700 focus:ring-indigo-500/30 focus:border-indigo-500"
    };
    let mut class = format!(
        "w-full px-3 py-2 bg-slate-800 border rounded-lg text-sm text-slate-100 \
         placeholder-slate-500 transition-colors focus:outline-none focus:ring-2 {}",
        border
    );
    if inactive {
        class.push_str(" opacity-50 cursor-not-allowed");
    }
    class
}

/// Track and knob classes of a [`Switch`]
fn switch_classes(checked: bool) -> (&'static str, &'static str) {
    if checked {
        (
            "relative inline-flex w-10 h-6 rounded-full bg-indigo-600 transition-colors",
            "absolute top-1 left-5 w-4 h-4 rounded-full bg-white transition-all",
        )
    } else {
        (
            "relative inline-flex w-10 h-6 rounded-full bg-slate-600 transition-colors",
            "absolute top-1 left-1 w-4 h-4 rounded-full bg-white transition-all",
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_class() {
        let class = input_class(false, false);
        assert!(class.contains("border-slate-700"));
        assert!(!class.contains("border-rose-500"));
        assert!(!class.contains("opacity-50"));
    }

    #[test]
    fn test_input_class_error_and_inactive() {
        let class = input_class(true, true);
        assert!(class.contains("border-rose-500"));
        assert!(class.contains("cursor-not-allowed"));
    }

    #[test]
    fn test_switch_knob_moves() {
        assert!(switch_classes(true).1.contains("left-5"));
        assert!(switch_classes(false).1.contains("left-1"));
        assert!(switch_classes(true).0.contains("bg-indigo-600"));
    }

    #[test]
    fn test_plain_option() {
        let option = SelectOption::plain("S256");
        assert_eq!(option.value, "S256");
        assert_eq!(option.label, "S256");
    }
}
