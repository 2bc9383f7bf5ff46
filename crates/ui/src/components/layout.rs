//! Page chrome shared by section and detail views

use dioxus::prelude::*;

// ============================================================================
// View Header
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ViewHeaderProps {
    pub title: String,

    #[props(default)]
    pub subtitle: Option<String>,

    /// Small label next to the title (protocol, "Disabled", ...)
    #[props(default)]
    pub badge: Option<String>,

    /// Right-aligned controls (switches, action buttons)
    #[props(default)]
    pub actions: Option<Element>,
}

/// Title bar at the top of every page
#[component]
pub fn ViewHeader(props: ViewHeaderProps) -> Element {
    rsx! {
        header {
            class: "flex items-start justify-between gap-4 px-8 py-6 border-b border-slate-700 bg-slate-800/40",

            div {
                div {
                    class: "flex items-center gap-3",
                    h1 { class: "text-2xl font-semibold text-slate-100", "{props.title}" }
                    if let Some(badge) = &props.badge {
                        span {
                            class: "px-2 py-0.5 text-xs rounded-full bg-slate-700 text-slate-300",
                            "{badge}"
                        }
                    }
                }
                if let Some(subtitle) = &props.subtitle {
                    p { class: "mt-1 text-sm text-slate-400", "{subtitle}" }
                }
            }

            if let Some(actions) = props.actions.clone() {
                div { class: "flex items-center gap-3", {actions} }
            }
        }
    }
}

// ============================================================================
// Tabs
// ============================================================================

/// Horizontal tab strip; the caller renders the active tab's content
#[component]
pub fn Tabs(tabs: Vec<String>, active: usize, on_select: EventHandler<usize>) -> Element {
    rsx! {
        nav {
            class: "flex gap-1 px-8 border-b border-slate-700",
            for (index, label) in tabs.iter().enumerate() {
                button {
                    key: "{label}",
                    r#type: "button",
                    class: if index == active {
                        "px-4 py-3 text-sm border-b-2 border-indigo-500 text-slate-100"
                    } else {
                        "px-4 py-3 text-sm border-b-2 border-transparent text-slate-400 hover:text-slate-200"
                    },
                    onclick: move |_| on_select.call(index),
                    "{label}"
                }
            }
        }
    }
}

// ============================================================================
// Empty State
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct EmptyStateProps {
    pub title: String,

    #[props(default)]
    pub message: Option<String>,

    /// Primary call to action
    #[props(default)]
    pub action_label: Option<String>,

    #[props(default)]
    pub on_action: EventHandler<()>,
}

#[component]
pub fn EmptyState(props: EmptyStateProps) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center py-16 text-center",
            div { class: "text-4xl mb-4 opacity-60", "📭" }
            h2 { class: "text-lg font-medium text-slate-200", "{props.title}" }
            if let Some(message) = &props.message {
                p { class: "mt-2 max-w-md text-sm text-slate-400", "{message}" }
            }
            if let Some(label) = &props.action_label {
                button {
                    class: "mt-6 px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded-lg text-sm font-medium text-white",
                    onclick: move |_| props.on_action.call(()),
                    "{label}"
                }
            }
        }
    }
}

// ============================================================================
// Loading & Errors
// ============================================================================

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div {
            class: "flex justify-center py-16 text-slate-400",
            span { class: "animate-spin text-2xl", "⏳" }
        }
    }
}

/// Inline load failure
#[component]
pub fn LoadError(message: String) -> Element {
    rsx! {
        div {
            class: "m-8 p-4 rounded-lg border border-rose-600 bg-rose-950 text-rose-200 text-sm",
            "{message}"
        }
    }
}

/// Titled block inside a detail form
#[component]
pub fn FormSection(title: String, #[props(default)] description: Option<String>, children: Element) -> Element {
    rsx! {
        section {
            class: "mb-8",
            h2 { class: "text-lg font-semibold text-slate-100 mb-1", "{title}" }
            if let Some(description) = description {
                p { class: "text-sm text-slate-400 mb-4", "{description}" }
            }
            div { class: "space-y-4 max-w-2xl", {children} }
        }
    }
}
