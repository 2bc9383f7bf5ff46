//! # Modal Components
//!
//! - **Modal**: backdrop plus a titled panel; clicking the backdrop closes it
//! - **ConfirmModal**: the dialog behind `use_confirm_dialog`
//! - **ButtonVariant**: primary / secondary / danger button styles

use dioxus::prelude::*;

// ============================================================================
// Button Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    /// Borderless, text-only
    Link,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50 disabled:cursor-not-allowed rounded-lg text-sm font-medium text-white transition-colors"
            }
            ButtonVariant::Secondary => {
                "px-4 py-2 bg-slate-700 hover:bg-slate-600 disabled:opacity-50 disabled:cursor-not-allowed rounded-lg text-sm text-slate-100 transition-colors"
            }
            ButtonVariant::Danger => {
                "px-4 py-2 bg-red-600 hover:bg-red-700 disabled:bg-red-600/50 disabled:cursor-not-allowed rounded-lg text-sm font-medium text-white transition-colors"
            }
            ButtonVariant::Link => {
                "px-2 py-1 text-sm text-indigo-400 hover:text-indigo-300 disabled:opacity-50"
            }
        }
    }
}

// ============================================================================
// Modal
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    pub title: String,

    /// Panel width class
    #[props(default = "max-w-lg".to_string())]
    pub width: String,

    pub on_close: EventHandler<()>,

    pub children: Element,
}

#[component]
pub fn Modal(props: ModalProps) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center",

            // Backdrop
            div {
                class: "absolute inset-0 bg-black/50",
                onclick: move |_| props.on_close.call(()),
            }

            div {
                class: "relative bg-slate-800 rounded-lg shadow-xl border border-slate-700 mx-4 w-full {props.width}",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-center justify-between px-6 py-4 border-b border-slate-700",
                    h2 { class: "text-lg font-semibold text-slate-100", "{props.title}" }
                    button {
                        class: "text-slate-400 hover:text-slate-100",
                        title: "Close",
                        onclick: move |_| props.on_close.call(()),
                        "✕"
                    }
                }

                div {
                    class: "p-6",
                    {props.children}
                }
            }
        }
    }
}

// ============================================================================
// Confirm Modal
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmModalProps {
    pub title: String,
    pub message: String,
    pub continue_label: String,

    #[props(default)]
    pub variant: ButtonVariant,

    /// The confirm handler is running
    #[props(default = false)]
    pub busy: bool,

    pub on_confirm: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// Confirmation for destructive or irreversible actions
#[component]
pub fn ConfirmModal(props: ConfirmModalProps) -> Element {
    let busy = props.busy;

    rsx! {
        Modal {
            title: props.title.clone(),
            on_close: move |_| props.on_cancel.call(()),

            div {
                class: "flex items-start gap-4 mb-6",
                if props.variant == ButtonVariant::Danger {
                    div {
                        class: "flex-shrink-0 w-10 h-10 rounded-full bg-red-500/20 flex items-center justify-center",
                        span { class: "text-xl", "⚠️" }
                    }
                }
                p { class: "text-slate-300", "{props.message}" }
            }

            div {
                class: "flex justify-end gap-3",
                button {
                    r#type: "button",
                    class: props.variant.class(),
                    disabled: busy,
                    onclick: move |_| props.on_confirm.call(()),
                    if busy {
                        span { class: "animate-spin", "⏳" }
                    }
                    "{props.continue_label}"
                }
                button {
                    r#type: "button",
                    class: ButtonVariant::Secondary.class(),
                    disabled: busy,
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
