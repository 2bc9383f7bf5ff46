//! # Confirm Dialog Hook
//!
//! Hook pairing a toggle handle with the modal it controls.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
//!     title: format!("Delete {} ?", client_id),
//!     message: "If you delete this client, all associated data will be removed.".into(),
//!     continue_label: "Delete".into(),
//!     variant: ButtonVariant::Danger,
//!     on_confirm: confirm_action(move || async move {
//!         ops::clients::delete_client(&api, &id, &mut GlobalAlerts).await;
//!     }),
//! });
//!
//! rsx! {
//!     button { onclick: move |_| toggle_delete.toggle(), "Delete" }
//!     {delete_dialog}
//! }
//! ```

use dioxus::prelude::*;
use futures::future::LocalBoxFuture;
use std::future::Future;
use std::rc::Rc;

use crate::components::{ButtonVariant, ConfirmModal};

// ============================================================================
// Confirm State
// ============================================================================

/// Open/in-flight state of one confirm dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmState {
    pub open: bool,
    /// The confirm handler is running
    pub in_flight: bool,
}

impl ConfirmState {
    /// Open a closed dialog or close an idle one
    pub fn toggle(&mut self) {
        if !self.in_flight {
            self.open = !self.open;
        }
    }

    /// Close without confirming; ignored while the handler runs
    pub fn cancel(&mut self) {
        if !self.in_flight {
            self.open = false;
        }
    }

    /// Claim the confirmation; false if closed or already confirming
    pub fn begin(&mut self) -> bool {
        if !self.open || self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// The handler finished: close the dialog
    pub fn finish(&mut self) {
        self.in_flight = false;
        self.open = false;
    }
}

// ============================================================================
// Config & Handle
// ============================================================================

/// Async handler run when the user confirms
pub type ConfirmAction = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Wrap an async closure as a [`ConfirmAction`]
pub fn confirm_action<F, Fut>(action: F) -> ConfirmAction
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    Rc::new(move || Box::pin(action()) as LocalBoxFuture<'static, ()>)
}

pub struct ConfirmDialogConfig {
    pub title: String,
    pub message: String,
    pub continue_label: String,
    pub variant: ButtonVariant,
    pub on_confirm: ConfirmAction,
}

/// Handle opening the dialog returned by [`use_confirm_dialog`]
#[derive(Clone, Copy, PartialEq)]
pub struct ConfirmToggle {
    state: Signal<ConfirmState>,
}

impl ConfirmToggle {
    pub fn toggle(&self) {
        let mut state = self.state;
        state.write().toggle();
    }

    pub fn is_open(&self) -> bool {
        self.state.read().open
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Confirm dialog bound to this component
///
/// The element must be rendered by the caller; it is empty while closed.
/// Confirming runs the handler once and closes the dialog when it completes.
pub fn use_confirm_dialog(config: ConfirmDialogConfig) -> (ConfirmToggle, Element) {
    let mut state = use_signal(ConfirmState::default);
    let toggle = ConfirmToggle { state };

    let current = *state.read();
    if !current.open {
        return (toggle, rsx! {});
    }

    let action = config.on_confirm.clone();
    let element = rsx! {
        ConfirmModal {
            title: config.title,
            message: config.message,
            continue_label: config.continue_label,
            variant: config.variant,
            busy: current.in_flight,
            on_confirm: move |_| {
                if !state.write().begin() {
                    return;
                }
                let action = action.clone();
                spawn(async move {
                    action().await;
                    state.write().finish();
                });
            },
            on_cancel: move |_| state.write().cancel(),
        }
    };

    (toggle, element)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_never_confirms() {
        let mut state = ConfirmState::default();
        state.toggle();
        state.cancel();

        assert!(!state.open);
        assert!(!state.begin());
    }

    #[test]
    fn test_confirm_runs_once() {
        let mut state = ConfirmState::default();
        state.toggle();

        assert!(state.begin());
        assert!(!state.begin());
        state.cancel();
        assert!(state.open, "cancel is ignored while confirming");

        state.finish();
        assert_eq!(state, ConfirmState::default());
    }

    #[test]
    fn test_toggle_closes_idle_dialog() {
        let mut state = ConfirmState::default();
        state.toggle();
        state.toggle();
        assert!(!state.open);
    }
}
