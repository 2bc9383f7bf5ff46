//! Toast stack rendering the global alert queue

use dioxus::prelude::*;
use kc_console_core::AlertVariant;
use std::time::{Duration, Instant};

use crate::state::APP_STATE;

/// How often expired alerts are swept
const EXPIRY_TICK: Duration = Duration::from_secs(1);

/// Fixed-position stack of alerts, newest last
#[component]
pub fn AlertPanel() -> Element {
    // sweep expired alerts for as long as the panel is mounted
    use_future(|| async {
        loop {
            tokio::time::sleep(EXPIRY_TICK).await;
            let now = Instant::now();
            let expired = APP_STATE.read().alerts.alerts().iter().any(|a| a.is_expired(now));
            if expired {
                APP_STATE.write().alerts.expire(now);
            }
        }
    });

    let alerts = APP_STATE.read().alerts.alerts().to_vec();

    rsx! {
        div {
            class: "fixed top-4 right-4 z-[60] flex flex-col gap-2 w-96 max-w-full",

            for alert in alerts {
                div {
                    key: "{alert.id}",
                    class: "alert flex items-start gap-3 p-3 rounded-lg border shadow-lg {variant_class(alert.variant)}",
                    span { class: "shrink-0", "{alert.variant.icon()}" }
                    p { class: "flex-1 text-sm break-words", "{alert.message}" }
                    button {
                        class: "shrink-0 text-slate-400 hover:text-slate-100",
                        title: "Close",
                        onclick: move |_| {
                            APP_STATE.write().alerts.dismiss(alert.id);
                        },
                        "✕"
                    }
                }
            }
        }
    }
}

fn variant_class(variant: AlertVariant) -> &'static str {
    match variant {
        AlertVariant::Success => "bg-emerald-950 border-emerald-600 text-emerald-100",
        AlertVariant::Danger => "bg-rose-950 border-rose-600 text-rose-100",
        AlertVariant::Warning => "bg-amber-950 border-amber-600 text-amber-100",
        AlertVariant::Info => "bg-sky-950 border-sky-600 text-sky-100",
        AlertVariant::Default => "bg-slate-800 border-slate-600 text-slate-100",
    }
}
