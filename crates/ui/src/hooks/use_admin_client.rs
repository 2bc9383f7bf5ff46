//! Access to the shared admin REST client and console settings

use dioxus::prelude::*;
use kc_console_admin::AdminClient;
use kc_console_core::{ConsoleConfig, PAGE_SIZES};

/// The admin client provided at launch
///
/// Panics if called outside the application root, which always provides one.
pub fn use_admin_client() -> AdminClient {
    use_context::<AdminClient>()
}

/// Rows per page for paginated tables
pub fn use_page_size() -> usize {
    try_use_context::<ConsoleConfig>()
        .map(|config| config.page_size)
        .unwrap_or(PAGE_SIZES[0])
}
