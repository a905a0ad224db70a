//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::services::OrderNotifier;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Supabase client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    supabase: SupabaseClient,
    notifier: Option<OrderNotifier>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The notifier is only constructed when the Gmail variable group is
    /// configured; without it the shop runs fine, just without emails.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let supabase = SupabaseClient::new(&config.supabase);
        let notifier = config.gmail.clone().map(OrderNotifier::new);

        if notifier.is_none() {
            tracing::warn!("Gmail not configured; order notification emails disabled");
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                notifier,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the Supabase REST client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get the order notifier, if email is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&OrderNotifier> {
        self.inner.notifier.as_ref()
    }
}
