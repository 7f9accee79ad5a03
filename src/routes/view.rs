//! View catalog: the lazily-loaded presentation modules routes bind to.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::gateway::Endpoint;

use super::error::LoadError;
use super::loader::{LoaderRef, ViewLoader};

/// Every view the presentation layer ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    MarketOverview,
    PersonalizationSettings,
    HelpSupport,
    ForgotPassword,
    AlertSettings,
    AgentComparison,
}

impl ViewKind {
    pub const ALL: [ViewKind; 6] = [
        ViewKind::MarketOverview,
        ViewKind::PersonalizationSettings,
        ViewKind::HelpSupport,
        ViewKind::ForgotPassword,
        ViewKind::AlertSettings,
        ViewKind::AgentComparison,
    ];

    /// Path the view is mounted at in the default route table.
    pub fn path(self) -> &'static str {
        match self {
            ViewKind::MarketOverview => "/market-overview",
            ViewKind::PersonalizationSettings => "/personalization",
            ViewKind::HelpSupport => "/help-support",
            ViewKind::ForgotPassword => "/forgot-password",
            ViewKind::AlertSettings => "/alert-settings",
            ViewKind::AgentComparison => "/agent-comparison",
        }
    }

    /// Symbolic route name.
    pub fn route_name(self) -> &'static str {
        match self {
            ViewKind::MarketOverview => "marketOverview",
            ViewKind::PersonalizationSettings => "personalizationSettings",
            ViewKind::HelpSupport => "helpSupport",
            ViewKind::ForgotPassword => "forgotPassword",
            ViewKind::AlertSettings => "alertSettings",
            ViewKind::AgentComparison => "agentComparison",
        }
    }

    /// Module the view is loaded from.
    pub fn component(self) -> &'static str {
        match self {
            ViewKind::MarketOverview => "MarketOverview",
            ViewKind::PersonalizationSettings => "PersonalizationSettings",
            ViewKind::HelpSupport => "HelpSupport",
            ViewKind::ForgotPassword => "ForgotPassword",
            ViewKind::AlertSettings => "AlertSettings",
            ViewKind::AgentComparison => "AgentComparison",
        }
    }

    /// Backend operations the view issues once active.
    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            ViewKind::MarketOverview => &[Endpoint::Health, Endpoint::Predict],
            ViewKind::PersonalizationSettings => {
                &[Endpoint::GetPersonalization, Endpoint::SavePersonalization]
            }
            ViewKind::HelpSupport => &[Endpoint::ContactSupport],
            ViewKind::ForgotPassword => &[Endpoint::ForgotPassword],
            ViewKind::AlertSettings => &[Endpoint::SaveAlertRules],
            ViewKind::AgentComparison => &[Endpoint::Predict],
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}

/// A loaded view module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModule {
    pub kind: ViewKind,
    pub component: String,
    pub endpoints: Vec<Endpoint>,
    pub loaded_at: SystemTime,
}

impl ViewModule {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            component: kind.component().to_string(),
            endpoints: kind.endpoints().to_vec(),
            loaded_at: SystemTime::now(),
        }
    }
}

/// Loader that materialises a built-in view on first use.
struct BuiltinViewLoader {
    kind: ViewKind,
}

#[async_trait::async_trait]
impl ViewLoader for BuiltinViewLoader {
    async fn load(&self) -> Result<ViewModule, LoadError> {
        // Suspend once so loading is never synchronous with the navigation call.
        tokio::task::yield_now().await;
        tracing::debug!(view = %self.kind, "View module loaded");
        Ok(ViewModule::new(self.kind))
    }
}

/// Deferred loader for a built-in view.
pub fn lazy_view(kind: ViewKind) -> LoaderRef {
    Arc::new(BuiltinViewLoader { kind })
}
