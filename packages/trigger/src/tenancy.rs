//! Ambient tenant/locale resolution for trigger events.

use task_core::{Locale, Tenant};

/// Provides the tenant and locale a trigger runs under.
///
/// Resolved when the trigger is dispatched, not when the service is
/// constructed, so request-scoped implementations always report the
/// current identity.
pub trait TenancyProvider: Send + Sync {
    /// Tenant on whose behalf the task runs.
    fn tenant(&self) -> Tenant;

    /// Content locale the task operates on.
    fn locale(&self) -> Locale;
}

/// Tenancy provider with a fixed tenant and locale.
#[derive(Debug, Clone, Default)]
pub struct FixedTenancy {
    tenant: Tenant,
    locale: Locale,
}

impl FixedTenancy {
    /// Create a provider for the given tenant and locale.
    pub fn new(tenant: Tenant, locale: Locale) -> Self {
        Self { tenant, locale }
    }
}

impl TenancyProvider for FixedTenancy {
    fn tenant(&self) -> Tenant {
        self.tenant.clone()
    }

    fn locale(&self) -> Locale {
        self.locale.clone()
    }
}
