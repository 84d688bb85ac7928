use std::sync::Arc;

use async_trait::async_trait;

use maklaro_core::AppResult;
use maklaro_domain::Tenant;

use super::token_crypto::generate_setup_token;
use crate::provisioning_ports::IdentityProvider;

/// Port for sending emails. Infrastructure provides SMTP or console
/// implementations.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a plain-text or HTML email.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()>;
}

/// How long a credential setup link stays valid.
const SETUP_LINK_VALIDITY_HOURS: i64 = 72;

/// Outcome of a credential handoff attempt. Delivery failure is data here,
/// never an error: a provisioned administrator without a setup email is a
/// recoverable state, an unprovisioned one is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHandoffOutcome {
    /// Whether the handoff email was dispatched.
    pub sent: bool,
    /// Failure description when dispatch did not happen.
    pub failure: Option<String>,
}

impl CredentialHandoffOutcome {
    /// Outcome for calls that intentionally skip the handoff.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            sent: false,
            failure: None,
        }
    }
}

/// Issues one-time credential setup links and emails them to freshly
/// provisioned administrators.
#[derive(Clone)]
pub struct CredentialHandoffService {
    identities: Arc<dyn IdentityProvider>,
    email_service: Arc<dyn EmailService>,
    tenant_base_domain: String,
}

impl CredentialHandoffService {
    /// Creates a new credential handoff service.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityProvider>,
        email_service: Arc<dyn EmailService>,
        tenant_base_domain: String,
    ) -> Self {
        Self {
            identities,
            email_service,
            tenant_base_domain,
        }
    }

    /// Requests a setup link scoped to the tenant's portal and dispatches it.
    ///
    /// Never fails the caller; the returned outcome records delivery
    /// problems instead.
    pub async fn send_credential_handoff(
        &self,
        email: &str,
        tenant: &Tenant,
    ) -> CredentialHandoffOutcome {
        match self.dispatch(email, tenant).await {
            Ok(()) => CredentialHandoffOutcome {
                sent: true,
                failure: None,
            },
            Err(error) => {
                tracing::warn!(
                    tenant_id = %tenant.id(),
                    email,
                    %error,
                    "credential handoff failed; administrator is provisioned but not notified"
                );

                CredentialHandoffOutcome {
                    sent: false,
                    failure: Some(error.to_string()),
                }
            }
        }
    }

    async fn dispatch(&self, email: &str, tenant: &Tenant) -> AppResult<()> {
        let (raw_token, token_hash) = generate_setup_token()?;
        let portal_url = tenant.portal_url(&self.tenant_base_domain);
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(SETUP_LINK_VALIDITY_HOURS);

        self.identities
            .store_credential_setup_token(email, &token_hash, &portal_url, expires_at)
            .await?;

        let setup_url = format!("{portal_url}/setup-credentials?token={raw_token}");

        let subject = format!(
            "Your administrator access to {} on Maklaro",
            tenant.name().as_str()
        );
        let text_body = format!(
            "You have been set up as an administrator of {tenant_name} on Maklaro.\n\n\
             Choose your own password by clicking the link below:\n{setup_url}\n\n\
             This link expires in {SETUP_LINK_VALIDITY_HOURS} hours.\n\n\
             If you did not expect this email, please contact your brokerage.",
            tenant_name = tenant.name().as_str()
        );

        self.email_service
            .send_email(email, &subject, &text_body, None)
            .await
    }
}
