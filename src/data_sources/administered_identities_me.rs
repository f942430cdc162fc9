//! `meraki_administered_identities_me`: the identity behind the API key.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{encode, require_data, DataSource};
use crate::client::models::{
    EnabledFlag, Identity, IdentityAuthentication, IdentityAuthenticationApi,
};
use crate::client::{ops, DashboardApi};
use crate::convert::object;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /administered/identities/me`.
pub struct AdministeredIdentitiesMe;

#[derive(Debug, Serialize)]
struct State {
    item: IdentityState,
}

#[derive(Debug, Serialize)]
struct IdentityState {
    authentication: Option<AuthenticationState>,
    email: Option<String>,
    last_used_dashboard_at: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthenticationState {
    api: Option<AuthenticationApiState>,
    mode: Option<String>,
    saml: Option<EnabledState>,
    two_factor: Option<EnabledState>,
}

#[derive(Debug, Serialize)]
struct AuthenticationApiState {
    key: Option<ApiKeyState>,
}

#[derive(Debug, Serialize)]
struct ApiKeyState {
    created: Option<bool>,
}

#[derive(Debug, Serialize)]
struct EnabledState {
    enabled: Option<bool>,
}

impl From<EnabledFlag> for EnabledState {
    fn from(flag: EnabledFlag) -> Self {
        Self { enabled: flag.enabled }
    }
}

impl From<IdentityAuthenticationApi> for AuthenticationApiState {
    fn from(api: IdentityAuthenticationApi) -> Self {
        Self {
            key: api.key.map(|key| ApiKeyState { created: key.created }),
        }
    }
}

impl From<IdentityAuthentication> for AuthenticationState {
    fn from(auth: IdentityAuthentication) -> Self {
        Self {
            api: object(auth.api),
            mode: auth.mode,
            saml: object(auth.saml),
            two_factor: object(auth.two_factor),
        }
    }
}

impl From<Identity> for IdentityState {
    fn from(identity: Identity) -> Self {
        Self {
            authentication: object(identity.authentication),
            email: identity.email,
            last_used_dashboard_at: identity.last_used_dashboard_at,
            name: identity.name,
        }
    }
}

fn enabled_block(description: &str) -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_description(description)
            .with_attribute("enabled", Attribute::computed_bool()),
    )
}

#[async_trait]
impl DataSource for AdministeredIdentitiesMe {
    fn type_name(&self) -> &'static str {
        "administered_identities_me"
    }

    fn schema(&self) -> Schema {
        let authentication = Block::new()
            .with_description("Authentication info")
            .with_block(
                "api",
                NestedBlock::single(
                    Block::new().with_description("API authentication").with_block(
                        "key",
                        NestedBlock::single(
                            Block::new()
                                .with_description("API key")
                                .with_attribute("created", Attribute::computed_bool().with_description("If API key is created for this user")),
                        ),
                    ),
                ),
            )
            .with_attribute("mode", Attribute::computed_string().with_description("Authentication mode"))
            .with_block("saml", enabled_block("SAML authentication"))
            .with_block("two_factor", enabled_block("TwoFactor authentication"));

        Schema::v0()
            .with_description("Returns the identity of the current user.")
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new()
                        .with_block("authentication", NestedBlock::single(authentication))
                        .with_attribute("email", Attribute::computed_string().with_description("User email"))
                        .with_attribute(
                            "last_used_dashboard_at",
                            Attribute::computed_string().with_description("Last seen active on Dashboard UI"),
                        )
                        .with_attribute("name", Attribute::computed_string().with_description("Username")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, _config: Value) -> Result<Value, ProviderError> {
        debug!(operation = ops::GET_ADMINISTERED_IDENTITIES_ME, "Calling Dashboard API");
        let identity = require_data(
            ops::GET_ADMINISTERED_IDENTITIES_ME,
            client.get_administered_identities_me().await,
        )?;
        encode(&State {
            item: identity.into(),
        })
    }
}
