//! `meraki_devices_switch_ports`: ports of a switch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::computed_string_list;
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::SwitchPort;
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /devices/{serial}/switch/ports`.
pub struct DevicesSwitchPorts;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    serial: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    items: Vec<PortState>,
}

#[derive(Debug, Serialize)]
struct PortState {
    access_policy_type: Option<String>,
    allowed_vlans: Option<String>,
    enabled: Option<bool>,
    isolation_enabled: Option<bool>,
    link_negotiation: Option<String>,
    name: Option<String>,
    poe_enabled: Option<bool>,
    port_id: Option<String>,
    rstp_enabled: Option<bool>,
    sticky_mac_allow_list_limit: Option<i64>,
    stp_guard: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    port_type: Option<String>,
    vlan: Option<i64>,
    voice_vlan: Option<i64>,
}

impl From<SwitchPort> for PortState {
    fn from(port: SwitchPort) -> Self {
        Self {
            access_policy_type: port.access_policy_type,
            allowed_vlans: port.allowed_vlans,
            enabled: port.enabled,
            isolation_enabled: port.isolation_enabled,
            link_negotiation: port.link_negotiation,
            name: port.name,
            poe_enabled: port.poe_enabled,
            port_id: port.port_id,
            rstp_enabled: port.rstp_enabled,
            sticky_mac_allow_list_limit: port.sticky_mac_allow_list_limit,
            stp_guard: port.stp_guard,
            tags: port.tags,
            port_type: port.port_type,
            vlan: port.vlan,
            voice_vlan: port.voice_vlan,
        }
    }
}

#[async_trait]
impl DataSource for DevicesSwitchPorts {
    fn type_name(&self) -> &'static str {
        "devices_switch_ports"
    }

    fn schema(&self) -> Schema {
        let port = Block::new()
            .with_description("Array of ResponseSwitchGetDeviceSwitchPorts")
            .with_attribute(
                "access_policy_type",
                Attribute::computed_string().with_description(
                    "The type of the access policy of the switch port. Only applicable to access ports. Can be one of 'Open', 'Custom access policy', 'MAC allow list' or 'Sticky MAC allow list'.",
                ),
            )
            .with_attribute(
                "allowed_vlans",
                Attribute::computed_string().with_description("The VLANs allowed on the switch port. Only applicable to trunk ports."),
            )
            .with_attribute("enabled", Attribute::computed_bool().with_description("The status of the switch port."))
            .with_attribute("isolation_enabled", Attribute::computed_bool().with_description("The isolation status of the switch port."))
            .with_attribute("link_negotiation", Attribute::computed_string().with_description("The link speed for the switch port."))
            .with_attribute("name", Attribute::computed_string().with_description("The name of the switch port."))
            .with_attribute("poe_enabled", Attribute::computed_bool().with_description("The PoE status of the switch port."))
            .with_attribute("port_id", Attribute::computed_string().with_description("The identifier of the switch port."))
            .with_attribute("rstp_enabled", Attribute::computed_bool().with_description("The rapid spanning tree protocol status."))
            .with_attribute(
                "sticky_mac_allow_list_limit",
                Attribute::computed_int64().with_description("The maximum number of MAC addresses for sticky MAC allow list. Only applicable when 'accessPolicyType' is 'Sticky MAC allow list'."),
            )
            .with_attribute("stp_guard", Attribute::computed_string().with_description("The state of the STP guard ('disabled', 'root guard', 'bpdu guard' or 'loop guard')."))
            .with_attribute("tags", computed_string_list("The list of tags of the switch port."))
            .with_attribute("type", Attribute::computed_string().with_description("The type of the switch port ('trunk' or 'access')."))
            .with_attribute("vlan", Attribute::computed_int64().with_description("The VLAN of the switch port. For a trunk port, this is the native VLAN. A null value will clear the value set for trunk ports."))
            .with_attribute("voice_vlan", Attribute::computed_int64().with_description("The voice VLAN of the switch port. Only applicable to access ports."));

        Schema::v0()
            .with_description("List the switch ports for a switch")
            .with_attribute("serial", Attribute::path_param("serial path parameter."))
            .with_block("items", NestedBlock::list(port))
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_DEVICE_SWITCH_PORTS, serial = %config.serial, "Calling Dashboard API");
        let ports = require_data(
            ops::GET_DEVICE_SWITCH_PORTS,
            client.get_device_switch_ports(&config.serial).await,
        )?;
        encode(&State {
            config,
            items: ports.into_iter().map(PortState::from).collect(),
        })
    }
}
