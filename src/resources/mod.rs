//! One-shot Dashboard actions modeled as create-only resources.
//!
//! State is the plan echoed back (path parameters and `parameters`) plus the
//! mapped response in `item` / `items`. Endpoints answering `204` persist
//! only their inputs.

use serde::{Deserialize, Serialize};

use crate::catalog::ActionResource;
use crate::client::models::SmDevicesSelection;
use crate::convert::non_empty_list;
use crate::schema::{Attribute, AttributeType, Block, NestedBlock};

mod administered_identities_me_api_keys_generate;
mod administered_identities_me_api_keys_revoke;
mod devices_blink_leds;
mod devices_reboot;
mod networks_sm_devices_checkin;
mod networks_sm_devices_lock;
mod networks_sm_devices_modify_tags;
mod networks_sm_devices_move;
mod networks_sm_devices_wipe;
mod networks_switch_qos_rules_order_delete;
mod organizations_inventory_release;
mod organizations_wireless_radio_auto_rf_channels_recalculate;

pub use administered_identities_me_api_keys_generate::AdministeredIdentitiesMeApiKeysGenerate;
pub use administered_identities_me_api_keys_revoke::AdministeredIdentitiesMeApiKeysRevoke;
pub use devices_blink_leds::DevicesBlinkLeds;
pub use devices_reboot::DevicesReboot;
pub use networks_sm_devices_checkin::NetworksSmDevicesCheckin;
pub use networks_sm_devices_lock::NetworksSmDevicesLock;
pub use networks_sm_devices_modify_tags::NetworksSmDevicesModifyTags;
pub use networks_sm_devices_move::NetworksSmDevicesMove;
pub use networks_sm_devices_wipe::NetworksSmDevicesWipe;
pub use networks_switch_qos_rules_order_delete::NetworksSwitchQosRulesOrderDelete;
pub use organizations_inventory_release::OrganizationsInventoryRelease;
pub use organizations_wireless_radio_auto_rf_channels_recalculate::OrganizationsWirelessRadioAutoRfChannelsRecalculate;

/// Every action resource the provider ships.
pub fn all() -> Vec<Box<dyn ActionResource>> {
    vec![
        Box::new(AdministeredIdentitiesMeApiKeysGenerate),
        Box::new(AdministeredIdentitiesMeApiKeysRevoke),
        Box::new(DevicesBlinkLeds),
        Box::new(DevicesReboot),
        Box::new(NetworksSmDevicesCheckin),
        Box::new(NetworksSmDevicesLock),
        Box::new(NetworksSmDevicesModifyTags),
        Box::new(NetworksSmDevicesMove),
        Box::new(NetworksSmDevicesWipe),
        Box::new(NetworksSwitchQosRulesOrderDelete),
        Box::new(OrganizationsInventoryRelease),
        Box::new(OrganizationsWirelessRadioAutoRfChannelsRecalculate),
    ]
}

/// A path parameter; changing it replaces the action.
pub(crate) fn path_param(description: &str) -> Attribute {
    Attribute::path_param(description).with_requires_replace()
}

/// The `parameters` block holding the request body.
pub(crate) fn parameters(block: Block) -> NestedBlock {
    NestedBlock::single(block).with_requires_replace()
}

/// The computed `item` block.
pub(crate) fn item(block: Block) -> NestedBlock {
    NestedBlock::single(block)
}

pub(crate) fn optional_string_list(description: &str) -> Attribute {
    Attribute::optional(AttributeType::string_list()).with_description(description)
}

pub(crate) fn computed_string_list(description: &str) -> Attribute {
    Attribute::computed(AttributeType::string_list()).with_description(description)
}

/// Device selection of the Systems Manager bulk actions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct Selection {
    #[serde(default)]
    pub ids: Option<Vec<String>>,
    #[serde(default)]
    pub scope: Option<Vec<String>>,
    #[serde(default)]
    pub serials: Option<Vec<String>>,
    #[serde(default)]
    pub wifi_macs: Option<Vec<String>>,
}

impl Selection {
    pub fn to_request(&self) -> SmDevicesSelection {
        SmDevicesSelection {
            wifi_macs: non_empty_list(self.wifi_macs.clone()),
            ids: non_empty_list(self.ids.clone()),
            serials: non_empty_list(self.serials.clone()),
            scope: non_empty_list(self.scope.clone()),
        }
    }

    /// Add the selection attributes to a `parameters` block.
    pub fn attributes(block: Block, action: &str) -> Block {
        block
            .with_attribute(
                "ids",
                optional_string_list(&format!("The ids of the devices to be {}.", action)),
            )
            .with_attribute(
                "scope",
                optional_string_list(&format!(
                    "The scope (one of all, none, withAny, withAll, withoutAny, or withoutAll) and a set of tags of the devices to be {}.",
                    action
                )),
            )
            .with_attribute(
                "serials",
                optional_string_list(&format!("The serials of the devices to be {}.", action)),
            )
            .with_attribute(
                "wifi_macs",
                optional_string_list(&format!("The wifiMacs of the devices to be {}.", action)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReadBehavior;
    use std::collections::HashSet;

    #[test]
    fn test_every_resource_replaces_on_input_change() {
        let mut names = HashSet::new();
        for resource in all() {
            let name = resource.type_name();
            assert!(names.insert(name), "duplicate {}", name);

            let schema = resource.schema();
            for (key, attr) in &schema.block.attributes {
                if attr.flags.is_configurable() {
                    assert!(attr.requires_replace, "{}.{} must force replacement", name, key);
                }
            }
            for (key, block) in &schema.block.blocks {
                if !block.block.is_computed() {
                    assert_eq!(key, "parameters", "{} has unexpected block {}", name, key);
                    assert!(block.requires_replace);
                }
            }
        }
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_warn_on_read_choices() {
        let warned: Vec<_> = all()
            .into_iter()
            .filter(|r| r.read_behavior() == ReadBehavior::Warn)
            .map(|r| r.type_name())
            .collect();
        assert_eq!(
            warned,
            vec![
                "networks_sm_devices_checkin",
                "networks_sm_devices_lock",
                "networks_sm_devices_modify_tags",
                "networks_sm_devices_move",
                "networks_sm_devices_wipe",
                "organizations_inventory_release",
            ]
        );
    }

    #[test]
    fn test_selection_drops_empty_lists() {
        let selection = Selection {
            serials: Some(vec!["Q2YY".to_string()]),
            ids: Some(vec![]),
            ..Default::default()
        };
        let request = selection.to_request();
        assert_eq!(request.serials, Some(vec!["Q2YY".to_string()]));
        assert_eq!(request.ids, None);
        assert_eq!(request.scope, None);
    }
}
