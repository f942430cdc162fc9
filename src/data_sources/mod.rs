//! Read-only Dashboard queries.
//!
//! Every data source echoes its configuration into state and adds either a
//! computed `item` (one object) or `items` (a list).

use serde::{Deserialize, Serialize};

use crate::catalog::DataSource;
use crate::client::models::{NameValue, PageQuery};
use crate::convert::non_empty;
use crate::schema::{Attribute, AttributeType, Block, NestedBlock, Schema};

mod administered_identities_me;
mod administered_identities_me_api_keys;
mod devices;
mod devices_appliance_performance;
mod devices_camera_sense;
mod devices_switch_ports;
mod devices_wireless_status;
mod networks;
mod networks_sm_devices;
mod networks_wireless_ssids;
mod organizations;
mod organizations_appliance_security_intrusion;
mod organizations_inventory_devices;

pub use administered_identities_me::AdministeredIdentitiesMe;
pub use administered_identities_me_api_keys::AdministeredIdentitiesMeApiKeys;
pub use devices::Devices;
pub use devices_appliance_performance::DevicesAppliancePerformance;
pub use devices_camera_sense::DevicesCameraSense;
pub use devices_switch_ports::DevicesSwitchPorts;
pub use devices_wireless_status::DevicesWirelessStatus;
pub use networks::Networks;
pub use networks_sm_devices::NetworksSmDevices;
pub use networks_wireless_ssids::NetworksWirelessSsids;
pub use organizations::Organizations;
pub use organizations_appliance_security_intrusion::OrganizationsApplianceSecurityIntrusion;
pub use organizations_inventory_devices::OrganizationsInventoryDevices;

/// Every data source the provider ships.
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(AdministeredIdentitiesMe),
        Box::new(AdministeredIdentitiesMeApiKeys),
        Box::new(Devices),
        Box::new(DevicesAppliancePerformance),
        Box::new(DevicesCameraSense),
        Box::new(DevicesSwitchPorts),
        Box::new(DevicesWirelessStatus),
        Box::new(Networks),
        Box::new(NetworksSmDevices),
        Box::new(NetworksWirelessSsids),
        Box::new(Organizations),
        Box::new(OrganizationsApplianceSecurityIntrusion),
        Box::new(OrganizationsInventoryDevices),
    ]
}

/// Cursor pagination arguments shared by list queries.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct Paging {
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub starting_after: Option<String>,
    #[serde(default)]
    pub ending_before: Option<String>,
}

impl Paging {
    pub fn to_query(&self) -> PageQuery {
        PageQuery {
            per_page: self.per_page,
            starting_after: non_empty(self.starting_after.clone()),
            ending_before: non_empty(self.ending_before.clone()),
        }
    }

    /// Add the three paging attributes to `schema`.
    pub fn attributes(schema: Schema, max_per_page: u32) -> Schema {
        schema
            .with_attribute(
                "per_page",
                Attribute::optional_int64().with_description(format!(
                    "perPage query parameter. The number of entries per page returned. Acceptable range is 3 - {}.",
                    max_per_page
                )),
            )
            .with_attribute(
                "starting_after",
                Attribute::optional_string().with_description(
                    "startingAfter query parameter. A token used by the server to indicate the start of the page. Often this is a timestamp or an ID but it is not limited to those. This parameter should not be defined by client applications. The link for the first, last, prev, or next page in the HTTP Link header should define it.",
                ),
            )
            .with_attribute(
                "ending_before",
                Attribute::optional_string().with_description(
                    "endingBefore query parameter. A token used by the server to indicate the end of the page. Often this is a timestamp or an ID but it is not limited to those. This parameter should not be defined by client applications. The link for the first, last, prev, or next page in the HTTP Link header should define it.",
                ),
            )
    }
}

/// An optional string-list filter; unset or empty sends nothing.
pub(crate) fn filter_list(values: &Option<Vec<String>>) -> Vec<String> {
    values.clone().unwrap_or_default()
}

/// `{ name, value }` as it appears in state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct NameValueState {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl From<NameValue> for NameValueState {
    fn from(pair: NameValue) -> Self {
        Self {
            name: pair.name,
            value: pair.value,
        }
    }
}

impl NameValueState {
    pub fn block(description: &str) -> NestedBlock {
        NestedBlock::list(
            Block::new()
                .with_description(description)
                .with_attribute("name", Attribute::computed_string().with_description("Name of the detail"))
                .with_attribute("value", Attribute::computed_string().with_description("Value of the detail")),
        )
    }
}

pub(crate) fn computed_string_list(description: &str) -> Attribute {
    Attribute::computed(AttributeType::string_list()).with_description(description)
}

pub(crate) fn computed_string_set(description: &str) -> Attribute {
    Attribute::computed(AttributeType::string_set()).with_description(description)
}

pub(crate) fn optional_string_list(description: &str) -> Attribute {
    Attribute::optional(AttributeType::string_list()).with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_data_source_has_a_computed_result() {
        let mut names = HashSet::new();
        for data_source in all() {
            assert!(names.insert(data_source.type_name()), "duplicate {}", data_source.type_name());
            let schema = data_source.schema();
            let results: Vec<_> = ["item", "items"]
                .into_iter()
                .filter(|k| schema.block.blocks.contains_key(*k))
                .collect();
            assert!(!results.is_empty(), "{} has no result block", data_source.type_name());
            for key in results {
                assert!(schema.block.blocks[key].block.is_computed());
            }
            assert!(schema.block.description.is_some());
        }
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_paging_treats_empty_cursor_as_unset() {
        let paging = Paging {
            per_page: Some(10),
            starting_after: Some(String::new()),
            ending_before: Some("abc".to_string()),
        };
        let query = paging.to_query();
        assert_eq!(query.per_page, Some(10));
        assert_eq!(query.starting_after, None);
        assert_eq!(query.ending_before.as_deref(), Some("abc"));
    }
}
