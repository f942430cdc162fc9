//! `meraki_devices_reboot`: reboot a device.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{item, path_param};
use crate::catalog::{decode, encode, require_data, ActionResource};
use crate::client::models::RebootResult;
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /devices/{serial}/reboot`.
pub struct DevicesReboot;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    serial: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: RebootState,
}

#[derive(Debug, Serialize)]
struct RebootState {
    success: Option<bool>,
}

impl From<RebootResult> for RebootState {
    fn from(result: RebootResult) -> Self {
        Self {
            success: result.success,
        }
    }
}

#[async_trait]
impl ActionResource for DevicesReboot {
    fn type_name(&self) -> &'static str {
        "devices_reboot"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Reboot a device")
            .with_attribute("serial", path_param("serial path parameter."))
            .with_block(
                "item",
                item(Block::new().with_attribute(
                    "success",
                    Attribute::computed_bool().with_description("Whether or not the device was successfully rebooted"),
                )),
            )
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        debug!(operation = ops::REBOOT_DEVICE, serial = %plan.serial, "Calling Dashboard API");
        let result = require_data(ops::REBOOT_DEVICE, client.reboot_device(&plan.serial).await)?;
        encode(&State {
            plan,
            item: result.into(),
        })
    }
}
