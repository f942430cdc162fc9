//! `meraki_devices_camera_sense`: MV Sense settings of a camera.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::computed_string_list;
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::CameraSense;
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /devices/{serial}/camera/sense`.
pub struct DevicesCameraSense;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    serial: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: SenseState,
}

#[derive(Debug, Serialize)]
struct SenseState {
    audio_detection: Option<AudioDetectionState>,
    mqtt_broker_id: Option<String>,
    mqtt_topics: Vec<String>,
    sense_enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
struct AudioDetectionState {
    enabled: Option<bool>,
}

impl From<CameraSense> for SenseState {
    fn from(sense: CameraSense) -> Self {
        Self {
            audio_detection: sense
                .audio_detection
                .map(|flag| AudioDetectionState { enabled: flag.enabled }),
            mqtt_broker_id: sense.mqtt_broker_id,
            mqtt_topics: sense.mqtt_topics.unwrap_or_default(),
            sense_enabled: sense.sense_enabled,
        }
    }
}

#[async_trait]
impl DataSource for DevicesCameraSense {
    fn type_name(&self) -> &'static str {
        "devices_camera_sense"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Returns sense settings for a given camera")
            .with_attribute("serial", Attribute::path_param("serial path parameter."))
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new()
                        .with_block(
                            "audio_detection",
                            NestedBlock::single(
                                Block::new()
                                    .with_description("The details of the audio detection config.")
                                    .with_attribute("enabled", Attribute::computed_bool().with_description("Whether or not audio detection is enabled.")),
                            ),
                        )
                        .with_attribute("mqtt_broker_id", Attribute::computed_string().with_description("The ID of the MQTT broker used for sending MQTT data."))
                        .with_attribute("mqtt_topics", computed_string_list("The topics which will be published to the MQTT broker."))
                        .with_attribute("sense_enabled", Attribute::computed_bool().with_description("Whether sense is enabled.")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_DEVICE_CAMERA_SENSE, serial = %config.serial, "Calling Dashboard API");
        let sense = require_data(
            ops::GET_DEVICE_CAMERA_SENSE,
            client.get_device_camera_sense(&config.serial).await,
        )?;
        encode(&State {
            config,
            item: sense.into(),
        })
    }
}
