//! Discovery descriptor and state snapshot construction.
//!
//! Pure functions of an entity snapshot. Payloads are typed serde structs
//! (field order is declaration order), so an unchanged entity always
//! serializes to the same bytes — the idempotence the retained mirror
//! depends on. Optional attributes serialize as explicit `null`, never
//! omitted; value templates reading an absent field fall back to `"N/A"`.

use serde::Serialize;

use verdant_domain::error::VerdantError;
use verdant_domain::farm::Farm;
use verdant_domain::id::{FarmId, PlantId};
use verdant_domain::plant::Plant;

use super::identity::{EntityKind, ExternalId};
use super::topic::{self, Component};

/// Manufacturer reported in every device-grouping block.
const MANUFACTURER: &str = "Verdant";
/// Software version reported in every device-grouping block.
const SW_VERSION: &str = env!("CARGO_PKG_VERSION");

const FARM_STATUS_TEMPLATE: &str = "{{ 'online' if value_json.name else 'offline' }}";
const PLANT_SPECIES_TEMPLATE: &str = "{{ value_json.species if value_json.species else 'N/A' }}";
const PLANT_ACTIVE_TEMPLATE: &str = "{{ 'ON' if value_json.active else 'OFF' }}";
const PLANT_QR_TEMPLATE: &str = "{{ value_json.qr_code if value_json.qr_code else 'N/A' }}";

/// Failure while rendering a payload. Converted to [`VerdantError::Bus`] at
/// the port boundary so it rides the same best-effort path as publish
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("failed to encode mirror payload")]
    Encode(#[from] serde_json::Error),
}

impl From<MirrorError> for VerdantError {
    fn from(err: MirrorError) -> Self {
        Self::Bus(Box::new(err))
    }
}

/// One retained discovery message: teaches an observer how to present one
/// attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub topic: String,
    /// JSON text of a [`DiscoveryPayload`].
    pub payload: String,
}

/// One retained state message carrying an entity's current attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub topic: String,
    pub payload: String,
}

/// Device-grouping block: descriptors sharing `identifiers` group under one
/// external device representation.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceBlock {
    pub identifiers: Vec<String>,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub sw_version: &'static str,
}

/// Body of a discovery-config message.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryPayload {
    /// Human-readable label.
    pub name: String,
    /// `<external_id>_<message_type>`; globally unique across all entities
    /// and kinds (the per-kind external-id shapes are disjoint).
    pub unique_id: String,
    /// State topic the descriptor reads from; absent for descriptors that
    /// embed their value directly (server liveness).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,
    /// Value-extraction expression over the state payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,
    /// Constant value embedded directly in the descriptor, used only when
    /// `state_topic` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    pub icon: &'static str,
    pub device: DeviceBlock,
}

#[derive(Debug, Serialize)]
struct FarmState<'a> {
    id: &'a str,
    name: &'a str,
    location: Option<&'a str>,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct PlantState<'a> {
    id: &'a str,
    qr_code: Option<&'a str>,
    species: &'a str,
    variety: Option<&'a str>,
    germination_date: Option<String>,
    planting_date: Option<String>,
    active: bool,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct ServerState {
    status: &'static str,
}

fn descriptor(
    prefix: &str,
    component: Component,
    kind: EntityKind,
    external_id: &ExternalId,
    message_type: &str,
    payload: &DiscoveryPayload,
) -> Result<Descriptor, MirrorError> {
    Ok(Descriptor {
        topic: topic::discovery(prefix, component, kind, external_id, message_type),
        payload: serde_json::to_string(payload)?,
    })
}

fn device_block(kind: EntityKind, external_id: &ExternalId, name: String) -> DeviceBlock {
    DeviceBlock {
        identifiers: vec![format!("{kind}_{external_id}")],
        name,
        manufacturer: MANUFACTURER,
        model: match kind {
            EntityKind::Farm => "Farm",
            EntityKind::Plant => "Plant",
            EntityKind::Server => "Server",
        },
        sw_version: SW_VERSION,
    }
}

/// Build the discovery descriptor set for a farm: one `status` sensor
/// reading the farm's state topic.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn farm_discovery(prefix: &str, farm: &Farm) -> Result<Vec<Descriptor>, MirrorError> {
    let ext = ExternalId::farm(farm.id);
    let payload = DiscoveryPayload {
        name: format!("{} Status", farm.name),
        unique_id: format!("{ext}_status"),
        state_topic: Some(topic::state(EntityKind::Farm, &ext)),
        value_template: Some(FARM_STATUS_TEMPLATE.to_string()),
        state: None,
        icon: "mdi:greenhouse",
        device: device_block(EntityKind::Farm, &ext, farm.name.clone()),
    };
    Ok(vec![descriptor(
        prefix,
        Component::Sensor,
        EntityKind::Farm,
        &ext,
        "status",
        &payload,
    )?])
}

/// Build the state snapshot for a farm.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn farm_state(farm: &Farm) -> Result<StateSnapshot, MirrorError> {
    let ext = ExternalId::farm(farm.id);
    let state = FarmState {
        id: ext.as_str(),
        name: &farm.name,
        location: farm.location.as_deref(),
        created_at: farm.created_at.to_rfc3339(),
    };
    Ok(StateSnapshot {
        topic: topic::state(EntityKind::Farm, &ext),
        payload: serde_json::to_string(&state)?,
    })
}

/// Build the discovery descriptor set for a plant: `species` and `qr`
/// sensors plus an `active` binary sensor, all reading the plant's shared
/// state topic with distinct extraction templates.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn plant_discovery(prefix: &str, plant: &Plant) -> Result<Vec<Descriptor>, MirrorError> {
    let ext = ExternalId::plant(plant.id);
    let state_topic = topic::state(EntityKind::Plant, &ext);
    let display = plant
        .qr_code
        .clone()
        .unwrap_or_else(|| format!("Plant {ext}"));
    let device = device_block(EntityKind::Plant, &ext, display.clone());

    let sensors: [(&str, Component, &str, &str, &str); 3] = [
        ("species", Component::Sensor, "Species", PLANT_SPECIES_TEMPLATE, "mdi:sprout"),
        ("active", Component::BinarySensor, "Active", PLANT_ACTIVE_TEMPLATE, "mdi:leaf"),
        ("qr", Component::Sensor, "QR Code", PLANT_QR_TEMPLATE, "mdi:qrcode"),
    ];

    sensors
        .into_iter()
        .map(|(message_type, component, label, template, icon)| {
            let payload = DiscoveryPayload {
                name: format!("{display} {label}"),
                unique_id: format!("{ext}_{message_type}"),
                state_topic: Some(state_topic.clone()),
                value_template: Some(template.to_string()),
                state: None,
                icon,
                device: device.clone(),
            };
            descriptor(prefix, component, EntityKind::Plant, &ext, message_type, &payload)
        })
        .collect()
}

/// Build the state snapshot for a plant. Absent optionals render as
/// explicit `null`.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn plant_state(plant: &Plant) -> Result<StateSnapshot, MirrorError> {
    let ext = ExternalId::plant(plant.id);
    let state = PlantState {
        id: ext.as_str(),
        qr_code: plant.qr_code.as_deref(),
        species: &plant.species,
        variety: plant.variety.as_deref(),
        germination_date: plant.germination_date.map(|d| d.to_string()),
        planting_date: plant.planting_date.map(|d| d.to_string()),
        active: plant.active,
        created_at: plant.created_at.to_rfc3339(),
    };
    Ok(StateSnapshot {
        topic: topic::state(EntityKind::Plant, &ext),
        payload: serde_json::to_string(&state)?,
    })
}

/// Build the server-liveness descriptor: a single `status` sensor whose
/// constant `"on"` value is embedded directly rather than read from a
/// state topic.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn server_discovery(prefix: &str) -> Result<Vec<Descriptor>, MirrorError> {
    let ext = ExternalId::server();
    let payload = DiscoveryPayload {
        name: "Verdant Server Status".to_string(),
        unique_id: format!("{ext}_status"),
        state_topic: None,
        value_template: None,
        state: Some("on"),
        icon: "mdi:server",
        device: device_block(EntityKind::Server, &ext, "Verdant Server".to_string()),
    };
    Ok(vec![descriptor(
        prefix,
        Component::Sensor,
        EntityKind::Server,
        &ext,
        "status",
        &payload,
    )?])
}

/// Build the server-liveness state snapshot.
///
/// # Errors
///
/// Returns [`MirrorError::Encode`] if payload serialization fails.
pub fn server_state() -> Result<StateSnapshot, MirrorError> {
    Ok(StateSnapshot {
        topic: topic::state(EntityKind::Server, &ExternalId::server()),
        payload: serde_json::to_string(&ServerState { status: "on" })?,
    })
}

/// Every retained topic a farm occupies, derived from identity alone so a
/// deleted farm can still be retracted.
#[must_use]
pub fn farm_topics(prefix: &str, id: FarmId) -> Vec<String> {
    let ext = ExternalId::farm(id);
    vec![
        topic::discovery(prefix, Component::Sensor, EntityKind::Farm, &ext, "status"),
        topic::state(EntityKind::Farm, &ext),
    ]
}

/// Every retained topic a plant occupies, derived from identity alone so a
/// deleted plant can still be retracted.
#[must_use]
pub fn plant_topics(prefix: &str, id: PlantId) -> Vec<String> {
    let ext = ExternalId::plant(id);
    vec![
        topic::discovery(prefix, Component::Sensor, EntityKind::Plant, &ext, "species"),
        topic::discovery(prefix, Component::BinarySensor, EntityKind::Plant, &ext, "active"),
        topic::discovery(prefix, Component::Sensor, EntityKind::Plant, &ext, "qr"),
        topic::state(EntityKind::Plant, &ext),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use verdant_domain::time::Date;

    use super::*;

    fn farm() -> Farm {
        Farm::builder()
            .id(FarmId::from_i64(1))
            .name("Greenhouse A")
            .location("Bay 1")
            .build()
            .unwrap()
    }

    fn plant() -> Plant {
        Plant::builder()
            .id(PlantId::from_i64(5))
            .qr_code("QR123")
            .species("Basil")
            .build()
            .unwrap()
    }

    #[test]
    fn should_publish_farm_discovery_on_expected_topic() {
        let descriptors = farm_discovery("homeassistant", &farm()).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].topic,
            "homeassistant/sensor/farm_1_status/config"
        );
    }

    #[test]
    fn should_build_farm_state_with_expected_payload() {
        let snapshot = farm_state(&farm()).unwrap();
        assert_eq!(snapshot.topic, "farms/1/state");
        let value: serde_json::Value = serde_json::from_str(&snapshot.payload).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["name"], "Greenhouse A");
        assert_eq!(value["location"], "Bay 1");
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn should_render_missing_location_as_explicit_null() {
        let farm = Farm::builder()
            .id(FarmId::from_i64(2))
            .name("Rooftop")
            .build()
            .unwrap();
        let snapshot = farm_state(&farm).unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot.payload).unwrap();
        assert!(value["location"].is_null());
        assert!(
            value.as_object().unwrap().contains_key("location"),
            "absent optionals must serialize as null, not be omitted"
        );
    }

    #[test]
    fn should_emit_three_plant_descriptors_on_expected_topics() {
        let descriptors = plant_discovery("homeassistant", &plant()).unwrap();
        let topics: Vec<&str> = descriptors.iter().map(|d| d.topic.as_str()).collect();
        assert_eq!(
            topics,
            [
                "homeassistant/sensor/plant_id5_species/config",
                "homeassistant/binary_sensor/plant_id5_active/config",
                "homeassistant/sensor/plant_id5_qr/config",
            ]
        );
    }

    #[test]
    fn should_point_all_plant_descriptors_at_the_shared_state_topic() {
        for d in plant_discovery("homeassistant", &plant()).unwrap() {
            let value: serde_json::Value = serde_json::from_str(&d.payload).unwrap();
            assert_eq!(value["state_topic"], "plants/id5/state");
        }
    }

    #[test]
    fn should_compose_unique_id_from_external_id_and_message_type() {
        let descriptors = plant_discovery("homeassistant", &plant()).unwrap();
        let unique_ids: Vec<String> = descriptors
            .iter()
            .map(|d| {
                let value: serde_json::Value = serde_json::from_str(&d.payload).unwrap();
                value["unique_id"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(unique_ids, ["id5_species", "id5_active", "id5_qr"]);
    }

    #[test]
    fn should_not_collide_unique_ids_across_kinds() {
        let mut unique_ids = HashSet::new();
        let mut count = 0;
        for raw in 1..=20 {
            let farm = Farm::builder()
                .id(FarmId::from_i64(raw))
                .name("F")
                .build()
                .unwrap();
            let plant = Plant::builder()
                .id(PlantId::from_i64(raw))
                .species("S")
                .build()
                .unwrap();
            for d in farm_discovery("homeassistant", &farm)
                .unwrap()
                .into_iter()
                .chain(plant_discovery("homeassistant", &plant).unwrap())
                .chain(server_discovery("homeassistant").unwrap())
            {
                let value: serde_json::Value = serde_json::from_str(&d.payload).unwrap();
                unique_ids.insert(value["unique_id"].as_str().unwrap().to_string());
                count += 1;
            }
        }
        // The server descriptor repeats each round; dedupe it in the count.
        assert_eq!(unique_ids.len(), count - 19);
    }

    #[test]
    fn should_default_optional_template_reads_to_na() {
        let descriptors = plant_discovery("homeassistant", &plant()).unwrap();
        let qr: serde_json::Value = serde_json::from_str(&descriptors[2].payload).unwrap();
        assert!(qr["value_template"].as_str().unwrap().contains("'N/A'"));
    }

    #[test]
    fn should_render_null_variety_and_true_active_in_plant_state() {
        let snapshot = plant_state(&plant()).unwrap();
        assert_eq!(snapshot.topic, "plants/id5/state");
        let value: serde_json::Value = serde_json::from_str(&snapshot.payload).unwrap();
        assert_eq!(value["id"], "id5");
        assert_eq!(value["qr_code"], "QR123");
        assert_eq!(value["species"], "Basil");
        assert!(value["variety"].is_null());
        assert!(value["germination_date"].is_null());
        assert_eq!(value["active"], true);
    }

    #[test]
    fn should_render_dates_as_iso_strings() {
        let plant = Plant::builder()
            .id(PlantId::from_i64(6))
            .species("Tomato")
            .germination_date(Date::from_ymd_opt(2024, 3, 1).unwrap())
            .planting_date(Date::from_ymd_opt(2024, 3, 15).unwrap())
            .build()
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&plant_state(&plant).unwrap().payload).unwrap();
        assert_eq!(value["germination_date"], "2024-03-01");
        assert_eq!(value["planting_date"], "2024-03-15");
    }

    #[test]
    fn should_group_descriptors_under_one_device() {
        let descriptors = plant_discovery("homeassistant", &plant()).unwrap();
        let device_blocks: HashSet<String> = descriptors
            .iter()
            .map(|d| {
                let value: serde_json::Value = serde_json::from_str(&d.payload).unwrap();
                value["device"].to_string()
            })
            .collect();
        assert_eq!(device_blocks.len(), 1);
        let device: serde_json::Value =
            serde_json::from_str(device_blocks.iter().next().unwrap()).unwrap();
        assert_eq!(device["identifiers"][0], "plant_id5");
        assert_eq!(device["manufacturer"], "Verdant");
        assert_eq!(device["model"], "Plant");
    }

    #[test]
    fn should_embed_constant_state_in_server_descriptor() {
        let descriptors = server_discovery("homeassistant").unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].topic,
            "homeassistant/sensor/server_verdant_status/config"
        );
        let value: serde_json::Value = serde_json::from_str(&descriptors[0].payload).unwrap();
        assert_eq!(value["state"], "on");
        assert_eq!(value["unique_id"], "verdant_status");
        assert!(value.get("state_topic").is_none());
    }

    #[test]
    fn should_reproduce_byte_identical_payloads_for_unchanged_entities() {
        let plant = plant();
        assert_eq!(
            plant_state(&plant).unwrap().payload,
            plant_state(&plant).unwrap().payload
        );
        assert_eq!(
            plant_discovery("homeassistant", &plant).unwrap(),
            plant_discovery("homeassistant", &plant).unwrap()
        );
    }

    #[test]
    fn should_list_retraction_topics_matching_published_ones() {
        let plant = plant();
        let mut published: Vec<String> = plant_discovery("homeassistant", &plant)
            .unwrap()
            .into_iter()
            .map(|d| d.topic)
            .collect();
        published.push(plant_state(&plant).unwrap().topic);
        assert_eq!(plant_topics("homeassistant", plant.id), published);

        let farm = farm();
        let mut published: Vec<String> = farm_discovery("homeassistant", &farm)
            .unwrap()
            .into_iter()
            .map(|d| d.topic)
            .collect();
        published.push(farm_state(&farm).unwrap().topic);
        assert_eq!(farm_topics("homeassistant", farm.id), published);
    }
}
