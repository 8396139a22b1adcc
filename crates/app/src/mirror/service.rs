//! Mirror orchestration — full resync and mutation hooks.

use verdant_domain::error::VerdantError;
use verdant_domain::farm::Farm;
use verdant_domain::id::{FarmId, PlantId};
use verdant_domain::plant::Plant;

use crate::ports::bus::RetainedPublisher;
use crate::ports::mirror::{Mirror, ResyncSummary};
use crate::ports::storage::{FarmRepository, PlantRepository};

use super::descriptor;

/// Keeps the retained-topic mirror consistent with the store.
///
/// Holds the storage ports (to enumerate the live set during a resync) and
/// the bus publisher port. The service itself is stateless between calls —
/// it caches nothing about prior publications, relying instead on topics
/// and payloads being deterministic functions of entity snapshots.
pub struct MirrorService<FR, PR, BP> {
    farms: FR,
    plants: PR,
    bus: BP,
    discovery_prefix: String,
}

impl<FR, PR, BP> MirrorService<FR, PR, BP>
where
    FR: FarmRepository + Send + Sync,
    PR: PlantRepository + Send + Sync,
    BP: RetainedPublisher,
{
    /// Create a mirror publishing discovery messages under `discovery_prefix`.
    pub fn new(farms: FR, plants: PR, bus: BP, discovery_prefix: impl Into<String>) -> Self {
        Self {
            farms,
            plants,
            bus,
            discovery_prefix: discovery_prefix.into(),
        }
    }

    /// Publish discovery then state for one farm. Discovery goes first: an
    /// observer must learn the entity exists before its state payload means
    /// anything.
    async fn publish_farm(&self, farm: &Farm) -> Result<(), VerdantError> {
        for d in descriptor::farm_discovery(&self.discovery_prefix, farm)? {
            self.bus.publish_retained(&d.topic, d.payload.into_bytes()).await?;
        }
        let snapshot = descriptor::farm_state(farm)?;
        self.bus
            .publish_retained(&snapshot.topic, snapshot.payload.into_bytes())
            .await
    }

    /// Publish discovery then state for one plant.
    async fn publish_plant(&self, plant: &Plant) -> Result<(), VerdantError> {
        for d in descriptor::plant_discovery(&self.discovery_prefix, plant)? {
            self.bus.publish_retained(&d.topic, d.payload.into_bytes()).await?;
        }
        let snapshot = descriptor::plant_state(plant)?;
        self.bus
            .publish_retained(&snapshot.topic, snapshot.payload.into_bytes())
            .await
    }

    async fn publish_server(&self) -> Result<(), VerdantError> {
        for d in descriptor::server_discovery(&self.discovery_prefix)? {
            self.bus.publish_retained(&d.topic, d.payload.into_bytes()).await?;
        }
        let snapshot = descriptor::server_state()?;
        self.bus
            .publish_retained(&snapshot.topic, snapshot.payload.into_bytes())
            .await
    }

    async fn clear_topics(&self, topics: Vec<String>) -> Result<(), VerdantError> {
        for topic in topics {
            self.bus.clear_retained(&topic).await?;
        }
        Ok(())
    }
}

impl<FR, PR, BP> Mirror for MirrorService<FR, PR, BP>
where
    FR: FarmRepository + Send + Sync,
    PR: PlantRepository + Send + Sync,
    BP: RetainedPublisher,
{
    async fn farm_created(&self, farm: &Farm) {
        if let Err(err) = self.publish_farm(farm).await {
            tracing::warn!(error = %err, farm_id = %farm.id, "failed to mirror farm; bus stale until next resync");
        }
    }

    async fn farm_updated(&self, farm: &Farm) {
        self.farm_created(farm).await;
    }

    async fn farm_deleted(&self, id: FarmId) {
        let topics = descriptor::farm_topics(&self.discovery_prefix, id);
        if let Err(err) = self.clear_topics(topics).await {
            tracing::warn!(error = %err, farm_id = %id, "failed to retract farm topics");
        }
    }

    async fn plant_created(&self, plant: &Plant) {
        if let Err(err) = self.publish_plant(plant).await {
            tracing::warn!(error = %err, plant_id = %plant.id, "failed to mirror plant; bus stale until next resync");
        }
    }

    async fn plant_updated(&self, plant: &Plant) {
        self.plant_created(plant).await;
    }

    async fn plant_deleted(&self, id: PlantId) {
        let topics = descriptor::plant_topics(&self.discovery_prefix, id);
        if let Err(err) = self.clear_topics(topics).await {
            tracing::warn!(error = %err, plant_id = %id, "failed to retract plant topics");
        }
    }

    #[tracing::instrument(skip(self))]
    async fn resync_all(&self) -> Result<ResyncSummary, VerdantError> {
        let farms = self.farms.get_all().await?;
        let plants = self.plants.get_all().await?;

        let mut failures = 0;
        for farm in &farms {
            if let Err(err) = self.publish_farm(farm).await {
                tracing::warn!(error = %err, farm_id = %farm.id, "resync publish failed");
                failures += 1;
            }
        }
        for plant in &plants {
            if let Err(err) = self.publish_plant(plant).await {
                tracing::warn!(error = %err, plant_id = %plant.id, "resync publish failed");
                failures += 1;
            }
        }
        if let Err(err) = self.publish_server().await {
            tracing::warn!(error = %err, "resync publish failed for server liveness");
            failures += 1;
        }

        let summary = ResyncSummary {
            farms: farms.len(),
            plants: plants.len(),
            failures,
        };
        tracing::info!(
            farms = summary.farms,
            plants = summary.plants,
            failures = summary.failures,
            "mirror resync complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use verdant_domain::id::{FarmId, PlantId};

    use super::*;

    /// Models the broker's retained-message store: publish overwrites,
    /// clear removes. Also keeps an append-only log for ordering checks.
    #[derive(Default)]
    struct InMemoryBus {
        retained: Mutex<BTreeMap<String, Vec<u8>>>,
        log: Mutex<Vec<String>>,
    }

    impl RetainedPublisher for InMemoryBus {
        async fn publish_retained(&self, topic: &str, payload: Vec<u8>) -> Result<(), VerdantError> {
            self.retained
                .lock()
                .unwrap()
                .insert(topic.to_string(), payload);
            self.log.lock().unwrap().push(topic.to_string());
            Ok(())
        }

        async fn clear_retained(&self, topic: &str) -> Result<(), VerdantError> {
            self.retained.lock().unwrap().remove(topic);
            Ok(())
        }
    }

    /// Bus whose publishes always fail, for best-effort path tests.
    struct BrokenBus;

    impl RetainedPublisher for BrokenBus {
        async fn publish_retained(
            &self,
            _topic: &str,
            _payload: Vec<u8>,
        ) -> Result<(), VerdantError> {
            Err(VerdantError::Bus(Box::new(std::io::Error::other(
                "broker unreachable",
            ))))
        }

        async fn clear_retained(&self, _topic: &str) -> Result<(), VerdantError> {
            Err(VerdantError::Bus(Box::new(std::io::Error::other(
                "broker unreachable",
            ))))
        }
    }

    #[derive(Default)]
    struct StubFarmRepo {
        farms: Vec<Farm>,
    }

    impl FarmRepository for StubFarmRepo {
        async fn create(&self, farm: Farm) -> Result<Farm, VerdantError> {
            Ok(farm)
        }

        async fn get_by_id(&self, id: FarmId) -> Result<Option<Farm>, VerdantError> {
            Ok(self.farms.iter().find(|f| f.id == id).cloned())
        }

        async fn get_all(&self) -> Result<Vec<Farm>, VerdantError> {
            Ok(self.farms.clone())
        }

        async fn update(&self, farm: Farm) -> Result<Farm, VerdantError> {
            Ok(farm)
        }

        async fn delete(&self, _id: FarmId) -> Result<(), VerdantError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubPlantRepo {
        plants: Vec<Plant>,
    }

    impl PlantRepository for StubPlantRepo {
        async fn create(&self, plant: Plant) -> Result<Plant, VerdantError> {
            Ok(plant)
        }

        async fn get_by_id(&self, id: PlantId) -> Result<Option<Plant>, VerdantError> {
            Ok(self.plants.iter().find(|p| p.id == id).cloned())
        }

        async fn get_all(&self) -> Result<Vec<Plant>, VerdantError> {
            Ok(self.plants.clone())
        }

        async fn find_by_qr_code(&self, qr_code: &str) -> Result<Option<Plant>, VerdantError> {
            Ok(self
                .plants
                .iter()
                .find(|p| p.qr_code.as_deref() == Some(qr_code))
                .cloned())
        }

        async fn update(&self, plant: Plant) -> Result<Plant, VerdantError> {
            Ok(plant)
        }

        async fn delete(&self, _id: PlantId) -> Result<(), VerdantError> {
            Ok(())
        }
    }

    fn farm(id: i64, name: &str) -> Farm {
        Farm::builder()
            .id(FarmId::from_i64(id))
            .name(name)
            .build()
            .unwrap()
    }

    fn plant(id: i64, species: &str) -> Plant {
        Plant::builder()
            .id(PlantId::from_i64(id))
            .species(species)
            .build()
            .unwrap()
    }

    fn service(
        farms: Vec<Farm>,
        plants: Vec<Plant>,
    ) -> MirrorService<StubFarmRepo, StubPlantRepo, InMemoryBus> {
        MirrorService::new(
            StubFarmRepo { farms },
            StubPlantRepo { plants },
            InMemoryBus::default(),
            "homeassistant",
        )
    }

    #[tokio::test]
    async fn should_publish_discovery_and_state_when_farm_created() {
        let mirror = service(vec![], vec![]);
        mirror.farm_created(&farm(1, "Greenhouse A")).await;

        let retained = mirror.bus.retained.lock().unwrap();
        assert!(retained.contains_key("homeassistant/sensor/farm_1_status/config"));
        assert!(retained.contains_key("farms/1/state"));
    }

    #[tokio::test]
    async fn should_publish_discovery_before_state_for_each_entity() {
        let mirror = service(vec![], vec![]);
        mirror.plant_created(&plant(5, "Basil")).await;

        let log = mirror.bus.log.lock().unwrap();
        let state_pos = log.iter().position(|t| t == "plants/id5/state").unwrap();
        for topic in log.iter().filter(|t| t.ends_with("/config")) {
            let config_pos = log.iter().position(|t| t == topic).unwrap();
            assert!(config_pos < state_pos, "{topic} published after state");
        }
    }

    #[tokio::test]
    async fn should_count_all_entities_when_resyncing() {
        let mirror = service(
            vec![farm(1, "Greenhouse A"), farm(2, "Rooftop")],
            vec![plant(1, "Basil"), plant(2, "Mint"), plant(3, "Thyme")],
        );
        let summary = mirror.resync_all().await.unwrap();
        assert_eq!(
            summary,
            ResyncSummary {
                farms: 2,
                plants: 3,
                failures: 0
            }
        );

        // 2 farm configs + 9 plant configs + 1 server config,
        // 2 + 3 state topics + 1 liveness state.
        let retained = mirror.bus.retained.lock().unwrap();
        let configs = retained.keys().filter(|k| k.ends_with("/config")).count();
        let states = retained.keys().filter(|k| k.ends_with("/state")).count();
        assert_eq!(configs, 12);
        assert_eq!(states, 6);
    }

    #[tokio::test]
    async fn should_produce_identical_retained_set_when_resyncing_twice() {
        let mirror = service(
            vec![farm(1, "Greenhouse A")],
            vec![plant(5, "Basil"), plant(6, "Mint")],
        );
        mirror.resync_all().await.unwrap();
        let first = mirror.bus.retained.lock().unwrap().clone();

        mirror.resync_all().await.unwrap();
        let second = mirror.bus.retained.lock().unwrap().clone();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_retract_every_topic_when_farm_deleted() {
        let mirror = service(vec![], vec![]);
        let farm = farm(1, "Greenhouse A");
        mirror.farm_created(&farm).await;
        mirror.farm_deleted(farm.id).await;

        assert!(mirror.bus.retained.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_retract_every_topic_when_plant_deleted() {
        let mirror = service(vec![], vec![]);
        let plant = plant(5, "Basil");
        mirror.plant_created(&plant).await;
        mirror.plant_deleted(plant.id).await;

        assert!(mirror.bus.retained.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_not_touch_other_entities_when_one_is_deleted() {
        let mirror = service(vec![], vec![]);
        mirror.farm_created(&farm(1, "Greenhouse A")).await;
        mirror.plant_created(&plant(5, "Basil")).await;
        mirror.plant_deleted(PlantId::from_i64(5)).await;

        let retained = mirror.bus.retained.lock().unwrap();
        assert!(retained.contains_key("farms/1/state"));
        assert!(!retained.contains_key("plants/id5/state"));
    }

    #[tokio::test]
    async fn should_count_failures_but_complete_resync_when_bus_is_down() {
        let mirror = MirrorService::new(
            StubFarmRepo {
                farms: vec![farm(1, "Greenhouse A")],
            },
            StubPlantRepo {
                plants: vec![plant(5, "Basil")],
            },
            BrokenBus,
            "homeassistant",
        );
        let summary = mirror.resync_all().await.unwrap();
        assert_eq!(summary.farms, 1);
        assert_eq!(summary.plants, 1);
        assert_eq!(summary.failures, 3); // farm + plant + server liveness
    }

    #[tokio::test]
    async fn should_not_panic_when_hooks_hit_a_broken_bus() {
        let mirror =
            MirrorService::new(StubFarmRepo::default(), StubPlantRepo::default(), BrokenBus, "homeassistant");
        mirror.farm_created(&farm(1, "Greenhouse A")).await;
        mirror.plant_deleted(PlantId::from_i64(5)).await;
    }
}
