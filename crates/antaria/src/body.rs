//! Stellar bodies: planets, asteroids, stations.

use antaria_session::{EntityId, Fragment, ModuleCaller, ModuleHandle, ModuleMethod};
use serde_json::Value;

use crate::fields;
use crate::{AntariaError, Building, Resources};

const MODULE: &str = "body";

/// Remote operations of the `body` module.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyMethod {
    GetStatus,
    GetBuildings,
    Rename(String),
}

impl ModuleMethod for BodyMethod {
    fn name(&self) -> &str {
        match self {
            Self::GetStatus => "get_status",
            Self::GetBuildings => "get_buildings",
            Self::Rename(_) => "rename",
        }
    }

    fn params(&self) -> Vec<Value> {
        match self {
            Self::Rename(name) => vec![Value::String(name.clone())],
            _ => Vec::new(),
        }
    }
}

/// A body owned by the empire. Two bodies are equal when their ids are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    handle: ModuleHandle,
}

impl Body {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            handle: ModuleHandle::new(MODULE).with_id(id),
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.handle.id()
    }

    pub fn handle(&self) -> &ModuleHandle {
        &self.handle
    }

    /// The body's status: from the cache when it holds this body, else
    /// fetched with `get_status`.
    pub async fn status<C: ModuleCaller>(&self, caller: &mut C) -> Result<Fragment, AntariaError> {
        Ok(self.handle.status(caller, &BodyMethod::GetStatus).await?)
    }

    /// The status, refreshed first if the cached one lacks `field`.
    async fn status_with<C: ModuleCaller>(
        &self,
        caller: &mut C,
        field: &str,
    ) -> Result<Fragment, AntariaError> {
        Ok(self
            .handle
            .status_with(caller, field, &BodyMethod::GetStatus)
            .await?)
    }

    /// Fetches `get_status` regardless of the cache.
    pub async fn refresh<C: ModuleCaller>(&self, caller: &mut C) -> Result<Fragment, AntariaError> {
        Ok(self.handle.refresh(caller, &BodyMethod::GetStatus).await?)
    }

    pub async fn name<C: ModuleCaller>(&self, caller: &mut C) -> Result<String, AntariaError> {
        fields::string(&self.status_with(caller, "name").await?, MODULE, "name")
    }

    pub async fn star_id<C: ModuleCaller>(&self, caller: &mut C) -> Result<EntityId, AntariaError> {
        fields::entity_id(&self.status_with(caller, "star_id").await?, MODULE, "star_id")
    }

    pub async fn orbit<C: ModuleCaller>(&self, caller: &mut C) -> Result<i64, AntariaError> {
        fields::int(&self.status_with(caller, "orbit").await?, MODULE, "orbit")
    }

    pub async fn size<C: ModuleCaller>(&self, caller: &mut C) -> Result<i64, AntariaError> {
        fields::int(&self.status_with(caller, "size").await?, MODULE, "size")
    }

    /// Hourly production. Totals come from the `*_hour` fields, per-ore
    /// rates from the `ore` object.
    pub async fn resource_rates<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<Resources, AntariaError> {
        let status = self.status_with(caller, "ore_hour").await?;
        let mut rates = Resources::new();
        rates.ore = fields::int_or_zero(&status, "ore_hour");
        rates.food = fields::int_or_zero(&status, "food_hour");
        rates.water = fields::int_or_zero(&status, "water_hour");
        rates.waste = fields::int_or_zero(&status, "waste_hour");
        rates.energy = fields::int_or_zero(&status, "energy_hour");
        if let Some(ores) = status.get("ore") {
            rates.ores.add_all(ores);
        }
        Ok(rates)
    }

    /// Stored amounts. Totals come from the `*_stored` fields; the
    /// per-type breakdown is summed over the views of every ore storage
    /// and food reserve building on the body.
    pub async fn resources_stored<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<Resources, AntariaError> {
        let status = self.status_with(caller, "ore_stored").await?;
        let mut stored = Resources::new();
        stored.ore = fields::int_or_zero(&status, "ore_stored");
        stored.food = fields::int_or_zero(&status, "food_stored");
        stored.water = fields::int_or_zero(&status, "water_stored");
        stored.waste = fields::int_or_zero(&status, "waste_stored");
        stored.energy = fields::int_or_zero(&status, "energy_stored");

        for building in self.buildings(caller).await? {
            let module = building.building_module_name();
            if module.contains("OreStorage") {
                let view = building.view(caller).await?;
                if let Some(ores) = view.get("ore_stored") {
                    stored.ores.add_all(ores);
                }
            } else if module.contains("FoodReserve") {
                let view = building.view(caller).await?;
                if let Some(foods) = view.get("food_stored") {
                    stored.foods.add_all(foods);
                }
            }
        }
        Ok(stored)
    }

    /// Every building on the body, as listed by `get_buildings`.
    pub async fn buildings<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<Vec<Building>, AntariaError> {
        let result = self.handle.invoke(caller, &BodyMethod::GetBuildings).await?;
        let Some(listed) = result.get("buildings").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        let mut buildings = Vec::with_capacity(listed.len());
        for (id, status) in listed {
            let status = status.as_object().cloned().ok_or_else(|| {
                AntariaError::InvalidField {
                    module: MODULE.to_string(),
                    field: format!("buildings.{id}"),
                    value: status.clone(),
                }
            })?;
            buildings.push(Building::new(id.as_str(), status)?);
        }
        tracing::debug!(body = ?self.id(), count = buildings.len(), "listed buildings");
        Ok(buildings)
    }

    pub async fn rename<C: ModuleCaller>(
        &self,
        caller: &mut C,
        name: impl Into<String>,
    ) -> Result<(), AntariaError> {
        self.handle
            .invoke(caller, &BodyMethod::Rename(name.into()))
            .await?;
        Ok(())
    }
}
