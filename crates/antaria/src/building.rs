//! Buildings on a body.
//!
//! The API only lists buildings through a body's `get_buildings`, whose
//! result carries each building's initial status, including the `url` of
//! the module that serves it. A [`Building`] keeps that status and sends
//! its calls to the `url`, while reading the status cache under
//! `"building"`.

use antaria_session::{EntityId, Fragment, ModuleCaller, ModuleHandle, ModuleMethod};
use serde_json::Value;

use crate::fields::{self, flag};
use crate::AntariaError;

/// Cache key shared by every building type.
const MODULE: &str = "building";

/// Remote operations common to all buildings.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildingMethod {
    /// Full view of the building plus type-specific data.
    View,
    Upgrade,
    Demolish,
}

impl ModuleMethod for BuildingMethod {
    fn name(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Upgrade => "upgrade",
            Self::Demolish => "demolish",
        }
    }
}

/// One building, as listed by its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    handle: ModuleHandle,
    status: Fragment,
}

impl Building {
    /// A building from its id and the status `get_buildings` listed for
    /// it. The status must carry the building's `url`.
    pub fn new(id: impl Into<EntityId>, mut status: Fragment) -> Result<Self, AntariaError> {
        let id = id.into();
        let url = fields::string(&status, MODULE, "url")?;
        status.insert("id".to_string(), Value::String(id.as_str().to_string()));
        Ok(Self {
            handle: ModuleHandle::new(MODULE).with_path(url).with_id(id),
            status,
        })
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.handle.id()
    }

    /// The display name, e.g. `"Ore Storage Tanks"`.
    pub fn name(&self) -> &str {
        self.status.get("name").and_then(Value::as_str).unwrap_or("")
    }

    /// The module path calls go to, e.g. `"/orestorage"`.
    pub fn url(&self) -> &str {
        self.handle.path()
    }

    /// The name with spaces removed, e.g. `"OreStorageTanks"`.
    pub fn building_module_name(&self) -> String {
        self.name().chars().filter(|c| *c != ' ').collect()
    }

    /// True while the building is upgrading or being repaired.
    pub fn pending_build(&self) -> bool {
        self.status.contains_key("pending_build")
    }

    pub fn level(&self) -> i64 {
        fields::int_or_zero(&self.status, "level")
    }

    /// Whether the building is currently working on something.
    pub fn is_working(&self) -> bool {
        flag(&self.status, "work")
    }

    /// The status this building was listed with.
    pub fn status(&self) -> &Fragment {
        &self.status
    }

    pub fn handle(&self) -> &ModuleHandle {
        &self.handle
    }

    /// Calls `view`. The whole result is returned, since buildings add
    /// their own keys next to `building` and `status` (e.g. `ore_stored`).
    pub async fn view<C: ModuleCaller>(&self, caller: &mut C) -> Result<Value, AntariaError> {
        Ok(self.handle.invoke(caller, &BuildingMethod::View).await?)
    }

    pub async fn upgrade<C: ModuleCaller>(&self, caller: &mut C) -> Result<Value, AntariaError> {
        tracing::info!(building = %self.name(), url = %self.url(), "upgrading building");
        Ok(self.handle.invoke(caller, &BuildingMethod::Upgrade).await?)
    }

    pub async fn demolish<C: ModuleCaller>(&self, caller: &mut C) -> Result<Value, AntariaError> {
        tracing::info!(building = %self.name(), url = %self.url(), "demolishing building");
        Ok(self.handle.invoke(caller, &BuildingMethod::Demolish).await?)
    }
}
