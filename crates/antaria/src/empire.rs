//! The logged-in empire.

use std::collections::BTreeMap;

use antaria_session::{EntityId, Fragment, ModuleCaller, ModuleHandle, ModuleMethod};
use serde_json::Value;

use crate::fields;
use crate::{AntariaError, Body};

const MODULE: &str = "empire";

/// Remote operations of the `empire` module used by [`Empire`].
#[derive(Debug, Clone, PartialEq)]
pub enum EmpireMethod {
    GetStatus,
    SetStatusMessage(String),
}

impl ModuleMethod for EmpireMethod {
    fn name(&self) -> &str {
        match self {
            Self::GetStatus => "get_status",
            Self::SetStatusMessage(_) => "set_status_message",
        }
    }

    fn params(&self) -> Vec<Value> {
        match self {
            Self::SetStatusMessage(message) => vec![Value::String(message.clone())],
            Self::GetStatus => Vec::new(),
        }
    }
}

/// The empire the session is logged in as.
///
/// Login already returns the empire's status, so most reads are answered
/// from the cache without a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Empire {
    handle: ModuleHandle,
}

impl Default for Empire {
    fn default() -> Self {
        Self::new()
    }
}

impl Empire {
    pub fn new() -> Self {
        Self {
            handle: ModuleHandle::new(MODULE),
        }
    }

    pub fn handle(&self) -> &ModuleHandle {
        &self.handle
    }

    /// The empire's status: cached if present, else `get_status`.
    pub async fn status<C: ModuleCaller>(&self, caller: &mut C) -> Result<Fragment, AntariaError> {
        Ok(self.handle.status(caller, &EmpireMethod::GetStatus).await?)
    }

    /// The status, refreshed first if the cached one lacks `field`.
    async fn status_with<C: ModuleCaller>(
        &self,
        caller: &mut C,
        field: &str,
    ) -> Result<Fragment, AntariaError> {
        Ok(self
            .handle
            .status_with(caller, field, &EmpireMethod::GetStatus)
            .await?)
    }

    pub async fn id<C: ModuleCaller>(&self, caller: &mut C) -> Result<EntityId, AntariaError> {
        fields::entity_id(&self.status_with(caller, "id").await?, MODULE, "id")
    }

    pub async fn name<C: ModuleCaller>(&self, caller: &mut C) -> Result<String, AntariaError> {
        fields::string(&self.status_with(caller, "name").await?, MODULE, "name")
    }

    pub async fn is_isolationist<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<bool, AntariaError> {
        let status = self.status_with(caller, "is_isolationist").await?;
        Ok(fields::flag(&status, "is_isolationist"))
    }

    pub async fn has_new_messages<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<bool, AntariaError> {
        let status = self.status_with(caller, "has_new_messages").await?;
        Ok(fields::int_or_zero(&status, "has_new_messages") > 0)
    }

    pub async fn essentia<C: ModuleCaller>(&self, caller: &mut C) -> Result<f64, AntariaError> {
        fields::float(&self.status_with(caller, "essentia").await?, MODULE, "essentia")
    }

    /// Planet ids to names.
    pub async fn planets<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<BTreeMap<EntityId, String>, AntariaError> {
        let status = self.status_with(caller, "planets").await?;
        let value = fields::required(&status, MODULE, "planets")?;
        let planets = value.as_object().ok_or_else(|| AntariaError::InvalidField {
            module: MODULE.to_string(),
            field: "planets".to_string(),
            value: value.clone(),
        })?;
        Ok(planets
            .iter()
            .map(|(id, name)| {
                let name = name.as_str().map(str::to_string).unwrap_or_else(|| name.to_string());
                (EntityId::from(id.as_str()), name)
            })
            .collect())
    }

    pub async fn home_planet_id<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<EntityId, AntariaError> {
        let status = self.status_with(caller, "home_planet_id").await?;
        fields::entity_id(&status, MODULE, "home_planet_id")
    }

    pub async fn status_message<C: ModuleCaller>(
        &self,
        caller: &mut C,
    ) -> Result<String, AntariaError> {
        let status = self.status_with(caller, "status_message").await?;
        fields::string(&status, MODULE, "status_message")
    }

    /// Sets the public status message. The server echoes the new message
    /// in the returned status, so the cache reflects it afterwards.
    pub async fn set_status_message<C: ModuleCaller>(
        &self,
        caller: &mut C,
        message: impl Into<String>,
    ) -> Result<(), AntariaError> {
        self.handle
            .invoke(caller, &EmpireMethod::SetStatusMessage(message.into()))
            .await?;
        Ok(())
    }

    /// One [`Body`] per planet, ordered by id.
    pub async fn bodies<C: ModuleCaller>(&self, caller: &mut C) -> Result<Vec<Body>, AntariaError> {
        Ok(self.planets(caller).await?.into_keys().map(Body::new).collect())
    }

    pub async fn home_planet<C: ModuleCaller>(&self, caller: &mut C) -> Result<Body, AntariaError> {
        Ok(Body::new(self.home_planet_id(caller).await?))
    }
}
