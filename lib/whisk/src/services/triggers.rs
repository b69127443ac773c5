//! Triggers: named event channels.

use serde::Serialize;

use crate::services::{ListService, entity_path};
use crate::types::{ActivationId, Trigger};
use crate::{HttpClient, Method, Result, Transport};

/// Handle on the `triggers` collection.
#[derive(Debug)]
pub struct TriggerService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> TriggerService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> TriggerService<'_, C> {
    /// `GET triggers/{name}`.
    pub async fn get(&self, name: &str) -> Result<Trigger> {
        self.transport.get_json(&entity_path("triggers", name)?).await
    }

    /// `PUT triggers/{name}?overwrite=<overwrite>`.
    pub async fn insert(&self, trigger: &Trigger, overwrite: bool) -> Result<Trigger> {
        let path = format!("{}?overwrite={overwrite}", entity_path("triggers", &trigger.name)?);
        self.transport.send(Method::Put, &path, trigger).await
    }

    /// `DELETE triggers/{name}`.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.transport
            .call(Method::Delete, &entity_path("triggers", name)?)
            .await?;
        Ok(())
    }

    /// `POST triggers/{name}` with `payload` as the event.
    pub async fn fire<P>(&self, name: &str, payload: &P) -> Result<ActivationId>
    where
        P: Serialize + Sync + ?Sized,
    {
        self.transport
            .send(Method::Post, &entity_path("triggers", name)?, payload)
            .await
    }
}

impl<C: HttpClient> ListService for TriggerService<'_, C> {
    type Record = Trigger;

    async fn list(&self) -> Result<Vec<Trigger>> {
        self.transport.get_json("triggers").await
    }
}
