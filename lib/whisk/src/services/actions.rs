//! Actions: deploy, inspect and invoke functions.

use serde::Serialize;
use serde_json::Value;

use crate::services::{ListService, entity_path};
use crate::types::Action;
use crate::{HttpClient, Method, Result, Transport};

/// Handle on the `actions` collection.
#[derive(Debug)]
pub struct ActionService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> ActionService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> ActionService<'_, C> {
    /// `GET actions/{name}`.
    pub async fn get(&self, name: &str) -> Result<Action> {
        self.transport.get_json(&entity_path("actions", name)?).await
    }

    /// `PUT actions/{name}?overwrite=<overwrite>`, where `name` is
    /// `action.name`. Returns the action as stored by the server.
    pub async fn insert(&self, action: &Action, overwrite: bool) -> Result<Action> {
        let path = format!("{}?overwrite={overwrite}", entity_path("actions", &action.name)?);
        self.transport.send(Method::Put, &path, action).await
    }

    /// `DELETE actions/{name}`.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.transport
            .call(Method::Delete, &entity_path("actions", name)?)
            .await?;
        Ok(())
    }

    /// `POST actions/{name}?blocking=<blocking>` with `payload` as parameters.
    ///
    /// A blocking invocation returns the activation record; a non-blocking one
    /// returns only `{"activationId": ...}`. Both come back as raw JSON.
    pub async fn invoke<P>(&self, name: &str, payload: &P, blocking: bool) -> Result<Value>
    where
        P: Serialize + Sync + ?Sized,
    {
        let path = format!("{}?blocking={blocking}", entity_path("actions", name)?);
        self.transport.send(Method::Post, &path, payload).await
    }
}

impl<C: HttpClient> ListService for ActionService<'_, C> {
    type Record = Action;

    /// `GET actions`.
    async fn list(&self) -> Result<Vec<Action>> {
        self.transport.get_json("actions").await
    }
}
