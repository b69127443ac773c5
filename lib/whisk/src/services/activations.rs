//! Activations: records of past runs. Read-only.

use crate::services::{ListService, entity_path};
use crate::types::{Activation, ActivationLogs, ActivationResponse};
use crate::{HttpClient, Result, Transport};

/// Handle on the `activations` collection.
#[derive(Debug)]
pub struct ActivationService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> ActivationService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> ActivationService<'_, C> {
    /// `GET activations/{id}`.
    pub async fn get(&self, id: &str) -> Result<Activation> {
        self.transport.get_json(&entity_path("activations", id)?).await
    }

    /// `GET activations/{id}/logs`.
    pub async fn logs(&self, id: &str) -> Result<ActivationLogs> {
        let path = format!("{}/logs", entity_path("activations", id)?);
        self.transport.get_json(&path).await
    }

    /// `GET activations/{id}/result`.
    pub async fn result(&self, id: &str) -> Result<ActivationResponse> {
        let path = format!("{}/result", entity_path("activations", id)?);
        self.transport.get_json(&path).await
    }
}

impl<C: HttpClient> ListService for ActivationService<'_, C> {
    type Record = Activation;

    async fn list(&self) -> Result<Vec<Activation>> {
        self.transport.get_json("activations").await
    }
}
