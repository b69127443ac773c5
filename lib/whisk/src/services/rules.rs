//! Rules: trigger to action bindings.

use serde::Serialize;

use crate::services::{ListService, entity_path};
use crate::types::{Rule, RuleState};
use crate::{HttpClient, Method, Result, Transport};

#[derive(Serialize)]
struct StateChange {
    status: RuleState,
}

/// Handle on the `rules` collection.
#[derive(Debug)]
pub struct RuleService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> RuleService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> RuleService<'_, C> {
    /// `GET rules/{name}`.
    pub async fn get(&self, name: &str) -> Result<Rule> {
        self.transport.get_json(&entity_path("rules", name)?).await
    }

    /// `PUT rules/{name}?overwrite=<overwrite>`.
    pub async fn insert(&self, rule: &Rule, overwrite: bool) -> Result<Rule> {
        let path = format!("{}?overwrite={overwrite}", entity_path("rules", &rule.name)?);
        self.transport.send(Method::Put, &path, rule).await
    }

    /// `DELETE rules/{name}`.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.transport
            .call(Method::Delete, &entity_path("rules", name)?)
            .await?;
        Ok(())
    }

    /// `POST rules/{name}` with `{"status": state}`: enable or disable a rule.
    pub async fn set_state(&self, name: &str, state: RuleState) -> Result<Rule> {
        self.transport
            .send(
                Method::Post,
                &entity_path("rules", name)?,
                &StateChange { status: state },
            )
            .await
    }
}

impl<C: HttpClient> ListService for RuleService<'_, C> {
    type Record = Rule;

    async fn list(&self) -> Result<Vec<Rule>> {
        self.transport.get_json("rules").await
    }
}
