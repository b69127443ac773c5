//! Packages: groups of actions, and bindings of shared packages.

use crate::services::{ListService, entity_path};
use crate::types::Package;
use crate::{HttpClient, Method, Result, Transport};

/// Handle on the `packages` collection.
#[derive(Debug)]
pub struct PackageService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> PackageService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> PackageService<'_, C> {
    /// `GET packages/{name}`.
    pub async fn get(&self, name: &str) -> Result<Package> {
        self.transport.get_json(&entity_path("packages", name)?).await
    }

    /// `PUT packages/{name}?overwrite=<overwrite>`.
    ///
    /// Set [`Package::binding`] to create a binding instead of a new package.
    pub async fn insert(&self, package: &Package, overwrite: bool) -> Result<Package> {
        let path = format!("{}?overwrite={overwrite}", entity_path("packages", &package.name)?);
        self.transport.send(Method::Put, &path, package).await
    }

    /// `DELETE packages/{name}`.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.transport
            .call(Method::Delete, &entity_path("packages", name)?)
            .await?;
        Ok(())
    }
}

impl<C: HttpClient> ListService for PackageService<'_, C> {
    type Record = Package;

    async fn list(&self) -> Result<Vec<Package>> {
        self.transport.get_json("packages").await
    }
}
