//! The client facade.

use url::Url;

use crate::config::{ClientConfig, DEFAULT_BASE_URL, VERSION, default_user_agent};
use crate::services::{
    ActionService, ActivationService, ListService, PackageService, RuleService, SdkService,
    TriggerService,
};
use crate::types::{Action, Activation, Rule, Trigger};
use crate::{Credential, Error, HttpClient, HyperClient, Result, Transport};

/// Client for an OpenWhisk-style API.
///
/// Owns one [`Transport`] (execution mechanism, base URL, credential) and
/// hands out resource services that borrow it.
///
/// The execution mechanism is any [`HttpClient`]. Pass an `Arc<C>` or a `&C`
/// to share one connection pool between clients.
///
/// # Example
///
/// ```no_run
/// use whisk::{Client, ListService};
///
/// # async fn run() -> whisk::Result<()> {
/// let mut client = Client::default_client()?;
/// client.set_base_url("https://openwhisk.example.com/api/v1/namespaces/_/")?;
/// client.auth("23bc46b1-71f6-4ed5-8c54-816aa4f8c502:123zO3xZCLrMN6v2BKK1dXYFpXlPkccOFqm12CdAsMgRU4VrNZ9lyGVCGuMDGIwP")?;
///
/// for action in client.actions().list().await? {
///     println!("{}", action.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<C = HyperClient> {
    transport: Transport<C>,
}

/// Result of [`Client::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// All actions.
    pub actions: Vec<Action>,
    /// All triggers.
    pub triggers: Vec<Trigger>,
    /// All rules.
    pub rules: Vec<Rule>,
    /// All activations.
    pub activations: Vec<Activation>,
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    // Without the trailing slash `join` would replace the last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl<C> Client<C> {
    /// Create a client on [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the default URL is malformed.
    pub fn new(http: C) -> Result<Self> {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Create a client on `base_url`.
    ///
    /// A missing trailing slash is added so relative paths extend the base
    /// (`https://host/api/v1/namespaces/_` and `.../_/` behave the same).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn with_base_url(http: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_ref())?;
        Ok(Self {
            transport: Transport::new(http, base_url, default_user_agent()),
        })
    }

    /// Replace the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] and keeps the current URL if `base_url`
    /// is not an absolute URL.
    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) -> Result<()> {
        let base_url = parse_base_url(base_url.as_ref())?;
        self.transport.set_base_url(base_url);
        Ok(())
    }

    /// Current base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// The shared transport, for requests no service covers.
    #[must_use]
    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    /// Store a credential sent with every following request.
    ///
    /// `<uuid>:<secret>` keys use Basic auth, other keys are Bearer tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty key; the stored
    /// credential is left as it was.
    pub fn auth(&mut self, key: &str) -> Result<()> {
        let credential = Credential::from_key(key)?;
        self.transport.set_credential(Some(credential));
        Ok(())
    }

    /// Forget the stored credential.
    pub fn clean(&mut self) {
        self.transport.set_credential(None);
    }

    /// Version of this library.
    #[must_use]
    pub const fn version() -> &'static str {
        VERSION
    }

    /// The `actions` collection.
    #[must_use]
    pub fn actions(&self) -> ActionService<'_, C> {
        ActionService::new(&self.transport)
    }

    /// The `triggers` collection.
    #[must_use]
    pub fn triggers(&self) -> TriggerService<'_, C> {
        TriggerService::new(&self.transport)
    }

    /// The `rules` collection.
    #[must_use]
    pub fn rules(&self) -> RuleService<'_, C> {
        RuleService::new(&self.transport)
    }

    /// The `activations` collection.
    #[must_use]
    pub fn activations(&self) -> ActivationService<'_, C> {
        ActivationService::new(&self.transport)
    }

    /// The `packages` collection.
    #[must_use]
    pub fn packages(&self) -> PackageService<'_, C> {
        PackageService::new(&self.transport)
    }

    /// SDK downloads.
    #[must_use]
    pub fn sdk(&self) -> SdkService<'_, C> {
        SdkService::new(&self.transport)
    }
}

impl<C: HttpClient> Client<C> {
    /// List actions, triggers, rules and activations, in that order.
    ///
    /// Stops at the first failure: later collections are not requested and
    /// nothing already fetched is returned.
    pub async fn list(&self) -> Result<Listing> {
        let actions = self.actions().list().await?;
        let triggers = self.triggers().list().await?;
        let rules = self.rules().list().await?;
        let activations = self.activations().list().await?;

        Ok(Listing {
            actions,
            triggers,
            rules,
            activations,
        })
    }
}

impl Client<HyperClient> {
    /// Create a client with a [`HyperClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `config.base_url` is not an absolute
    /// URL.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = HyperClient::with_config(config.http);
        Ok(Self {
            transport: Transport::new(http, base_url, config.user_agent),
        })
    }

    /// Create a client with the default configuration.
    pub fn default_client() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn new_uses_default_base_url() {
        let client = Client::new(()).expect("client");
        check!(client.base_url().as_str() == DEFAULT_BASE_URL);
        check!(client.transport().credential().is_none());
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client =
            Client::with_base_url((), "https://whisk.example.com/api/v1/namespaces/_").expect("client");
        check!(client.base_url().as_str() == "https://whisk.example.com/api/v1/namespaces/_/");

        let request = client
            .transport()
            .build_request::<()>(crate::Method::Get, "actions", None)
            .expect("request");
        check!(request.url().as_str() == "https://whisk.example.com/api/v1/namespaces/_/actions");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let_assert!(Err(Error::InvalidUrl(_)) = Client::with_base_url((), "not a url"));
        let_assert!(Err(Error::InvalidUrl(_)) = Client::with_base_url((), "mailto:ops@example.com"));
    }

    #[test]
    fn set_base_url_keeps_old_url_on_error() {
        let mut client = Client::new(()).expect("client");
        client
            .set_base_url("https://whisk.example.com/api/v1")
            .expect("valid url");
        check!(client.base_url().as_str() == "https://whisk.example.com/api/v1/");

        let_assert!(Err(Error::InvalidUrl(_)) = client.set_base_url("::"));
        check!(client.base_url().as_str() == "https://whisk.example.com/api/v1/");
    }

    #[test]
    fn auth_then_clean() {
        let mut client = Client::new(()).expect("client");

        client.auth("uuid:secret").expect("auth");
        let_assert!(Some(Credential::Basic(_)) = client.transport().credential());

        client.auth("token").expect("auth");
        let_assert!(Some(Credential::Bearer(_)) = client.transport().credential());

        client.clean();
        check!(client.transport().credential().is_none());
    }

    #[test]
    fn empty_key_keeps_previous_credential() {
        let mut client = Client::new(()).expect("client");
        client.auth("token").expect("auth");

        let_assert!(Err(Error::InvalidRequest(_)) = client.auth(""));
        check!(client.transport().credential() == Some(&Credential::Bearer("token".to_string())));
    }

    #[test]
    fn version_is_crate_version() {
        check!(Client::<()>::version() == env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn from_config_applies_settings() {
        let config = ClientConfig::builder()
            .base_url("https://whisk.example.com/api/v1/namespaces/guest")
            .user_agent("ops-bot/1.0")
            .timeout(std::time::Duration::from_secs(5))
            .build();
        let client = Client::from_config(config).expect("client");

        check!(client.base_url().as_str() == "https://whisk.example.com/api/v1/namespaces/guest/");
        check!(client.transport().http().config().timeout == std::time::Duration::from_secs(5));

        let request = client
            .transport()
            .build_request::<()>(crate::Method::Get, "rules", None)
            .expect("request");
        check!(request.header("User-Agent") == Some("ops-bot/1.0"));
    }
}
