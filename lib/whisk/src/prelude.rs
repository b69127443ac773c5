//! Prelude module for convenient imports.
//!
//! ```
//! use whisk::prelude::*;
//! ```

pub use crate::types::{
    Action, Activation, ActivationId, ActivationLogs, ActivationResponse, Exec, KeyValue, Package,
    Rule, RuleState, Trigger,
};
pub use crate::{
    ApiError, Client, ClientConfig, Error, HttpClient, HyperClient, ListService, Method, Result,
    Target,
};
