//! Resource services.
//!
//! Each service is a thin facade over the shared [`crate::Transport`]: it
//! picks the method and path, and decodes into the resource's record type.
//! Services borrow the transport of the [`crate::Client`] they come from and
//! never change its configuration.

use std::future::Future;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

mod actions;
mod activations;
mod packages;
mod rules;
mod sdk;
mod triggers;

pub use actions::ActionService;
pub use activations::ActivationService;
pub use packages::PackageService;
pub use rules::RuleService;
pub use sdk::SdkService;
pub use triggers::TriggerService;

/// A resource kind that can list its collection.
pub trait ListService {
    /// Record type of the collection.
    type Record;

    /// List the collection.
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Record>>> + Send;
}

// Like a path segment, except '/' is kept so `package/action` names resolve.
const NAME_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'%');

/// `{collection}/{name}`, with `name` percent-encoded.
///
/// `name` may be `package/entity`, but every segment must be a real name:
/// empty, `.` and `..` segments would resolve outside the entity.
pub(crate) fn entity_path(collection: &str, name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::invalid_request(format!(
            "{collection}: entity name must not be empty"
        )));
    }
    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(Error::invalid_request(format!(
            "{collection}: invalid entity name {name:?}"
        )));
    }
    Ok(format!(
        "{collection}/{}",
        utf8_percent_encode(name, NAME_ENCODE_SET)
    ))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn plain_names_are_kept() {
        check!(entity_path("actions", "hello").expect("path") == "actions/hello");
        check!(entity_path("actions", "utils/echo").expect("path") == "actions/utils/echo");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        check!(entity_path("actions", "hello world").expect("path") == "actions/hello%20world");
        check!(entity_path("triggers", "a?b#c").expect("path") == "triggers/a%3Fb%23c");
        check!(entity_path("rules", "100%").expect("path") == "rules/100%25");
    }

    #[test]
    fn empty_name_is_rejected() {
        let_assert!(Err(Error::InvalidRequest(message)) = entity_path("packages", ""));
        check!(message.contains("packages"));
    }

    #[test]
    fn dot_and_empty_segments_are_rejected() {
        for name in ["..", ".", "../rules/r1", "utils/..", "utils/./echo", "/echo", "echo/", "utils//echo"] {
            let_assert!(
                Err(Error::InvalidRequest(_)) = entity_path("actions", name),
                "{name} should be rejected"
            );
        }
        // Dots inside a segment are plain characters.
        check!(entity_path("actions", "v1.2..3").expect("path") == "actions/v1.2..3");
    }
}
