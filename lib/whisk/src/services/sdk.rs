//! SDK downloads.

use std::io::Write;

use whisk_core::ContentType;

use crate::services::entity_path;
use crate::{HttpClient, Method, Response, Result, Target, Transport};

/// Handle on the `sdk` downloads.
#[derive(Debug)]
pub struct SdkService<'a, C> {
    transport: &'a Transport<C>,
}

impl<'a, C> SdkService<'a, C> {
    pub(crate) fn new(transport: &'a Transport<C>) -> Self {
        Self { transport }
    }
}

impl<C: HttpClient> SdkService<'_, C> {
    /// `GET sdk/{component}`, copying the archive verbatim into `sink`.
    ///
    /// The body is never parsed. Returns the envelope so the caller can read
    /// headers such as `Content-Disposition`.
    pub async fn install(
        &self,
        component: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<Response<()>> {
        let path = entity_path("sdk", component)?;
        let mut request = self.transport.build_request::<()>(Method::Get, &path, None)?;
        request
            .headers_mut()
            .insert("Accept".to_string(), ContentType::OctetStream.as_str().to_string());

        self.transport.execute(request, Target::sink(sink)).await
    }
}
