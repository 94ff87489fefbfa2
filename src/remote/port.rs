//! The request/response port connecting the core to a remote collaborator.
//!
//! [`RemotePort`] is the server side: it owns a boxed collaborator and turns
//! each [`ApiRequest`] into the matching trait call, folding any failure into
//! an [`ApiResponse::Error`] instead of propagating it. [`PortClient`] is the
//! client side: it implements [`RemoteCollaborator`] over any closure that
//! carries requests to a port, so the executor never knows whether it is
//! talking to an in-process store or a serialized transport.

use crate::domain::{Color, EnumOption, OptioneerError, Result};
use crate::remote::collaborator::{InsertPosition, RemoteCollaborator};
use crate::remote::messages::{ApiRequest, ApiResponse};

/// Server-side dispatcher from [`ApiRequest`] to a collaborator.
pub struct RemotePort {
    collaborator: Box<dyn RemoteCollaborator>,
}

impl RemotePort {
    /// Wraps a collaborator behind the message protocol.
    #[must_use]
    pub fn new(collaborator: Box<dyn RemoteCollaborator>) -> Self {
        Self { collaborator }
    }

    /// Dispatches one request and returns its response.
    ///
    /// Never panics and never returns `Err`: collaborator failures and
    /// malformed requests both come back as [`ApiResponse::Error`].
    pub fn dispatch(&mut self, request: ApiRequest) -> ApiResponse {
        let _span = tracing::debug_span!("port_dispatch").entered();
        match self.handle(request) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                ApiResponse::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    fn handle(&mut self, request: ApiRequest) -> Result<ApiResponse> {
        match request {
            ApiRequest::List => {
                let records = self.collaborator.list()?;
                Ok(ApiResponse::Listing { records })
            }
            ApiRequest::Create { name, color } => {
                let id = self.collaborator.create(&name, color)?;
                Ok(ApiResponse::Created { id })
            }
            ApiRequest::Update { id, name, color } => {
                self.collaborator.update(&id, name.as_deref(), color)?;
                Ok(ApiResponse::Updated)
            }
            ApiRequest::InsertRelative {
                id,
                before_id,
                after_id,
            } => {
                let position = match (before_id, after_id) {
                    (Some(before), None) => InsertPosition::Before(before),
                    (None, Some(after)) => InsertPosition::After(after),
                    (None, None) => {
                        return Err(OptioneerError::Port(
                            "insert-relative carries no anchor".into(),
                        ))
                    }
                    (Some(_), Some(_)) => {
                        return Err(OptioneerError::Port(
                            "insert-relative carries both anchors".into(),
                        ))
                    }
                };
                self.collaborator.insert_relative(&id, position)?;
                Ok(ApiResponse::Inserted)
            }
            ApiRequest::Disable { id } => {
                self.collaborator.disable(&id)?;
                Ok(ApiResponse::Disabled)
            }
        }
    }
}

/// Client-side [`RemoteCollaborator`] over a request-carrying closure.
///
/// The transport function is typically a [`RemotePort`] bound directly, or a
/// serialize/deserialize hop in front of one.
pub struct PortClient<F>
where
    F: FnMut(ApiRequest) -> ApiResponse,
{
    transport: F,
}

impl<F> PortClient<F>
where
    F: FnMut(ApiRequest) -> ApiResponse,
{
    /// Creates a client over the given transport function.
    pub fn new(transport: F) -> Self {
        Self { transport }
    }

    fn call(&mut self, request: ApiRequest) -> Result<ApiResponse> {
        match (self.transport)(request) {
            ApiResponse::Error { message } => Err(OptioneerError::Remote(message)),
            response => Ok(response),
        }
    }
}

impl<F> RemoteCollaborator for PortClient<F>
where
    F: FnMut(ApiRequest) -> ApiResponse,
{
    fn list(&mut self) -> Result<Vec<EnumOption>> {
        match self.call(ApiRequest::List)? {
            ApiResponse::Listing { records } => Ok(records),
            other => Err(unexpected("listing", &other)),
        }
    }

    fn create(&mut self, name: &str, color: Color) -> Result<String> {
        let request = ApiRequest::Create {
            name: name.to_owned(),
            color,
        };
        match self.call(request)? {
            ApiResponse::Created { id } => Ok(id),
            other => Err(unexpected("created", &other)),
        }
    }

    fn update(&mut self, id: &str, name: Option<&str>, color: Option<Color>) -> Result<()> {
        let request = ApiRequest::Update {
            id: id.to_owned(),
            name: name.map(str::to_owned),
            color,
        };
        match self.call(request)? {
            ApiResponse::Updated => Ok(()),
            other => Err(unexpected("updated", &other)),
        }
    }

    fn insert_relative(&mut self, id: &str, position: InsertPosition) -> Result<()> {
        let (before_id, after_id) = match position {
            InsertPosition::Before(anchor) => (Some(anchor), None),
            InsertPosition::After(anchor) => (None, Some(anchor)),
        };
        let request = ApiRequest::InsertRelative {
            id: id.to_owned(),
            before_id,
            after_id,
        };
        match self.call(request)? {
            ApiResponse::Inserted => Ok(()),
            other => Err(unexpected("inserted", &other)),
        }
    }

    fn disable(&mut self, id: &str) -> Result<()> {
        let request = ApiRequest::Disable { id: id.to_owned() };
        match self.call(request)? {
            ApiResponse::Disabled => Ok(()),
            other => Err(unexpected("disabled", &other)),
        }
    }
}

fn unexpected(wanted: &str, got: &ApiResponse) -> OptioneerError {
    OptioneerError::Port(format!("expected {wanted} response, got {got:?}"))
}
