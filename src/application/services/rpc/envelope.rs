use serde_json::{Map, Value};

use crate::domain::rpc::{ProtocolError, ServerError, Status};

/// How a request reached the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// `{"method": …, "params": [{…}]}`
    Http,
    /// `{"command": …, …}` with parameters inline
    WebSocket,
}

/// Command name and parameters pulled out of a raw request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub command: String,
    pub params: Value,
    pub id: Option<Value>,
    pub transport: Transport,
}

impl RequestEnvelope {
    /// Frame a JSON-RPC style request
    pub fn from_http(request: Value) -> Result<Self, Status> {
        let Value::Object(mut request) = request else {
            return Err(Status::new(ProtocolError::BadSyntax));
        };

        let command = command_name(&request, "method")?;
        let params = match request.remove("params") {
            None => Value::Object(Map::new()),
            Some(Value::Array(params)) => single_object(params)?,
            Some(_) => return Err(Status::new(ServerError::ParamsUnparseable)),
        };

        Ok(Self {
            command,
            params,
            id: request.remove("id"),
            transport: Transport::Http,
        })
    }

    /// Frame a WebSocket style request
    pub fn from_ws(request: Value) -> Result<Self, Status> {
        let Value::Object(request) = request else {
            return Err(Status::new(ProtocolError::BadSyntax));
        };

        let command = command_name(&request, "command")?;
        let id = request.get("id").cloned();

        Ok(Self {
            command,
            params: Value::Object(request),
            id,
            transport: Transport::WebSocket,
        })
    }

    /// Frame a request of either shape, keyed on whether it names a `method`
    pub fn from_value(request: Value) -> Result<Self, Status> {
        if request.get("method").is_some() {
            Self::from_http(request)
        } else {
            Self::from_ws(request)
        }
    }
}

fn command_name(request: &Map<String, Value>, key: &str) -> Result<String, Status> {
    match request.get(key) {
        None | Some(Value::Null) => Err(Status::new(ServerError::CommandIsMissing)),
        Some(Value::String(name)) if name.is_empty() => Err(Status::new(ServerError::CommandIsEmpty)),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(_) => Err(Status::new(ServerError::CommandNotString)),
    }
}

fn single_object(params: Vec<Value>) -> Result<Value, Status> {
    match <[Value; 1]>::try_from(params) {
        Ok([params @ Value::Object(_)]) => Ok(params),
        _ => Err(Status::new(ServerError::ParamsUnparseable)),
    }
}
