//! Backend target: routing, service, and data-access layers per entity.
//! Every layer is rendered from the same route list, so function names and signatures line up.

mod data_access;
mod routes;
mod service;

pub use data_access::DataAccessModule;
pub use routes::RoutingModule;
pub use service::ServiceModule;

use crate::artifact::Artifact;
use crate::config::{ResolvedEntity, ResolvedModel};
use crate::settings::GeneratorSettings;

pub const ROUTING_PATH: &str = "backend/main.py";
pub const SERVICE_PATH: &str = "backend/app/service.py";
pub const DATA_ACCESS_PATH: &str = "backend/app/database.py";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

/// Operations exposed for every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// GET /{plural}
    List,
    /// POST /{plural}
    Create,
    /// GET /{plural}/{id}
    Read,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::List, Operation::Create, Operation::Read];

    pub fn method(self) -> HttpMethod {
        match self {
            Operation::List | Operation::Read => HttpMethod::Get,
            Operation::Create => HttpMethod::Post,
        }
    }
}

/// One HTTP route and the function name shared by all three layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub entity: String,
    pub operation: Operation,
    pub path: String,
    pub function: String,
    /// Argument passed down through service and data access: request body or item id.
    pub param: Option<String>,
}

impl Route {
    pub fn new(entity: &ResolvedEntity, operation: Operation) -> Self {
        let (path, function, param) = match operation {
            Operation::List => (
                format!("/{}", entity.plural),
                format!("get_{}", entity.plural),
                None,
            ),
            Operation::Create => (
                format!("/{}", entity.plural),
                format!("post_{}", entity.plural),
                Some("body".to_string()),
            ),
            Operation::Read => {
                let id_param = format!("{}_id", entity.name);
                (
                    format!("/{}/{{{}}}", entity.plural, id_param),
                    format!("get_{}", entity.name),
                    Some(id_param),
                )
            }
        };
        Route {
            entity: entity.name.clone(),
            operation,
            path,
            function,
            param,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.operation.method()
    }

    /// Parameter list for service and data-access signatures.
    pub fn params(&self) -> &str {
        self.param.as_deref().unwrap_or("")
    }
}

/// Routes for all entities, spec order, then list/create/read per entity.
pub fn entity_routes(model: &ResolvedModel) -> Vec<Route> {
    model
        .entities
        .iter()
        .flat_map(|e| Operation::ALL.iter().map(move |&op| Route::new(e, op)))
        .collect()
}

/// Python single-quoted string literal. Control characters are escaped so the literal stays on one line.
pub(crate) fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub fn compile_backend(model: &ResolvedModel, settings: &GeneratorSettings) -> Vec<Artifact> {
    let routes = entity_routes(model);
    tracing::debug!(routes = routes.len(), "backend routes");
    vec![
        Artifact::new(
            ROUTING_PATH,
            RoutingModule {
                routes: &routes,
                settings,
            }
            .to_string(),
        ),
        Artifact::new(SERVICE_PATH, ServiceModule { routes: &routes }.to_string()),
        Artifact::new(
            DATA_ACCESS_PATH,
            DataAccessModule {
                model,
                settings: &settings.database,
            }
            .to_string(),
        ),
    ]
}
