//! Architect codegen: compiles an entity spec into a SQL schema, a REST backend, and web UI pages.

pub mod artifact;
pub mod backend;
pub mod case;
pub mod config;
pub mod error;
pub mod frontend;
pub mod settings;
pub mod sql;
pub mod typemap;
pub mod writer;

pub use artifact::Artifact;
pub use backend::compile_backend;
pub use config::{from_value, parse_spec, resolve, ResolvedEntity, ResolvedModel, SpecDocument};
pub use error::{CodegenError, ConfigError};
pub use frontend::compile_frontend;
pub use settings::{DatabaseSettings, GeneratorSettings};
pub use sql::compile_schema;
pub use writer::{write_artifacts, ArtifactSink, DirectorySink, MemorySink};

use std::path::PathBuf;

/// All artifacts for a resolved model: schema, then backend, then frontend.
pub fn compile(model: &ResolvedModel, settings: &GeneratorSettings) -> Vec<Artifact> {
    let mut artifacts = compile_schema(model);
    artifacts.extend(compile_backend(model, settings));
    artifacts.extend(compile_frontend(model, settings));
    artifacts
}

/// Resolve, compile and write. Nothing reaches the sink unless the spec is valid.
pub async fn generate<S>(
    spec: &SpecDocument,
    settings: &GeneratorSettings,
    sink: &mut S,
) -> Result<Vec<PathBuf>, CodegenError>
where
    S: ArtifactSink + ?Sized,
{
    let model = resolve(spec)?;
    let artifacts = compile(&model, settings);
    let written = write_artifacts(sink, &artifacts).await?;
    tracing::info!(
        entities = model.entities.len(),
        files = written.len(),
        "generated artifacts"
    );
    Ok(written)
}
