//! Example consumer: compiles a spec file into schema, backend and frontend sources.
//!
//! Run from repo root: `SPEC_PATH=sample/spec.json OUTPUT_DIR=out cargo run -p example-consumer`

use architect_codegen::{generate, parse_spec, DirectorySink, GeneratorSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("architect_codegen=info")),
        )
        .init();

    let spec_path = std::env::var("SPEC_PATH").unwrap_or_else(|_| "spec.json".into());
    let output_dir = std::env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".into());

    let raw = tokio::fs::read_to_string(&spec_path).await?;
    let spec = parse_spec(&raw)?;
    let settings = GeneratorSettings::from_env();
    let mut sink = DirectorySink::new(&output_dir);
    let written = generate(&spec, &settings, &mut sink).await?;
    tracing::info!(spec = %spec_path, output = %sink.root().display(), files = written.len(), "done");
    Ok(())
}
