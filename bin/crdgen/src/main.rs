//! Prints the CustomResourceDefinitions of every Tanzu kind as a YAML stream

use anyhow::Result;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use std::io::Write;
use tanzu_core::scheme;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean manifest stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let scheme = scheme::build()?;
    let manifests = render(scheme.crds())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(manifests.as_bytes())?;
    info!("Rendered {} CRDs", scheme.len());
    Ok(())
}

fn render<'a>(crds: impl Iterator<Item = &'a CustomResourceDefinition>) -> Result<String> {
    let mut out = String::new();
    for crd in crds {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(crd)?);
    }
    Ok(out)
}
