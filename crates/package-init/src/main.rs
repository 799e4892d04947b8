use object_store::tracing::setup_tracing;
use object_store::ObjectClient;
use package_init::config::InitConfig;
use package_init::context::Context;
use package_init::lifecycle::Cluster;
use std::error::Error;
use tracing::{error, info, Instrument};

/// Formats `e` with every source in its chain.
fn error_chain(e: &dyn Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = InitConfig::from_env().map_err(|e| error_chain(&e))?;
    info!(
        providers = config.providers.len(),
        configurations = config.configurations.len(),
        "Starting package initializer"
    );

    let cluster = Cluster::new(config.store_buffer);

    // Ctrl-C cancels in-flight store requests; already applied packages stay.
    let (ctx, cancel) = Context::with_cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling installation");
            cancel.cancel();
        }
    });

    let installer = config.installer();
    let span = tracing::info_span!("install");
    let result = installer
        .run(&ctx, cluster.client())
        .instrument(span)
        .await;

    if let Err(e) = &result {
        error!(error = %error_chain(e), "Installation failed");
    }

    let client = cluster.client();
    for provider in client.providers().list().await.map_err(|e| error_chain(&e))? {
        info!(
            kind = "Provider",
            name = %provider.metadata.name,
            package = %provider.spec.package,
            "Installed"
        );
    }
    for configuration in client
        .configurations()
        .list()
        .await
        .map_err(|e| error_chain(&e))?
    {
        info!(
            kind = "Configuration",
            name = %configuration.metadata.name,
            package = %configuration.spec.package,
            "Installed"
        );
    }

    cluster.shutdown().await?;

    result.map_err(|e| error_chain(&e))
}
