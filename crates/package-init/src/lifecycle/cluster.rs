use crate::clients::ClusterClient;
use crate::package_store;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One running store actor per package kind.
///
/// ```ignore
/// let cluster = Cluster::new(32);
/// installer.run(&ctx, cluster.client()).await?;
/// cluster.shutdown().await?;
/// ```
pub struct Cluster {
    client: ClusterClient,
    handles: Vec<JoinHandle<()>>,
}

impl Cluster {
    /// Spawns the Provider and Configuration stores.
    ///
    /// `buffer_size` is the request channel capacity of each store.
    pub fn new(buffer_size: usize) -> Self {
        let (provider_actor, providers) = package_store::new_providers(buffer_size);
        let (configuration_actor, configurations) =
            package_store::new_configurations(buffer_size);

        let provider_handle = tokio::spawn(provider_actor.run());
        let configuration_handle = tokio::spawn(configuration_actor.run());

        Self {
            client: ClusterClient::new(providers, configurations),
            handles: vec![provider_handle, configuration_handle],
        }
    }

    pub fn client(&self) -> &ClusterClient {
        &self.client
    }

    /// Stops every store and waits for it.
    ///
    /// Fails if a store task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cluster");
        drop(self.client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(format!("store task failed: {e}"));
            }
        }

        info!("Cluster shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::ObjectClient;

    #[tokio::test]
    async fn test_starts_empty_and_shuts_down() {
        let cluster = Cluster::new(4);
        assert!(cluster.client().providers().list().await.unwrap().is_empty());
        assert!(cluster.client().configurations().list().await.unwrap().is_empty());
        cluster.shutdown().await.unwrap();
    }
}
