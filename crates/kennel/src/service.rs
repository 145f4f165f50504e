use crate::{
    graphql_api::api_service::{
        self,
        SharedSource,
    },
    ports::RecordSource,
    schema::build_schema,
    store::RecordStore,
};
use std::{
    net::SocketAddr,
    panic,
    sync::Arc,
};
use tokio::{
    sync::oneshot,
    task::JoinHandle,
};

pub use crate::graphql_api::Config;

pub struct KennelService {
    handle: JoinHandle<anyhow::Result<()>>,
    /// Shutdown the GraphQL api.
    shutdown: oneshot::Sender<()>,
    /// The address bound by the system for serving the API
    pub bound_address: SocketAddr,
}

impl KennelService {
    /// Create a service that serves the reference records.
    #[tracing::instrument(skip(config))]
    pub async fn new_node(config: Config) -> anyhow::Result<Self> {
        Self::from_store(RecordStore::reference(), config).await
    }

    /// Used to initialize a service with a pre-populated store.
    pub async fn from_store(store: RecordStore, config: Config) -> anyhow::Result<Self> {
        Self::from_source(Arc::new(store), config).await
    }

    /// Used to initialize a service with any read-only record source.
    pub async fn from_source<S>(source: Arc<S>, config: Config) -> anyhow::Result<Self>
    where
        S: RecordSource + 'static,
    {
        let source: SharedSource = source;
        tracing::debug!("Serving {} records", source.records().len());

        let (shutdown, stop_rx) = oneshot::channel();
        let (bound_address, handle) =
            api_service::start_server(config, build_schema(), source, stop_rx)?;

        Ok(Self {
            handle,
            shutdown,
            bound_address,
        })
    }

    /// Waits for the server task to finish, which happens only on a stop
    /// signal or a server failure.
    ///
    /// Don't call [`Self::send_stop_signal_and_await_shutdown`] after this
    /// method returned, the task is already gone.
    pub async fn await_stop(&mut self) -> anyhow::Result<()> {
        Self::wait_for_handle(&mut self.handle).await
    }

    /// Sends the stop signal and waits until the server has shut down.
    pub async fn send_stop_signal_and_await_shutdown(self) -> anyhow::Result<()> {
        let Self {
            mut handle,
            shutdown,
            ..
        } = self;
        let _ = shutdown.send(());
        Self::wait_for_handle(&mut handle).await
    }

    async fn wait_for_handle(
        handle: &mut JoinHandle<anyhow::Result<()>>,
    ) -> anyhow::Result<()> {
        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => {
                // Resume the panic on the main task
                panic::resume_unwind(err.into_panic());
            }
            Err(err) => Err(err.into()),
        }
    }
}
