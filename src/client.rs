use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::{
    adapter::HttpAdapter,
    api::Api,
    config::Config,
    errors::Error,
    gateway::{Descriptor, Gateway, GatewayOptions},
    payload,
    push::PushListener,
    push::PushTransport,
    session::{FileSessionStore, MemorySessionStore, SessionCredential, SessionStore},
    surface::{LogSurface, Navigator, Notifier, Severity},
    types::LoginResponse,
};

/// Wires the session store, adapter, gateway and endpoint builders together.
#[derive(Clone)]
pub struct FarmClient {
    config: Config,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    gateway: Gateway,
    api: Api,
}

impl FarmClient {
    /// Create a client with a file-backed session when `session_path` is set
    /// (in-memory otherwise) and a log-only notification surface.
    pub fn new(config: Config) -> Result<Self, Error> {
        let session: Arc<dyn SessionStore> = match &config.session_path {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(MemorySessionStore::new()),
        };
        let surface = Arc::new(LogSurface);
        Self::with_parts(config, session, surface.clone(), surface)
    }

    pub fn with_parts(
        config: Config,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let config = config.validated()?;
        let adapter = HttpAdapter::new(&config, Arc::clone(&session))?;
        let gateway = Gateway::new(
            Arc::clone(&session),
            Arc::clone(&notifier),
            Arc::clone(&navigator),
            GatewayOptions::from_config(&config),
        );
        Ok(Self {
            config,
            session,
            notifier,
            navigator,
            gateway,
            api: Api::new(adapter),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> Result<Option<SessionCredential>, Error> {
        self.session.load()
    }

    /// Runs one descriptor through the gateway and decodes its payload.
    pub async fn call<T: DeserializeOwned>(&self, descriptor: Descriptor) -> Result<T, Error> {
        let payload = self.gateway.single(descriptor).await?;
        payload::decode(payload)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionCredential, Error> {
        let resp: LoginResponse = self.call(self.api.login(username, password)).await?;
        let credential = SessionCredential::new(
            resp.token,
            resp.username.unwrap_or_else(|| username.to_string()),
        );
        self.session.save(&credential)?;
        info!(username = %credential.username, "session.created");
        self.notifier
            .notify(Severity::Success, &self.config.messages.login_success);
        Ok(credential)
    }

    pub fn logout(&self) -> Result<(), Error> {
        self.session.clear()?;
        info!("session.ended");
        self.navigator.navigate(&self.config.login_route);
        Ok(())
    }

    /// Builds a listener for the configured push endpoint.
    pub fn push_listener(&self, transport: Arc<dyn PushTransport>) -> Result<PushListener, Error> {
        let url = self
            .config
            .push_url
            .clone()
            .ok_or_else(|| Error::Config("No push_url configured".to_string()))?;
        let plan = self.config.reconnect.plan()?;
        Ok(PushListener::new(
            url,
            transport,
            Arc::clone(&self.session),
            plan,
        ))
    }
}
