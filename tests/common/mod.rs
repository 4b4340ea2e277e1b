#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use shrimp_farm_client::{
    Config, FarmClient, MemorySessionStore, Navigator, Notifier, SessionCredential, Severity,
};
use wiremock::MockServer;

#[derive(Default)]
pub struct RecordingSurface {
    pub notifications: Mutex<Vec<(Severity, String)>>,
    pub routes: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn notifications(&self) -> Vec<(Severity, String)> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingSurface {
    fn notify(&self, severity: Severity, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

impl Navigator for RecordingSurface {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub struct TestClient {
    pub client: FarmClient,
    pub session: Arc<MemorySessionStore>,
    pub surface: Arc<RecordingSurface>,
}

pub fn client(server: &MockServer, credential: Option<SessionCredential>) -> TestClient {
    let session = Arc::new(match credential {
        Some(credential) => MemorySessionStore::with_credential(credential),
        None => MemorySessionStore::new(),
    });
    let surface = Arc::new(RecordingSurface::default());
    let mut config = Config::new(server.uri());
    config.login_route = "/login".to_string();
    let client = FarmClient::with_parts(config, session.clone(), surface.clone(), surface.clone())
        .expect("client config is valid");
    TestClient {
        client,
        session,
        surface,
    }
}

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}
