use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shrimp_farm_client::push::{
    ConnectionState, JitterStrategy, PushConnection, PushEvent, PushListener, PushTransport,
    ReconnectPlan,
};
use shrimp_farm_client::types::MachinePowerState;
use shrimp_farm_client::{Error, MemorySessionStore, SessionCredential};
use tokio::sync::{broadcast, watch};

enum Script {
    Refuse,
    Serve(Vec<String>),
}

#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Script>>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

struct ScriptedConnection {
    frames: VecDeque<String>,
}

#[async_trait]
impl PushConnection for ScriptedConnection {
    async fn next_message(&mut self) -> Option<Result<String, Error>> {
        self.frames.pop_front().map(Ok)
    }
}

#[async_trait]
impl PushTransport for ScriptedTransport {
    async fn connect(
        &self,
        _url: &str,
        credential: Option<&SessionCredential>,
    ) -> Result<Box<dyn PushConnection>, Error> {
        self.tokens
            .lock()
            .unwrap()
            .push(credential.map(|c| c.token.clone()));
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Script::Serve(frames)) => Ok(Box::new(ScriptedConnection {
                frames: frames.into(),
            })),
            Some(Script::Refuse) | None => Err(Error::Config("connection refused".into())),
        }
    }
}

fn plan(max_attempts: u32, initial: Duration) -> ReconnectPlan {
    ReconnectPlan::new(
        max_attempts,
        initial,
        2.0,
        initial * 4,
        JitterStrategy::Full,
    )
    .unwrap()
}

fn drain(rx: &mut broadcast::Receiver<PushEvent>) -> Vec<PushEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn reconnects_dispatches_and_gives_up() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        Script::Refuse,
        Script::Refuse,
        Script::Serve(vec![
            r#"{"topic":"machine_status","payload":{"machineId":"aerator-1","status":"on"}}"#
                .to_string(),
            "not json".to_string(),
            r#"{"topic":"alarm","payload":{"pondId":"p1"}}"#.to_string(),
        ]),
    ]));
    let session = Arc::new(MemorySessionStore::with_credential(SessionCredential::new(
        "push-token",
        "farmer",
    )));
    let listener = PushListener::new(
        "wss://farm.example/push",
        transport.clone(),
        session,
        plan(3, Duration::from_millis(1)),
    )
    .with_seed(11);
    let mut rx = listener.subscribe();
    let (_tx, shutdown) = watch::channel(false);

    let result = listener.run(shutdown).await;
    assert!(matches!(result, Err(Error::PushExhausted(3))));

    let events = drain(&mut rx);
    let states = events
        .iter()
        .filter_map(|event| match event {
            PushEvent::Connection(ConnectionState::Reconnecting { attempt, .. }) => {
                Some(format!("reconnecting:{attempt}"))
            }
            PushEvent::Connection(state) => Some(format!("{:?}", state).to_lowercase()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        states,
        vec![
            "reconnecting:2",
            "reconnecting:3",
            "connected",
            "disconnected",
            "reconnecting:1",
            "reconnecting:2",
            "reconnecting:3",
            "gaveup",
        ]
    );

    let statuses = events
        .iter()
        .filter_map(|event| match event {
            PushEvent::MachineStatus(status) => Some(status.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].machine_id, "aerator-1");
    assert_eq!(statuses[0].status, MachinePowerState::On);
    assert!(events.iter().any(
        |event| matches!(event, PushEvent::Message { topic, .. } if topic == "alarm")
    ));

    let tokens = transport.tokens.lock().unwrap().clone();
    assert_eq!(tokens.len(), 6);
    assert!(tokens.iter().all(|t| t.as_deref() == Some("push-token")));
}

#[tokio::test]
async fn shutdown_interrupts_backoff() {
    let transport = Arc::new(ScriptedTransport::new(Vec::new()));
    let listener = PushListener::new(
        "wss://farm.example/push",
        transport,
        Arc::new(MemorySessionStore::new()),
        ReconnectPlan::new(
            5,
            Duration::from_secs(10),
            2.0,
            Duration::from_secs(40),
            JitterStrategy::Decorrelated,
        )
        .unwrap(),
    );
    let mut rx = listener.subscribe();
    let (tx, shutdown) = watch::channel(false);
    let handle = tokio::spawn(listener.run(shutdown));

    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("reconnect event")
        .expect("channel open");
    assert!(matches!(
        event,
        PushEvent::Connection(ConnectionState::Reconnecting { attempt: 2, .. })
    ));

    tx.send(true).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("listener should stop promptly")
        .expect("task joined");
    assert!(result.is_ok());
}
