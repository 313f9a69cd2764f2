//! Integration test common infrastructure.
//!
//! Builds an in-memory network around a real [`Matrix`] and [`Registry`]:
//! clients and peer links are plain `mpsc` queues, and lines are parsed and
//! dispatched exactly as a connection task would.

#![allow(dead_code)]

use relaymsg_proto::Message;
use relaymsgd::config::{Config, TestReport};
use relaymsgd::handlers::{Context, HandlerResult, Registry};
use relaymsgd::state::{Link, Matrix, RegisteredState, ServerState, User};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const SERVER_NAME: &str = "irc.test";

pub const BASE_CONFIG: &str = r#"
[server]
name = "irc.test"
sid = "001"
network = "TestNet"
"#;

/// Capabilities a relay-capable bridge negotiates.
pub const BRIDGE_CAPS: &[&str] = &["draft/relaymsg"];

/// A test server without sockets.
pub struct TestNetwork {
    pub matrix: Arc<Matrix>,
    pub registry: Registry,
}

/// A connected client and the queue of everything sent to it.
pub struct TestClient {
    pub uid: String,
    pub state: RegisteredState,
    pub sender: mpsc::Sender<Arc<Message>>,
    rx: mpsc::Receiver<Arc<Message>>,
}

/// A linked peer server and the queue of everything sent to it.
pub struct TestPeer {
    pub state: ServerState,
    pub sender: mpsc::Sender<Arc<Message>>,
    rx: mpsc::Receiver<Arc<Message>>,
}

impl TestNetwork {
    /// A server with the default relay policy.
    pub fn new() -> Self {
        let (network, report) = Self::with_relaymsg_block("");
        assert!(report.is_ok(), "base config has errors: {:?}", report);
        network
    }

    /// A server whose config has `block` appended verbatim.
    pub fn with_relaymsg_block(block: &str) -> (Self, TestReport) {
        let text = format!("{BASE_CONFIG}\n{block}");
        let config = Config::parse(&text, "test.toml").expect("test config parses");
        let (matrix, report) = Matrix::new(&config);
        let network = Self {
            matrix: Arc::new(matrix),
            registry: Registry::new(),
        };
        (network, report)
    }

    /// Register a local client with the given negotiated caps and privileges.
    pub fn connect(&self, nick: &str, caps: &[&str], privileges: &[&str]) -> TestClient {
        self.connect_with_capacity(nick, caps, privileges, 64)
    }

    pub fn connect_with_capacity(
        &self,
        nick: &str,
        caps: &[&str],
        privileges: &[&str],
        capacity: usize,
    ) -> TestClient {
        let (sender, rx) = mpsc::channel(capacity);
        let uid = self.matrix.user_manager.uid_gen.next();
        let caps: HashSet<String> = caps.iter().map(|c| c.to_string()).collect();

        let user = User {
            uid: uid.clone(),
            nick: nick.to_string(),
            user: nick.to_string(),
            host: "127.0.0.1".to_string(),
            caps: caps.clone(),
            privileges: privileges.iter().map(|p| p.to_string()).collect(),
        };
        self.matrix.user_manager.add_local_user(user, sender.clone());

        TestClient {
            uid,
            state: RegisteredState {
                nick: nick.to_string(),
                user: nick.to_string(),
                cap_version: 0,
                capabilities: caps,
            },
            sender,
            rx,
        }
    }

    /// Link a peer server.
    pub fn link(&self, sid: &str, name: &str) -> TestPeer {
        let (sender, rx) = mpsc::channel(64);
        self.matrix.link_manager.add(Link {
            sid: sid.to_string(),
            name: name.to_string(),
            sender: sender.clone(),
        });
        TestPeer {
            state: ServerState {
                sid: sid.to_string(),
                name: name.to_string(),
            },
            sender,
            rx,
        }
    }

    pub async fn join(&self, channel: &str, client: &TestClient) {
        self.matrix.channel_manager.join(channel, &client.uid).await;
    }

    /// Parse `line` and dispatch it as if `client` had sent it.
    pub async fn send(&self, client: &mut TestClient, line: &str) -> HandlerResult {
        let msg: Message = line.parse().expect("test line parses");
        let mut ctx = Context::new(&client.uid, &self.matrix, &client.sender, &mut client.state);
        self.registry.dispatch(&mut ctx, &msg).await
    }

    /// Parse `line` and dispatch it as if it arrived over `peer`'s link.
    pub async fn send_from_peer(&self, peer: &mut TestPeer, line: &str) -> HandlerResult {
        let msg: Message = line.parse().expect("test line parses");
        let sid = peer.state.sid.clone();
        let mut ctx = Context::new(&sid, &self.matrix, &peer.sender, &mut peer.state);
        self.registry.dispatch_server(&mut ctx, &msg).await
    }
}

fn drain(rx: &mut mpsc::Receiver<Arc<Message>>) -> Vec<Message> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push((*msg).clone());
    }
    out
}

impl TestClient {
    /// Everything queued for this client so far.
    pub fn drain(&mut self) -> Vec<Message> {
        drain(&mut self.rx)
    }

    /// Queued lines rendered to wire form.
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.drain().iter().map(ToString::to_string).collect()
    }
}

impl TestPeer {
    pub fn drain(&mut self) -> Vec<Message> {
        drain(&mut self.rx)
    }
}
