//! # Message Dispatcher
//!
//! Turns every inbound message into exactly one reply on the same connection:
//!
//! ```text
//! {"type":"chat","text":T}   -> {"ok":true,"echo":T}
//! any other JSON object      -> {"ok":false,"error":"unknown type"}
//! anything else              -> {"ok":false,"error":"bad json"}
//! ```
//!
//! The dispatcher keeps no per-connection state, so one instance is shared by
//! every connection the gateway hosts.

use anyhow::Result;
use log::{debug, info};

use crate::common::messages::{Reply, Request};
use crate::gateway::connection::Connection;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Emit an INFO record with the text of each chat message
    log_chat: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Dispatcher {
    pub fn new(log_chat: bool) -> Self {
        Self { log_chat }
    }

    /// Compute the reply for one raw message. Never fails.
    pub fn respond(&self, raw: &[u8]) -> Reply {
        let decoded = Request::decode(raw);
        match &decoded {
            Ok(Request::Chat { text }) => {
                if self.log_chat {
                    match text {
                        Some(text) => info!("💬 [CHAT] {}", text),
                        None => info!("💬 [CHAT] <no text>"),
                    }
                }
            }
            Err(e) => debug!("⚠️ Rejected message ({} bytes): {}", raw.len(), e),
        }
        Reply::from(decoded)
    }

    /// Handle one message: compute its reply and send it on `conn`.
    ///
    /// The only error is a transport failure while sending.
    pub async fn handle<C: Connection>(&self, conn: &mut C, raw: &[u8]) -> Result<()> {
        let reply = self.respond(raw);
        conn.write_message(reply.to_text()?).await
    }
}

/// Run the request/response loop for one connection until the peer closes.
///
/// Messages are handled one at a time, so replies leave in the order their
/// requests arrived.
///
/// # Returns
/// - `Ok(n)`: the peer closed cleanly after `n` messages
/// - `Err`: transport failure on read or write
pub async fn serve_connection<C: Connection>(dispatcher: &Dispatcher, conn: &mut C) -> Result<u64> {
    let mut handled = 0;
    while let Some(raw) = conn.read_message().await? {
        dispatcher.handle(conn, &raw).await?;
        handled += 1;
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::VecDeque;

    /// In-memory connection: a queue of inbound frames and a log of sent replies.
    #[derive(Default)]
    struct MemoryConnection {
        inbound: VecDeque<Vec<u8>>,
        sent: Vec<String>,
        fail_writes: bool,
    }

    impl MemoryConnection {
        fn with_messages<I, M>(messages: I) -> Self
        where
            I: IntoIterator<Item = M>,
            M: Into<Vec<u8>>,
        {
            Self {
                inbound: messages.into_iter().map(Into::into).collect(),
                ..Default::default()
            }
        }

        fn sent_values(&self) -> Vec<Value> {
            self.sent
                .iter()
                .map(|s| serde_json::from_str(s).unwrap())
                .collect()
        }
    }

    impl Connection for MemoryConnection {
        async fn read_message(&mut self) -> Result<Option<Vec<u8>>> {
            Ok(self.inbound.pop_front())
        }

        async fn write_message(&mut self, text: String) -> Result<()> {
            if self.fail_writes {
                anyhow::bail!("peer went away");
            }
            self.sent.push(text);
            Ok(())
        }
    }

    #[test]
    fn respond_covers_every_outcome() {
        let dispatcher = Dispatcher::new(false);

        assert_eq!(
            dispatcher.respond(br#"{"type":"chat","text":"hello"}"#),
            Reply::echo(Some(json!("hello")))
        );
        assert_eq!(
            dispatcher.respond(br#"{"type":"ping"}"#).error.as_deref(),
            Some("unknown type")
        );
        assert_eq!(
            dispatcher.respond(b"not-json-at-all").error.as_deref(),
            Some("bad json")
        );
    }

    #[tokio::test]
    async fn handle_sends_exactly_one_reply() {
        let dispatcher = Dispatcher::default();
        let mut conn = MemoryConnection::default();

        dispatcher.handle(&mut conn, b"{}").await.unwrap();

        assert_eq!(conn.sent, vec![r#"{"ok":false,"error":"unknown type"}"#]);
    }

    #[tokio::test]
    async fn one_reply_per_message_in_arrival_order() {
        let dispatcher = Dispatcher::default();
        let mut conn = MemoryConnection::with_messages([
            r#"{"type":"chat","text":1}"#,
            "garbage",
            r#"{"type":"chat","text":2}"#,
            r#"{"type":"other"}"#,
            r#"{"type":"chat","text":3}"#,
        ]);

        let handled = serve_connection(&dispatcher, &mut conn).await.unwrap();

        assert_eq!(handled, 5);
        assert_eq!(
            conn.sent_values(),
            vec![
                json!({"ok": true, "echo": 1}),
                json!({"ok": false, "error": "bad json"}),
                json!({"ok": true, "echo": 2}),
                json!({"ok": false, "error": "unknown type"}),
                json!({"ok": true, "echo": 3}),
            ]
        );
    }

    #[tokio::test]
    async fn empty_connection_sends_nothing() {
        let dispatcher = Dispatcher::default();
        let mut conn = MemoryConnection::default();

        assert_eq!(serve_connection(&dispatcher, &mut conn).await.unwrap(), 0);
        assert!(conn.sent.is_empty());
    }

    #[tokio::test]
    async fn write_failure_ends_the_loop() {
        let dispatcher = Dispatcher::default();
        let mut conn = MemoryConnection::with_messages(["{}", "{}"]);
        conn.fail_writes = true;

        assert!(serve_connection(&dispatcher, &mut conn).await.is_err());
        // The second message is never consumed
        assert_eq!(conn.inbound.len(), 1);
    }

    #[tokio::test]
    async fn connections_do_not_influence_each_other() {
        let dispatcher = Dispatcher::default();
        let mut a = MemoryConnection::with_messages(["broken{", r#"{"type":"chat","text":"a"}"#]);
        let mut b = MemoryConnection::with_messages([r#"{"type":"chat","text":"b"}"#]);

        serve_connection(&dispatcher, &mut a).await.unwrap();
        serve_connection(&dispatcher, &mut b).await.unwrap();

        assert_eq!(
            a.sent_values(),
            vec![
                json!({"ok": false, "error": "bad json"}),
                json!({"ok": true, "echo": "a"})
            ]
        );
        assert_eq!(b.sent_values(), vec![json!({"ok": true, "echo": "b"})]);
    }
}
