//! Host channel abstraction.
//!
//! The driver never talks to the host's storage directly. Everything goes
//! through a [`HostChannel`], which hides the connection, the framing and the
//! request/reply correlation.

use crate::error::IpcResult;
use crate::protocol::{Command, Reply};
use async_trait::async_trait;
use tudor_types::Value;

/// A channel to the privileged host process.
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Returns whether the host process is still running.
    fn is_alive(&self) -> bool;

    /// Calls a host method and waits for its return value.
    ///
    /// No client-side timeout is applied; failures are expected to come from
    /// the transport noticing the host is gone. The arguments stay owned by
    /// the caller, which may hold secrets in them and wipe them afterwards.
    async fn call(&self, method: &str, args: &Value) -> IpcResult<Value>;

    /// Sends a command and waits for the single reply answering it.
    async fn send_and_await_ack(&self, command: Command) -> IpcResult<Reply>;
}

/// An in-memory host for testing.
pub mod mock {
    use super::*;
    use crate::error::IpcError;
    use crate::protocol::{
        LOAD_PAIRING_DATA_ARGS, LOAD_PAIRING_DATA_METHOD, STORE_PAIRING_DATA_ARGS,
        STORE_PAIRING_DATA_METHOD,
    };
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use tracing::trace;
    use tudor_types::Record;

    #[derive(Debug)]
    struct MockState {
        alive: bool,
        pairing: HashMap<String, Vec<u8>>,
        records: Vec<Record>,
        sent: Vec<Command>,
        calls: Vec<(String, Value)>,
        fail_next: Option<IpcError>,
        die_on_next_command: bool,
        next_reply: Option<Reply>,
        next_call_reply: Option<Value>,
    }

    /// A host double keeping pairing data and records in memory.
    ///
    /// Failures can be scripted one request at a time.
    #[derive(Debug)]
    pub struct MockHost {
        state: Mutex<MockState>,
    }

    impl MockHost {
        /// Creates a live host with no records and no pairing data.
        pub fn new() -> Self {
            Self {
                state: Mutex::new(MockState {
                    alive: true,
                    pairing: HashMap::new(),
                    records: Vec::new(),
                    sent: Vec::new(),
                    calls: Vec::new(),
                    fail_next: None,
                    die_on_next_command: false,
                    next_reply: None,
                    next_call_reply: None,
                }),
            }
        }

        /// Seeds the host's record store.
        pub fn with_records(self, records: Vec<Record>) -> Self {
            self.state().records = records;
            self
        }

        /// Seeds pairing data for a sensor.
        pub fn with_pairing_data(self, sensor: impl Into<String>, data: Vec<u8>) -> Self {
            self.state().pairing.insert(sensor.into(), data);
            self
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Marks the host process dead.
        pub fn kill(&self) {
            self.state().alive = false;
        }

        /// Makes the next request (call or command) fail with `error`.
        pub fn fail_next(&self, error: IpcError) {
            self.state().fail_next = Some(error);
        }

        /// Makes the host die after receiving the next command, before
        /// replying to it.
        pub fn die_on_next_command(&self) {
            self.state().die_on_next_command = true;
        }

        /// Answers the next command with `reply` instead of carrying it out.
        pub fn reply_next_with(&self, reply: Reply) {
            self.state().next_reply = Some(reply);
        }

        /// Answers the next method call with `value`.
        pub fn reply_next_call_with(&self, value: Value) {
            self.state().next_call_reply = Some(value);
        }

        /// Commands that reached the host, in order.
        pub fn sent_commands(&self) -> Vec<Command> {
            self.state().sent.clone()
        }

        /// Method names that reached the host, in order.
        pub fn called_methods(&self) -> Vec<String> {
            self.state().calls.iter().map(|(m, _)| m.clone()).collect()
        }

        /// Arguments of the last method call.
        pub fn last_call_args(&self) -> Option<Value> {
            self.state().calls.last().map(|(_, args)| args.clone())
        }

        /// The host's record store.
        pub fn records(&self) -> Vec<Record> {
            self.state().records.clone()
        }

        /// The pairing data stored for a sensor.
        pub fn pairing_data(&self, sensor: &str) -> Option<Vec<u8>> {
            self.state().pairing.get(sensor).cloned()
        }
    }

    impl Default for MockHost {
        fn default() -> Self {
            Self::new()
        }
    }

    fn invalid_args(method: &str, args: &Value) -> IpcError {
        IpcError::MethodFailed {
            method: method.to_string(),
            message: format!("invalid arguments {}", args.signature()),
        }
    }

    #[async_trait]
    impl HostChannel for MockHost {
        fn is_alive(&self) -> bool {
            self.state().alive
        }

        async fn call(&self, method: &str, args: &Value) -> IpcResult<Value> {
            let mut state = self.state();
            if !state.alive {
                return Err(IpcError::HostDied);
            }
            if let Some(err) = state.fail_next.take() {
                return Err(err);
            }
            trace!("Mock host call {} {}", method, args.signature());
            state.calls.push((method.to_string(), args.clone()));
            if let Some(value) = state.next_call_reply.take() {
                return Ok(value);
            }

            match method {
                LOAD_PAIRING_DATA_METHOD => {
                    if !args.is_of_type(LOAD_PAIRING_DATA_ARGS) {
                        return Err(invalid_args(method, args));
                    }
                    let sensor = args
                        .as_tuple()
                        .and_then(|fields| fields.first())
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let (has_data, payload) = match state.pairing.get(sensor) {
                        Some(data) => (true, data.clone()),
                        None => (false, Vec::new()),
                    };
                    Ok(Value::Tuple(vec![Value::Bool(has_data), Value::Bytes(payload)]))
                }
                STORE_PAIRING_DATA_METHOD => {
                    let fields = args
                        .as_tuple()
                        .filter(|_| args.is_of_type(STORE_PAIRING_DATA_ARGS));
                    let Some([sensor, payload]) = fields else {
                        return Err(invalid_args(method, args));
                    };
                    let (Some(sensor), Some(payload)) = (sensor.as_str(), payload.as_bytes())
                    else {
                        return Err(invalid_args(method, args));
                    };
                    state.pairing.insert(sensor.to_string(), payload.to_vec());
                    Ok(Value::Tuple(Vec::new()))
                }
                other => Err(IpcError::MethodFailed {
                    method: other.to_string(),
                    message: "unknown method".into(),
                }),
            }
        }

        async fn send_and_await_ack(&self, command: Command) -> IpcResult<Reply> {
            let mut state = self.state();
            if !state.alive {
                return Err(IpcError::HostDied);
            }
            trace!("Mock host command {}", command.name());
            state.sent.push(command.clone());

            if state.die_on_next_command {
                state.die_on_next_command = false;
                state.alive = false;
                return Err(IpcError::HostDied);
            }
            if let Some(err) = state.fail_next.take() {
                return Err(err);
            }
            if let Some(reply) = state.next_reply.take() {
                return Ok(reply);
            }

            match command {
                Command::DeleteRecord { guid, finger } => {
                    let target = Record::new(guid, finger);
                    if let Some(pos) = state.records.iter().position(|r| *r == target) {
                        state.records.remove(pos);
                    }
                    Ok(Reply::Ack)
                }
                Command::ClearRecords => {
                    state.records.clear();
                    Ok(Reply::Ack)
                }
                Command::ListRecords => Ok(Reply::Records {
                    records: state.records.clone(),
                }),
            }
        }
    }
}
