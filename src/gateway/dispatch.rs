use super::{resolve, Gateway};
use crate::conversation::GatewayRequest;
use crate::event::AppEvent;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;

/// Runs gateway calls on the tokio runtime and posts results to the UI loop.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn Gateway>,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn Gateway>, tx: mpsc::Sender<AppEvent>, runtime_handle: Handle) -> Self {
        Self {
            gateway,
            tx,
            runtime_handle,
        }
    }

    pub fn dispatch(&self, request: GatewayRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tracing::debug!(
            gateway = gateway.name(),
            ticket = request.ticket,
            history = request.messages.len(),
            "dispatching gateway request"
        );

        self.runtime_handle.spawn(async move {
            let outcome = resolve(gateway.as_ref(), request).await;
            if tx.send(AppEvent::GatewayResult(outcome)).is_err() {
                tracing::debug!("ui event channel closed before gateway result arrived");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::ScriptedGateway;
    use crate::conversation::{ConversationState, Message};
    use std::time::Duration;

    #[test]
    fn dispatch_delivers_outcome_over_channel() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime should build");
        let (tx, rx) = mpsc::channel();
        let gateway = Arc::new(ScriptedGateway::default().reply("Noted."));
        let dispatcher = Dispatcher::new(gateway, tx, runtime.handle().clone());

        let mut state = ConversationState::new();
        state.start();
        let request = state.submit("skills: writing").expect("should dispatch");
        dispatcher.dispatch(request);

        let AppEvent::GatewayResult(outcome) = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("outcome should arrive");
        assert!(state.on_gateway_result(outcome));
        assert_eq!(state.history()[2], Message::assistant("Noted."));
        assert!(!state.is_waiting());
    }
}
