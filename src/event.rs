use crate::conversation::GatewayOutcome;

#[derive(Debug)]
pub enum AppEvent {
    GatewayResult(GatewayOutcome),
}
