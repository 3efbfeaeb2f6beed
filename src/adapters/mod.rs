// Adapters layer: concrete renderers for the orchestrator ports.

pub mod terminal;
