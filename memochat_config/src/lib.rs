mod schema;

pub use schema::{
    API_KEY_ENV, AgentDefaults, AgentsConfig, AudioConfig, Config, ImageConfig, ProviderConfig,
    ProvidersConfig,
};
