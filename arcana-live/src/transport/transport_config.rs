use arcana_core::IceServerConfig;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
    /// Adds a receive-only video transceiver so the avatar can stream back.
    pub receive_video: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::default()],
            receive_video: true,
        }
    }
}

impl TransportConfig {
    pub fn with_ice_servers(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            ice_servers,
            ..Default::default()
        }
    }
}
