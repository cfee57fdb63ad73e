/// Kind of application a discovery record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationType {
    Server,
    Client,
    ClientAndServer,
    DiscoveryServer,
}

impl ApplicationType {
    /// Stable textual name surfaced inside discovery replies.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Server => "server",
            ApplicationType::Client => "client",
            ApplicationType::ClientAndServer => "client_and_server",
            ApplicationType::DiscoveryServer => "discovery_server",
        }
    }
}

/// Message security applied on a session channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSecurityMode {
    Invalid,
    None,
    Sign,
    SignAndEncrypt,
}

impl MessageSecurityMode {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageSecurityMode::Invalid => "invalid",
            MessageSecurityMode::None => "none",
            MessageSecurityMode::Sign => "sign",
            MessageSecurityMode::SignAndEncrypt => "sign_and_encrypt",
        }
    }
}

/// Timeouts governing a client-side connection, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: u32,
    pub secure_channel_lifetime: u32,
    pub requested_session_timeout: u32,
}

/// One entry of a find-servers-on-network answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOnNetwork {
    pub record_id: u32,
    pub server_name: String,
    pub discovery_url: String,
    pub capabilities: Vec<String>,
}

/// One entry of a find-servers answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDescription {
    pub application_uri: String,
    pub product_uri: String,
    /// Human-readable application name (the text member only; the locale is
    /// not surfaced).
    pub name: String,
    pub application_type: ApplicationType,
    pub discovery_urls: Vec<String>,
}

/// One entry of a get-endpoints answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescription {
    pub endpoint_url: String,
    pub transport_profile_uri: String,
    pub security_mode: MessageSecurityMode,
    pub security_policy_uri: String,
    pub security_level: u8,
}

/// Server-side runtime configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub n_threads: u32,
    /// Custom hostname; an empty string reads back as `localhost`.
    pub hostname: String,
    pub endpoints: Vec<EndpointDescription>,
    pub application_description: ApplicationDescription,
}
