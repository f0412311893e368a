pub mod network {
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_CONNECTION_MS: u64 = 5_000;
    pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
}

pub mod credentials {
    pub const CREDENTIAL_NAME: &str = "evolutionApi";
    pub const ENV_BASE_URL: &str = "EVOLUTION_API_BASE_URL";
    pub const ENV_API_KEY: &str = "EVOLUTION_API_KEY";
    pub const ENV_INSTANCE: &str = "EVOLUTION_API_INSTANCE";
    pub const ENV_CREDENTIALS_PATH: &str = "EVOLUTION_CREDENTIALS_PATH";
}

pub mod headers {
    pub const API_KEY: &str = "Apikey";
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

pub mod endpoints {
    pub const SEND_TEXT: &str = "/message/sendText";
    pub const SEND_MEDIA: &str = "/message/sendMedia";
    pub const SEND_AUDIO: &str = "/message/sendWhatsAppAudio";
    pub const CONNECTION_STATE: &str = "/instance/connectionState";
    pub const WHATSAPP_PROFILE: &str = "/chat/whatsappProfile";
}

pub mod media {
    pub const DEFAULT_DOCUMENT_FILENAME: &str = "document";
    pub const MIN_PHONE_DIGITS: usize = 10;
}

pub mod tool {
    pub const TOOL_NAME: &str = "evolution_api";
    pub const CREDENTIALS_TOOL_NAME: &str = "evolution_credentials";
    pub const ENV_DESCRIPTION: &str = "EVOLUTION_TOOL_DESCRIPTION";
    pub const ENV_TIMEOUT_MS: &str = "EVOLUTION_TIMEOUT_MS";
}
