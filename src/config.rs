use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Process-wide settings, resolved once at startup and never mutated.
#[derive(Parser, Clone)]
#[command(name = "banner-relay")]
#[command(about = "Turns banner briefs into design specs and publishes them as Figma frames")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "BANNER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Credential for the generative-text service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    #[arg(long, env = "FIGMA_API_BASE", default_value = "https://api.figma.com/v1")]
    pub figma_api_base: String,

    /// Base of the file viewer links handed back to callers
    #[arg(long, env = "FIGMA_WEB_BASE", default_value = "https://www.figma.com")]
    pub figma_web_base: String,

    /// The only font family banners may use
    #[arg(long, env = "BANNER_FONT_FAMILY", default_value = "Inter")]
    pub font_family: String,

    /// Directory holding the landing page
    #[arg(long, env = "BANNER_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Timeout applied to every outbound call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Defaults for everything except the credential. Useful when wiring the
    /// relay up programmatically (tests, embedding).
    pub fn with_api_key(gemini_api_key: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            gemini_api_key: gemini_api_key.into(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            figma_api_base: "https://api.figma.com/v1".to_string(),
            figma_web_base: "https://www.figma.com".to_string(),
            font_family: "Inter".to_string(),
            static_dir: PathBuf::from("static"),
            request_timeout_secs: 60,
        }
    }

    pub fn gemini_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.gemini_base_url.trim_end_matches('/'),
            self.gemini_model
        )
    }

    /// Host and port for the listener. The host may be a name such as
    /// `localhost`; resolution happens at bind time.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// The API key must never end up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("figma_api_base", &self.figma_api_base)
            .field("figma_web_base", &self.figma_web_base)
            .field("font_family", &self.font_family)
            .field("static_dir", &self.static_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
