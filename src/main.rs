use brainstrata_router::config::{
    DEFAULT_API_BASE, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, RouterConfig,
};
use brainstrata_router::server;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "brainstrata-router")]
#[command(
    about = "BrainStrata task router - classifies learner prompts and dispatches them to content, math or image generation"
)]
struct CliArgs {
    /// Host address to bind the server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the OpenAI-compatible provider
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// API key for the provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model used for content and math tasks
    #[arg(long, default_value = DEFAULT_CHAT_MODEL)]
    chat_model: String,

    /// Model used for image tasks
    #[arg(long, default_value = DEFAULT_IMAGE_MODEL)]
    image_model: String,

    /// Timeout in seconds for one provider call
    #[arg(long, default_value_t = 120)]
    request_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    max_payload_size: usize,

    /// Log level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,
}

impl CliArgs {
    fn to_router_config(&self) -> RouterConfig {
        RouterConfig {
            host: self.host.clone(),
            port: self.port,
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            chat_model: self.chat_model.clone(),
            image_model: self.image_model.clone(),
            request_timeout_secs: self.request_timeout_secs,
            max_payload_size: self.max_payload_size,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli_args = CliArgs::parse();
    let config = cli_args.to_router_config();
    actix_web::rt::System::new().block_on(server::startup(config))
}
