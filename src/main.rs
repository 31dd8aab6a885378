//! Hello consumer.
//!
//! Calls the `provider` backend through a generated client instead of
//! hand-written HTTP code.
//!
//! ```text
//!   HelloController.say_hello(name)
//!       → HelloClient::hello (installed at startup)
//!       → ClientHandle::invoke("hello", [name])
//!       → GET {base}/provider/sayHello?name=...
//!       → "Hello: name!"
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use rest_client::config::{load_config, ClientConfig};
use rest_client::observability::{logging, metrics};
use rest_client::{
    Args, ClientFactory, ClientHandle, ClientResult, Injectable, InjectionSite, Installer,
    InterfaceDescriptor, MethodSpec, RemoteInterface,
};

#[derive(Parser)]
#[command(name = "hello-consumer")]
#[command(about = "Calls the hello provider through a declarative REST client", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend name to call.
    #[arg(short, long, default_value = "provider")]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Say hello to someone
    Hello { name: String },
    /// Fetch the greeting word for a language
    Greeting { lang: String },
    /// Round-trip a message through the provider
    Echo { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct EchoMessage {
    message: String,
}

/// Client for the provider's hello endpoints.
struct HelloClient(ClientHandle);

impl RemoteInterface for HelloClient {
    fn descriptor() -> InterfaceDescriptor {
        InterfaceDescriptor::builder("HelloApi")
            .method("hello", MethodSpec::new().get("/sayHello").query("name"))
            .method("greeting", MethodSpec::new().get("/greetings/{lang}").path_var("lang"))
            .method("echo", MethodSpec::new().post("/echo").body())
            .build()
    }

    fn from_handle(handle: ClientHandle) -> Self {
        Self(handle)
    }
}

impl HelloClient {
    async fn hello(&self, name: &str) -> ClientResult<String> {
        self.0.invoke("hello", Args::new().arg(name)?).await
    }

    async fn greeting(&self, lang: &str) -> ClientResult<String> {
        self.0.invoke("greeting", Args::new().arg(lang)?).await
    }

    async fn echo(&self, message: &EchoMessage) -> ClientResult<EchoMessage> {
        self.0.invoke("echo", Args::new().arg(message)?).await
    }
}

struct HelloController {
    backend: String,
    hello: Option<HelloClient>,
}

impl Injectable for HelloController {
    fn injection_sites(&mut self) -> Vec<InjectionSite<'_>> {
        vec![InjectionSite::single("hello", &mut self.hello).backends([self.backend.clone()])]
    }
}

impl HelloController {
    fn client(&self) -> Result<&HelloClient, Box<dyn std::error::Error>> {
        self.hello
            .as_ref()
            .ok_or_else(|| "hello client was not installed".into())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("hello-consumer v0.1.0 starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let factory = ClientFactory::from_config(&config)?;
    let installer = Installer::new(factory);

    let mut controller = HelloController {
        backend: cli.backend.clone(),
        hello: None,
    };
    let report = installer.install(&mut controller)?;
    tracing::info!(installed = report.installed(), skipped = report.skipped(), "Clients installed");

    let client = controller.client()?;
    match cli.command {
        Commands::Hello { name } => {
            println!("{}", client.hello(&name).await?);
        }
        Commands::Greeting { lang } => {
            println!("{}", client.greeting(&lang).await?);
        }
        Commands::Echo { message } => {
            let reply = client.echo(&EchoMessage { message }).await?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
    }

    Ok(())
}
