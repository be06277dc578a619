//! Line-oriented TCP relay server.
//!
//! Receives text and `IMAGE:<name>:<base64>` lines from clients and broadcasts
//! them to every connected client. Lines typed on stdin are broadcast as
//! administrator messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 9000 --upload-dir /tmp/uploads
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UPLOAD_DIR, ServerConfig},
    infrastructure::{ConnectionRegistry, FileSystemImageStore},
    ui::{Server, state::AppState},
    usecase::{
        BroadcastMessageUseCase, ConnectClientUseCase, DisconnectClientUseCase, ShareImageUseCase,
    },
};
use hiroba_shared::logger::setup_logger;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "TCP relay server broadcasting text and images to every client", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory where uploaded images are stored
    #[arg(short = 'u', long, default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    /// Do not read administrator messages from stdin
    #[arg(long)]
    no_admin_input: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            upload_dir: args.upload_dir,
            admin_input: !args.no_admin_input,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Registry
    // 2. ImageStore
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Create Registry (live connections)
    let registry = Arc::new(ConnectionRegistry::new());

    // 2. Create ImageStore (filesystem implementation)
    let image_store = Arc::new(FileSystemImageStore::new(&config.upload_dir));
    tracing::info!("Uploaded images are stored in {}", config.upload_dir.display());

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(registry.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(registry.clone()));
    let broadcast_message_usecase = Arc::new(BroadcastMessageUseCase::new(registry.clone()));
    let share_image_usecase = Arc::new(ShareImageUseCase::new(registry.clone(), image_store));

    // 4. Create AppState
    let app_state = Arc::new(AppState {
        connect_client_usecase,
        disconnect_client_usecase,
        broadcast_message_usecase,
        share_image_usecase,
    });

    // 5. Create and run the server
    let mut server = Server::new(app_state, registry);
    if config.admin_input {
        server = server.with_admin_input(BufReader::new(tokio::io::stdin()));
    }
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    // A blocking stdin read cannot be cancelled and would keep the runtime alive.
    std::process::exit(0);
}
