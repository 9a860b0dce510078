use std::{net::SocketAddr, path::PathBuf, process::ExitCode};

use clap::Parser;
use plain_http_server::{Config, HttpServer, config::DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(version, about = "A small HTTP/1.1 server")]
struct Args {
    /// Directory served and written by `/files/<name>`
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value_t = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))]
    addr: SocketAddr,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            addr: args.addr,
            directory: args.directory,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());
    let server = match HttpServer::from_config(&config) {
        Ok(server) => server,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = server.serve().await {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
