//! native-prover binary entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::Result;
use native_prover::cli::{Cli, Command, L1ProveArgs, ProveArgs};
use native_prover::config::{ProveConfig, ProveL1Config, ProveParams};
use native_prover::l1_prover::L1Prover;
use native_prover::prover::Prover;
use native_prover::rpc::HttpChainClient;
use native_prover::DEFAULT_RPC_TIMEOUT_SECS;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON support when RUST_LOG_FORMAT=json
    let json_format = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_format {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    let calldata = match cli.command {
        Command::Prove(args) => {
            let prover = build_prover(&args, cancel).await?;
            prover.generate_prove_calldata(&ProveParams::from(&args)).await?
        }
        Command::UpdateAndProve(args) => {
            let prover = build_prover(&args, cancel).await?;
            prover
                .generate_update_and_prove_calldata(&ProveParams::from(&args))
                .await?
        }
        Command::ConfigureAndProve(args) => {
            let prover = build_prover(&args, cancel).await?;
            prover
                .generate_configure_and_prove_calldata(&ProveParams::from(&args))
                .await?
        }
        Command::ProveL1(args) => {
            let prover = build_l1_prover(&args, cancel).await?;
            prover.generate_prove_l1_calldata(&ProveParams::from(&args)).await?
        }
    };

    println!("{calldata}");
    Ok(())
}

async fn build_prover(
    args: &ProveArgs,
    cancel: CancellationToken,
) -> Result<Prover<HttpChainClient>> {
    info!(
        src_chain_id = args.src_chain_id,
        dst_chain_id = args.dst_chain_id,
        contract = %args.contract_address,
        slot = %args.storage_slot,
        "Generating proof calldata"
    );

    let timeout = Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS);
    let l1_client = Arc::new(HttpChainClient::new(args.l1_rpc_url.clone(), timeout)?);
    let src_client = Arc::new(HttpChainClient::new(args.src_rpc_url.clone(), timeout)?);
    let dst_client = Arc::new(HttpChainClient::new(args.dst_rpc_url.clone(), timeout)?);

    Ok(Prover::new(
        l1_client,
        src_client,
        dst_client,
        &ProveConfig::from(args),
        cancel,
    )
    .await?)
}

async fn build_l1_prover(
    args: &L1ProveArgs,
    cancel: CancellationToken,
) -> Result<L1Prover<HttpChainClient>> {
    info!(
        dst_chain_id = args.dst_chain_id,
        contract = %args.contract_address,
        slot = %args.storage_slot,
        "Generating L1 proof calldata"
    );

    let timeout = Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS);
    let l1_client = Arc::new(HttpChainClient::new(args.l1_rpc_url.clone(), timeout)?);
    let dst_client = Arc::new(HttpChainClient::new(args.dst_rpc_url.clone(), timeout)?);

    Ok(L1Prover::new(l1_client, dst_client, &ProveL1Config::from(args), cancel).await?)
}

/// Installs SIGTERM + SIGINT handlers that cancel the given token.
fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    result.expect("failed to listen for SIGINT");
                    info!("Received SIGINT");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.expect("failed to listen for SIGINT");
            info!("Received SIGINT");
        }

        cancel.cancel();
    });
}
