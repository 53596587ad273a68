//! Single strategy generation from the terminal

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Case description to analyze
    #[arg(long, short = 'd')]
    pub description: String,
}

pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = super::load_config();
    let service = crate::create_strategy_service(&config.ai);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let result = service.generate_strategy(&args.description, &cancel).await?;

    info!(
        provider = %result.provider_name,
        is_from_fallback = result.is_from_fallback,
        elapsed_ms = result.elapsed_ms(),
        "Strategy generated"
    );

    println!("{}", result.content);
    eprintln!(
        "\n-- provider: {} | fallback: {} | {} ms",
        result.provider_name,
        result.is_from_fallback,
        result.elapsed_ms()
    );

    Ok(())
}
