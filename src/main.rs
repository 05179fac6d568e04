use clap::Parser;

#[derive(Parser)]
#[command(name = "molq", about = "molq — terminal PubChem compound search")]
struct Cli {
    /// Write debug logs to /tmp/molq-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Override the PUG REST base URL from the config file.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/molq-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("molq debug log started — tail -f /tmp/molq-debug.log");
    }

    molq_tui::run(cli.base_url)
}
