use anyhow::Result;
use ascii_sky::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    ascii_sky::init_tracing(cli.log_file.as_deref())?;
    if cli.one_shot {
        return ascii_sky::write_one_shot(&cli, &mut std::io::stdout().lock());
    }
    ascii_sky::run(cli).await
}
