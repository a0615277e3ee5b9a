use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_testing::relay::{self, FakeRelay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Relay {
            host,
            port,
            service_id,
            template_id,
            public_key,
            form_id,
        } => {
            let fake = FakeRelay::new(service_id, template_id, public_key, form_id);
            relay::start_server(host, port, fake).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the fake email relay server
    Relay {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8003")]
        port: u16,
        #[arg(long, default_value = "service_kurh8nq")]
        service_id: String,
        #[arg(long, default_value = "template_cahfwdg")]
        template_id: String,
        #[arg(long, default_value = "your_public_key")]
        public_key: String,
        #[arg(long, default_value = "your_form_id")]
        form_id: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
