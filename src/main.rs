use anyhow::Context;
use clap::Parser;
use properties_client::events::{dispatch, Command, Flow};
use properties_client::{ApiClient, ClientArgs, ClientConfig, PageController};
use properties_client::ui::TerminalView;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();

    // Initialize logging on stderr so the table on stdout stays readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from(&args);
    info!(endpoint = %config.endpoint(), page_size = config.page_size, sort = %config.sort, "Properties client");

    let api = ApiClient::with_config(&config).context("Failed to set up API client")?;
    let mut controller = PageController::with_config(api, TerminalView::stdio(), &config);

    controller.view_mut().print("Type `help` for commands.");
    controller.load_page(0).await;

    loop {
        controller.view_mut().prompt("> ");
        let line = match controller.view_mut().read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input, closing session");
                break;
            }
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(input = %line, "Unrecognized command");
                controller.view_mut().print(&e);
                continue;
            }
        };

        match dispatch(&mut controller, command).await {
            Flow::Continue => {}
            Flow::Message(text) => controller.view_mut().print(&text),
            Flow::Quit => break,
        }
    }

    info!("Bye");
    Ok(())
}
