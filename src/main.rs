use std::io;
use log::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use usps_address_validator::form::{run_terminal, Form};
use usps_address_validator::{Credentials, SmartyClient};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    install_tracing();
    color_eyre::install()?;

    let credentials = Credentials::from_env().unwrap_or_default();
    if !credentials.auth_id.is_empty() {
        info!("using credentials [{}] from `CREDENTIALS`", credentials.auth_id);
    }

    let client = SmartyClient::new()?;
    let mut form = Form::new(credentials);
    run_terminal(io::stdin().lock(), io::stdout(), &client, &mut form).await?;
    Ok(())
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(ErrorLayer::default())
        .init();
}
