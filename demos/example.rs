use shrimp_farm_client::types::Pond;
use shrimp_farm_client::{Config, FarmClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the example
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Load configuration from a JSON file placed next to the binary
    let cfg = Config::from_file("config.json")?;
    let client = FarmClient::new(cfg)?;

    client.login("farmer", "secret").await?;
    let ponds: Vec<Pond> = client.call(client.api().list_ponds()).await?;
    if !ponds.is_empty() {
        let api = client.api();
        let panels = client
            .gateway()
            .batch(
                ponds
                    .iter()
                    .map(|pond| api.feeding_schedules(&pond.id))
                    .collect(),
            )
            .await?;
        println!("{} ponds, {} feeding panels", ponds.len(), panels.len());
    }
    client.logout()?;
    Ok(())
}
