// desk-client/examples/intake_demo.rs
// Walk the intake cascade against a running API
//
// DESK_API_URL=http://localhost:5000/api cargo run --example intake_demo -- all 10

use desk_client::{ClientConfig, IntakeSession, ZoneSelection};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desk_client=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <zone-id|all> [customer-id]", args[0]);
        return Ok(());
    }

    let zone = if args[1] == "all" {
        ZoneSelection::All
    } else {
        ZoneSelection::Zone(args[1].parse()?)
    };
    let customer_id: Option<i64> = args.get(2).map(|s| s.parse()).transpose()?;

    let config = ClientConfig::from_env()?;
    let http = config.build_http_client()?;
    let (session, mut notices) = IntakeSession::new(http, config);

    // Failures are also reported as notices, printed below
    let _ = session.mount().await;
    let _ = session.select_zone(Some(zone)).await;
    if customer_id.is_some() {
        session.select_customer(customer_id).await?;
    }

    let state = session.snapshot().await;
    println!("Zones:");
    for z in state.zones() {
        println!("  {:>4}  {}", z.id, z.name);
    }
    println!("Customers ({}):", zone);
    for c in state.customers() {
        println!("  {:>4}  {} (zone {})", c.id, c.company_name, c.service_zone_id);
    }
    if let Some(customer) = state.selected_customer() {
        println!("Contacts of {}:", customer.company_name);
        for contact in state.contacts() {
            let marker = if state.draft().contact_id == Some(contact.id) { "*" } else { " " };
            println!(" {}{:>4}  {}", marker, contact.id, contact.name);
        }
        println!("Assets of {}:", customer.company_name);
        for asset in state.assets() {
            let marker = if state.draft().asset_id == Some(asset.id) { "*" } else { " " };
            println!(" {}{:>4}  {}", marker, asset.id, asset.label());
        }
    }

    while let Ok(notice) = notices.try_recv() {
        println!("[{:?}] {}", notice.level, notice.message);
    }

    Ok(())
}
