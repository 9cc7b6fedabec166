use log::error;
use service_page_builder::{
    generate_service_content, load_service_menu, AppConfig, HttpServicesApi, ServicesApi, SlotKey,
    WidgetHost,
};
use std::env;

const USAGE: &str = "Usage:
  service-page-builder providers
  service-page-builder generate <service-id> [slot,slot,...]
  service-page-builder menu [website-id]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;
    let config = AppConfig::load()?;

    match command.as_str() {
        "providers" => {
            let api = HttpServicesApi::new(&config)?;
            for provider in api.llm_status().await? {
                let marker = if provider.enabled { "*" } else { " " };
                println!("{} {:<12} {}", marker, provider.key, provider.name);
            }
        }
        "generate" => {
            let service_id = args.get(2).ok_or(USAGE)?;
            let slots = match args.get(3) {
                Some(list) => list
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|slot| slot.parse::<SlotKey>())
                    .collect::<Result<Vec<SlotKey>, _>>()?,
                None => Vec::new(),
            };

            let bundle = generate_service_content(&config, service_id, &slots).await?;
            for (slot, message) in bundle.failures() {
                error!("{} failed: {}", slot, message);
            }
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        "menu" => {
            let host = match args.get(2) {
                Some(website_id) => WidgetHost::default().with_global_website_id(website_id),
                None => WidgetHost::default(),
            };
            println!("{}", load_service_menu(&config, host).await?);
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
