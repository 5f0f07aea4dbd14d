use azure_nsg_report::config::Config;
use azure_nsg_report::output::XlsxWorkbook;
use azure_nsg_report::{generate_report, get_registry};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Keep main.rs thin, everything testable lives in the lib
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = Config::from_env();
    log::info!("{config:?}");

    let registry = get_registry(&config)?;
    let mut workbook = XlsxWorkbook::new();
    let rows = generate_report(&registry, &mut workbook, &config)?;

    log::info!("#End main() {rows} rows written to {}", config.report_file);
    Ok(())
}
