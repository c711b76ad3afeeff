use crate::adapters::storage::LocalStorage;
use crate::config::cli::{BookArgs, CliConfig, Command, DraftAction, ExportArgs, QuoteArgs};
use crate::config::load_tariff;
use crate::core::booking::{confirm, first_incomplete_step};
use crate::core::draft::DraftStore;
use crate::core::export::export_fares;
use crate::core::fare::FareCalculator;
use crate::domain::model::{Booking, FareRequest, PriceCalculation};
use crate::domain::tariff::Tariff;
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Runs one CLI command and returns what should be printed on stdout.
pub async fn run(config: &CliConfig) -> Result<String> {
    let tariff = load_tariff(config.tariff.as_ref())?;
    let now = Local::now().naive_local();

    match &config.command {
        Command::Quote(args) => quote(&tariff, args),
        Command::Zones { search } => Ok(list_zones(&tariff, search.as_deref())),
        Command::Vehicles => Ok(list_vehicles(&tariff)),
        Command::Export(args) => export(&tariff, args).await,
        Command::Draft { action } => draft(&tariff, action, now).await,
        Command::Book(args) => book(&tariff, args, now).await,
    }
}

fn quote(tariff: &Tariff, args: &QuoteArgs) -> Result<String> {
    let request = FareRequest::new(args.zone.clone(), args.vehicle, args.direction, args.passengers)
        .with_luggage(args.large, args.medium, args.small);
    let calculation = FareCalculator::new(tariff).calculate(&request)?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&calculation)?);
    }
    Ok(format_calculation(&calculation))
}

pub fn format_calculation(calculation: &PriceCalculation) -> String {
    let mut lines = vec![
        format!(
            "{} · {} · {}",
            calculation.destination, calculation.vehicle, calculation.direction
        ),
        format!("  Base:      {}", format_clp(calculation.base_price)),
    ];
    if calculation.airport_surcharge > 0 {
        lines.push(format!(
            "  Surcharge: {}",
            format_clp(calculation.airport_surcharge)
        ));
    }
    lines.push(format!("  Total:     {}", format_clp(calculation.total_price)));
    lines.join("\n")
}

/// `23000` -> `$23.000`, the Chilean peso convention.
pub fn format_clp(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

fn list_zones(tariff: &Tariff, search: Option<&str>) -> String {
    let zones = tariff.search_zones(search.unwrap_or(""));
    let mut lines: Vec<String> = zones
        .iter()
        .map(|zone| format!("{:<30} {:>10}", zone.name, format_clp(zone.base_price)))
        .collect();
    lines.push(format!(
        "{} zone(s) · airport surcharge {}",
        zones.len(),
        format_clp(tariff.airport_surcharge())
    ));
    lines.join("\n")
}

fn list_vehicles(tariff: &Tariff) -> String {
    let header = format!(
        "{:<6} {:>10} {:>6} {:>6} {:>6}",
        "type", "passengers", "large", "medium", "small"
    );
    let rows = tariff.vehicles().iter().map(|vehicle| {
        format!(
            "{:<6} {:>10} {:>6} {:>6} {:>6}",
            vehicle.kind.as_str(),
            vehicle.max_passengers,
            vehicle.large_luggage,
            vehicle.medium_luggage,
            vehicle.small_luggage
        )
    });
    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

async fn export(tariff: &Tariff, args: &ExportArgs) -> Result<String> {
    let rendered = export_fares(tariff, args.vehicle, args.format)?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, rendered.as_bytes()).await?;
            tracing::info!("fare table written to {}", path.display());
            Ok(format!("📁 Fare table saved to: {}", path.display()))
        }
        None => Ok(rendered.trim_end().to_string()),
    }
}

async fn draft(tariff: &Tariff, action: &DraftAction, now: NaiveDateTime) -> Result<String> {
    match action {
        DraftAction::Save(fields) => {
            let store = DraftStore::new(LocalStorage::new(&fields.store));
            let mut current = store.load().await?.unwrap_or_default();
            fields.apply_to(&mut current);
            let saved = store.save(&current, Utc::now()).await?;

            let status = match first_incomplete_step(&saved, tariff, now) {
                Some(step) => format!("next step: {}", step),
                None => "ready to book".to_string(),
            };
            Ok(format!("✅ Draft saved ({})", status))
        }
        DraftAction::Show { store } => {
            let store = DraftStore::new(LocalStorage::new(store));
            match store.load().await? {
                Some(draft) => Ok(serde_json::to_string_pretty(&draft)?),
                None => Ok("No draft stored".to_string()),
            }
        }
        DraftAction::Clear { store } => {
            DraftStore::new(LocalStorage::new(store)).clear().await?;
            Ok("🗑️  Draft cleared".to_string())
        }
    }
}

async fn book(tariff: &Tariff, args: &BookArgs, now: NaiveDateTime) -> Result<String> {
    let store = DraftStore::new(LocalStorage::new(&args.store));
    let draft = store.load().await?.unwrap_or_default();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let booking = confirm(&draft, tariff, now, &mut rng)?;

    if !args.keep_draft {
        store.clear().await?;
    }
    Ok(format_booking(&booking))
}

pub fn format_booking(booking: &Booking) -> String {
    let mut lines = vec![
        format!("✅ Booking {} confirmed", booking.reference),
        format!(
            "  {} {} · {} passenger(s)",
            booking.date, booking.time, booking.request.passengers
        ),
    ];
    if let Some(flight) = &booking.flight_number {
        lines.push(format!("  Flight: {}", flight));
    }
    lines.push(format!(
        "  Contact: {} <{}> {}",
        booking.contact.name, booking.contact.email, booking.contact.phone
    ));
    lines.push(format_calculation(&booking.price));
    lines.join("\n")
}
