use crate::core::export::ExportFormat;
use crate::domain::model::{BookingDraft, Direction, VehicleKind};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "transfer-fares")]
#[command(about = "Airport transfer fares, quotes and booking drafts")]
pub struct CliConfig {
    /// TOML tariff file; the built-in tariff is used when omitted
    #[arg(long, global = true)]
    pub tariff: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price a single trip
    Quote(QuoteArgs),
    /// List zones and their base prices
    Zones {
        #[arg(long)]
        search: Option<String>,
    },
    /// List vehicle types and their capacity
    Vehicles,
    /// Export the fare table for one vehicle type
    Export(ExportArgs),
    /// Manage the stored booking draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Confirm the stored draft and issue a booking
    Book(BookArgs),
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[arg(long)]
    pub zone: String,

    #[arg(long, default_value = "taxi")]
    pub vehicle: VehicleKind,

    #[arg(long, default_value = "to-airport")]
    pub direction: Direction,

    #[arg(long, default_value = "1")]
    pub passengers: u32,

    #[arg(long, default_value = "0")]
    pub large: u32,

    #[arg(long, default_value = "0")]
    pub medium: u32,

    #[arg(long, default_value = "0")]
    pub small: u32,

    #[arg(long, help = "Print the calculation as JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[arg(long, default_value = "taxi")]
    pub vehicle: VehicleKind,

    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DraftAction {
    /// Merge the given fields into the stored draft
    Save(DraftFields),
    Show {
        #[arg(long, default_value = "./drafts")]
        store: PathBuf,
    },
    Clear {
        #[arg(long, default_value = "./drafts")]
        store: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DraftFields {
    #[arg(long, default_value = "./drafts")]
    pub store: PathBuf,

    #[arg(long)]
    pub direction: Option<Direction>,
    #[arg(long)]
    pub zone: Option<String>,
    #[arg(long)]
    pub vehicle: Option<VehicleKind>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// HH:MM:SS
    #[arg(long)]
    pub time: Option<NaiveTime>,
    #[arg(long)]
    pub passengers: Option<u32>,
    #[arg(long)]
    pub large: Option<u32>,
    #[arg(long)]
    pub medium: Option<u32>,
    #[arg(long)]
    pub small: Option<u32>,
    #[arg(long)]
    pub flight: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl DraftFields {
    /// Overwrites only the fields given on the command line.
    pub fn apply_to(&self, draft: &mut BookingDraft) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut draft.direction, &self.direction);
        set(&mut draft.zone, &self.zone);
        set(&mut draft.vehicle, &self.vehicle);
        set(&mut draft.date, &self.date);
        set(&mut draft.time, &self.time);
        set(&mut draft.passengers, &self.passengers);
        set(&mut draft.flight_number, &self.flight);
        set(&mut draft.contact_name, &self.name);
        set(&mut draft.contact_email, &self.email);
        set(&mut draft.contact_phone, &self.phone);
        set(&mut draft.notes, &self.notes);
        if let Some(large) = self.large {
            draft.large_luggage = large;
        }
        if let Some(medium) = self.medium {
            draft.medium_luggage = medium;
        }
        if let Some(small) = self.small {
            draft.small_luggage = small;
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long, default_value = "./drafts")]
    pub store: PathBuf,

    /// Seed for the booking reference generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep the draft after a successful booking
    #[arg(long)]
    pub keep_draft: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let config = CliConfig::parse_from([
            "transfer-fares",
            "quote",
            "--zone",
            "Pudahuel",
            "--vehicle",
            "SUV",
            "--direction",
            "from-airport",
            "--passengers",
            "5",
        ]);
        match config.command {
            Command::Quote(args) => {
                assert_eq!(args.vehicle, VehicleKind::Suv);
                assert_eq!(args.direction, Direction::FromAirport);
                assert_eq!(args.passengers, 5);
                assert_eq!(args.large, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_vehicle_is_rejected_by_parser() {
        let result =
            CliConfig::try_parse_from(["transfer-fares", "quote", "--zone", "x", "--vehicle", "van"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_fields_merge() {
        let mut draft = BookingDraft {
            zone: Some("Renca".to_string()),
            passengers: Some(2),
            ..Default::default()
        };
        let fields = DraftFields {
            passengers: Some(3),
            large: Some(1),
            ..Default::default()
        };
        fields.apply_to(&mut draft);
        assert_eq!(draft.zone.as_deref(), Some("Renca"));
        assert_eq!(draft.passengers, Some(3));
        assert_eq!(draft.large_luggage, 1);
    }
}
