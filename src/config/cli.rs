use crate::config::toml_config::TomlConfig;
use crate::core::service::ReservationService;
use crate::domain::model::{
    parse_date, Customer, CustomerUpdate, Hotel, HotelUpdate, NewReservation,
};
use crate::domain::ports::{Record, Storage};
use crate::utils::error::{ConfigError, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "hotel-store.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-store")]
#[command(about = "Manage hotels, customers and reservations stored as JSON documents")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Loads the config file (explicit path, or `hotel-store.toml` when present)
    /// and applies command-line overrides.
    pub fn resolve(&self) -> std::result::Result<TomlConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if self.json_logs {
            config.logging.format = Some("json".to_string());
        }
        Ok(config)
    }
}

fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", raw))
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Hotel(HotelCommand),

    #[command(subcommand)]
    Customer(CustomerCommand),

    #[command(subcommand)]
    Reservation(ReservationCommand),

    /// Rooms still free at a hotel over a date range
    Availability {
        #[arg(long)]
        hotel: String,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        check_out: NaiveDate,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum HotelCommand {
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long, allow_negative_numbers = true)]
        rooms: i64,
    },
    Show {
        id: String,
    },
    List,
    Modify {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        rooms: Option<i64>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Show {
        id: String,
    },
    List,
    Modify {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReservationCommand {
    Create {
        #[arg(long)]
        hotel: String,
        #[arg(long)]
        customer: String,
        #[arg(long, value_parser = parse_date_arg)]
        check_in: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        check_out: NaiveDate,
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        rooms: i64,
        /// Reservation id; generated when omitted
        #[arg(long)]
        id: Option<String>,
    },
    Show {
        id: String,
    },
    List {
        #[arg(long, conflicts_with = "customer")]
        hotel: Option<String>,
        #[arg(long)]
        customer: Option<String>,
    },
    Cancel {
        id: String,
    },
}

fn record<T: Record>(entity: &T) -> Value {
    Value::Object(entity.encode())
}

fn records<T: Record>(entities: &[T]) -> Value {
    Value::Array(entities.iter().map(record).collect())
}

impl Command {
    /// Runs the command against `service`, returning what should be printed.
    pub fn execute<S: Storage>(self, service: &ReservationService<S>) -> Result<Value> {
        match self {
            Command::Hotel(cmd) => cmd.execute(service),
            Command::Customer(cmd) => cmd.execute(service),
            Command::Reservation(cmd) => cmd.execute(service),
            Command::Availability {
                hotel,
                check_in,
                check_out,
            } => {
                let available = service.available_rooms(&hotel, check_in, check_out)?;
                Ok(json!({
                    "hotel_id": hotel,
                    "check_in": check_in.to_string(),
                    "check_out": check_out.to_string(),
                    "available_rooms": available,
                }))
            }
        }
    }
}

impl HotelCommand {
    fn execute<S: Storage>(self, service: &ReservationService<S>) -> Result<Value> {
        match self {
            HotelCommand::Create {
                id,
                name,
                city,
                rooms,
            } => Ok(record(&service.create_hotel(Hotel::new(id, name, city, rooms))?)),
            HotelCommand::Show { id } => Ok(record(&service.display_hotel(&id)?)),
            HotelCommand::List => Ok(records(&service.list_hotels())),
            HotelCommand::Modify {
                id,
                name,
                city,
                rooms,
            } => {
                let update = HotelUpdate {
                    name,
                    city,
                    total_rooms: rooms,
                };
                Ok(record(&service.modify_hotel(&id, update)?))
            }
            HotelCommand::Delete { id } => {
                service.delete_hotel(&id)?;
                Ok(json!({ "deleted": id }))
            }
        }
    }
}

impl CustomerCommand {
    fn execute<S: Storage>(self, service: &ReservationService<S>) -> Result<Value> {
        match self {
            CustomerCommand::Create { id, name, email } => Ok(record(
                &service.create_customer(Customer::new(id, name, email))?,
            )),
            CustomerCommand::Show { id } => Ok(record(&service.display_customer(&id)?)),
            CustomerCommand::List => Ok(records(&service.list_customers())),
            CustomerCommand::Modify { id, name, email } => {
                let update = CustomerUpdate {
                    full_name: name,
                    email,
                };
                Ok(record(&service.modify_customer(&id, update)?))
            }
            CustomerCommand::Delete { id } => {
                service.delete_customer(&id)?;
                Ok(json!({ "deleted": id }))
            }
        }
    }
}

impl ReservationCommand {
    fn execute<S: Storage>(self, service: &ReservationService<S>) -> Result<Value> {
        match self {
            ReservationCommand::Create {
                hotel,
                customer,
                check_in,
                check_out,
                rooms,
                id,
            } => {
                let mut request =
                    NewReservation::new(hotel, customer, check_in, check_out).rooms(rooms);
                if let Some(id) = id {
                    request = request.reservation_id(id);
                }
                Ok(record(&service.create_reservation(request)?))
            }
            ReservationCommand::Show { id } => Ok(record(&service.display_reservation(&id)?)),
            ReservationCommand::List { hotel, customer } => {
                let reservations = match (hotel, customer) {
                    (Some(hotel), _) => service.reservations_for_hotel(&hotel)?,
                    (None, Some(customer)) => service.reservations_for_customer(&customer)?,
                    (None, None) => service.list_reservations(),
                };
                Ok(records(&reservations))
            }
            ReservationCommand::Cancel { id } => {
                service.cancel_reservation(&id)?;
                Ok(json!({ "cancelled": id }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LocalStorage, MemorySink};
    use crate::core::service::CollectionDocuments;
    use crate::core::store::CollectionStore;
    use crate::utils::error::ReservationError;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn run(service: &ReservationService<LocalStorage>, args: &[&str]) -> Result<Value> {
        let argv = std::iter::once("hotel-store").chain(args.iter().copied());
        let cli = CliConfig::try_parse_from(argv).unwrap();
        cli.command.execute(service)
    }

    fn service(dir: &TempDir) -> ReservationService<LocalStorage> {
        ReservationService::new(
            CollectionStore::new(LocalStorage::new(dir.path()), Arc::new(MemorySink::new())),
            CollectionDocuments::default(),
        )
    }

    #[test]
    fn test_cli_booking_flow() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);

        run(
            &svc,
            &[
                "hotel", "create", "--id", "H1", "--name", "Grand Hotel", "--city", "Guadalajara",
                "--rooms", "50",
            ],
        )
        .unwrap();
        run(
            &svc,
            &[
                "customer", "create", "--id", "C1", "--name", "Ana Gomez", "--email",
                "ana@example.com",
            ],
        )
        .unwrap();

        let booked = run(
            &svc,
            &[
                "reservation", "create", "--hotel", "H1", "--customer", "C1", "--check-in",
                "2026-04-10", "--check-out", "2026-04-15", "--rooms", "2", "--id", "R1",
            ],
        )
        .unwrap();
        assert_eq!(booked["reservation_id"], json!("R1"));
        assert_eq!(booked["check_out"], json!("2026-04-15"));

        let availability = run(
            &svc,
            &[
                "availability", "--hotel", "H1", "--check-in", "2026-04-12", "--check-out",
                "2026-04-13",
            ],
        )
        .unwrap();
        assert_eq!(availability["available_rooms"], json!(48));

        let listed = run(&svc, &["reservation", "list", "--customer", "C1"]).unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        assert!(matches!(
            run(&svc, &["hotel", "delete", "H1"]),
            Err(ReservationError::ReferentialConflict { .. })
        ));
        run(&svc, &["reservation", "cancel", "R1"]).unwrap();
        assert_eq!(run(&svc, &["hotel", "delete", "H1"]).unwrap(), json!({"deleted": "H1"}));
    }

    #[test]
    fn test_cli_modify_keeps_unset_fields() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);
        run(
            &svc,
            &[
                "hotel", "create", "--id", "H1", "--name", "Plaza", "--city", "CDMX", "--rooms",
                "10",
            ],
        )
        .unwrap();

        let modified = run(&svc, &["hotel", "modify", "H1", "--city", "Monterrey"]).unwrap();
        assert_eq!(modified["name"], json!("Plaza"));
        assert_eq!(modified["city"], json!("Monterrey"));
        assert_eq!(modified["total_rooms"], json!(10));

        let unchanged = run(&svc, &["hotel", "modify", "H1"]).unwrap();
        assert_eq!(unchanged, modified);
    }

    #[test]
    fn test_cli_rejects_malformed_dates() {
        let parsed = CliConfig::try_parse_from([
            "hotel-store",
            "availability",
            "--hotel",
            "H1",
            "--check-in",
            "15/03/2026",
            "--check-out",
            "2026-03-20",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let missing = "/definitely/not/here.toml";
        let cli =
            CliConfig::try_parse_from(["hotel-store", "-c", missing, "hotel", "list"]).unwrap();
        assert!(matches!(cli.resolve(), Err(ConfigError::Io { .. })));

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp_file, b"[storage]\ndata_dir = \"from-file\"\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap();

        let cli = CliConfig::try_parse_from([
            "hotel-store",
            "--config",
            path,
            "--data-dir",
            "override",
            "--json-logs",
            "hotel",
            "list",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();
        assert_eq!(config.storage.data_dir, "override");
        assert!(config.json_logs());
    }
}
