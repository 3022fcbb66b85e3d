//! HealthWatch command-line client.
//!
//! Opens the alert, dashboard, patient, and district analytics views for a
//! chosen role against either a JSON dataset export or the built-in seed.
//!
//! Usage:
//!   cargo run -p healthwatch-cli -- alerts --priority urgent
//!   cargo run -p healthwatch-cli -- --role doctor --district Ernakulam dashboard
//!   cargo run -p healthwatch-cli -- --role doctor --district Kollam patients --migrant migrant
//!   cargo run -p healthwatch-cli -- district-info Malappuram
//!   cargo run -p healthwatch-cli -- map

mod config;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use healthwatch_alerts::{AlertEngine, AlertFeed};
use healthwatch_analytics::{fetch_markers, DistrictInfoClient, DistrictInfoSource};
use healthwatch_contracts::{
    alert::PriorityFilter,
    district::{is_known_district, RecordFilter},
    error::{HealthError, HealthResult},
    patient::{Gender, NewPatient},
    profile::{Role, UserProfile, View},
};
use healthwatch_core::traits::{Clock, PatientRegistry, RecordStore, SystemClock};
use healthwatch_dashboard::load_dashboard;
use healthwatch_store::{seed, Dataset, InMemoryRecordStore, MigrantFilter, PatientQuery};

use crate::config::AppConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// HealthWatch: health monitoring for migrant workers in Kerala.
#[derive(Parser)]
#[command(
    name = "healthwatch",
    about = "Kerala migrant worker health monitoring",
    long_about = "Generates prioritized health alerts and district statistics from\n\
                  patient, disease case, and district records."
)]
struct Cli {
    /// Role to act as.
    #[arg(long, value_enum, global = true, default_value = "official")]
    role: RoleArg,

    /// Home district. Required for doctors, whose views are restricted to it.
    #[arg(long, global = true)]
    district: Option<String>,

    /// Configuration file (defaults to ./healthwatch.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON dataset export to load instead of the built-in seed.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Official,
    Doctor,
    Migrant,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Official => Role::GovernmentOfficial,
            RoleArg::Doctor => Role::Doctor,
            RoleArg::Migrant => Role::Migrant,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate and list health alerts, most urgent first.
    Alerts {
        /// all, urgent, high, medium, or low.
        #[arg(long, default_value = "all")]
        priority: PriorityFilter,
    },
    /// Show dashboard statistics and chart series.
    Dashboard,
    /// List patients (doctors only).
    Patients {
        /// Match against name, registry number, or contact number.
        #[arg(long, default_value = "")]
        search: String,
        /// all, migrant, or local.
        #[arg(long, default_value = "all")]
        migrant: MigrantFilter,
    },
    /// Register a patient (doctors only). Saved back to --dataset when given.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum)]
        gender: GenderArg,
        #[arg(long)]
        migrant: bool,
        #[arg(long)]
        hospital: String,
        /// Defaults to the doctor's own district.
        #[arg(long = "patient-district")]
        patient_district: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Disease summary for one district from the analytics service.
    DistrictInfo {
        /// District name, e.g. "Ernakulam".
        name: String,
    },
    /// Marker colour and case total for every district.
    Map,
    /// List the views the role may open.
    Views,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("healthwatch: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> HealthResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let profile = profile(cli.role.into(), cli.district)?;
    info!(role = %profile.role, scope = ?profile.scope(), "session started");

    match cli.command {
        Command::Alerts { priority } => {
            profile.authorize(View::Alerts)?;
            let store = open_store(cli.dataset.as_deref())?;
            run_alerts(store, &config, &profile, priority).await
        }
        Command::Dashboard => {
            let store = open_store(cli.dataset.as_deref())?;
            let dashboard = load_dashboard(Arc::new(store), &profile, SystemClock.now()).await?;
            render::dashboard(&dashboard);
            Ok(())
        }
        Command::Patients { search, migrant } => {
            profile.authorize(View::Patients)?;
            let store = open_store(cli.dataset.as_deref())?;
            let patients = store.list_patients(&RecordFilter::from_scope(profile.scope()))?;
            let listing = PatientQuery { search, migrant }.apply(&patients);
            render::patients(&listing);
            Ok(())
        }
        Command::Register {
            name,
            age,
            gender,
            migrant,
            hospital,
            patient_district,
            contact,
            address,
        } => {
            profile.authorize(View::Patients)?;
            let district = patient_district
                .or_else(|| profile.district.clone())
                .unwrap_or_default();
            let input = NewPatient {
                name,
                age,
                gender: gender.into(),
                migrant,
                hospital_id: hospital,
                district,
                contact_number: contact,
                address,
                last_checkup: None,
            };
            let store = open_store(cli.dataset.as_deref())?;
            run_register(&store, input, &profile, cli.dataset.as_deref())
        }
        Command::DistrictInfo { name } => {
            profile.authorize(View::HealthMap)?;
            if !is_known_district(&name) {
                return Err(HealthError::validation(
                    "district",
                    format!("unknown district '{name}'"),
                ));
            }
            let client = DistrictInfoClient::new(&config.analytics)?;
            let info = client.district_info(&name).await?;
            render::district_info(&name, &info);
            Ok(())
        }
        Command::Map => {
            profile.authorize(View::HealthMap)?;
            let client = DistrictInfoClient::new(&config.analytics)?;
            let markers = fetch_markers(&client).await;
            render::map(&markers);
            Ok(())
        }
        Command::Views => {
            let views: Vec<&str> = profile.role.navigation().iter().map(|v| v.label()).collect();
            println!("{}: {}", profile.role, views.join(", "));
            Ok(())
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn profile(role: Role, district: Option<String>) -> HealthResult<UserProfile> {
    if let Some(name) = &district {
        if !is_known_district(name) {
            return Err(HealthError::validation(
                "district",
                format!("unknown district '{name}'"),
            ));
        }
    }
    if role == Role::Doctor && district.is_none() {
        return Err(HealthError::validation(
            "district",
            "doctors must pass --district",
        ));
    }
    Ok(UserProfile {
        id: "cli".to_string(),
        email: String::new(),
        full_name: "Command-line user".to_string(),
        role,
        district,
        hospital_id: None,
    })
}

fn open_store(dataset: Option<&Path>) -> HealthResult<InMemoryRecordStore> {
    let dataset = match dataset {
        Some(path) => Dataset::from_file(path)?,
        None => {
            warn!("no --dataset given; using simulated seed records");
            seed::demo_dataset(SystemClock.now())
        }
    };
    Ok(InMemoryRecordStore::from_dataset(dataset))
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_alerts(
    store: InMemoryRecordStore,
    config: &AppConfig,
    profile: &UserProfile,
    filter: PriorityFilter,
) -> HealthResult<()> {
    let feed = AlertFeed::new(
        Arc::new(store),
        AlertEngine::new(config.alerts.clone()),
        Arc::new(SystemClock),
    );
    let result = feed.refresh(profile.scope()).await;
    render::alerts(&feed.state(), filter);
    result.map(|_| ())
}

fn run_register(
    store: &InMemoryRecordStore,
    input: NewPatient,
    profile: &UserProfile,
    dataset: Option<&Path>,
) -> HealthResult<()> {
    let patient = store.create_patient(input, Some(&profile.id), SystemClock.now())?;
    println!("Registered {} as {}", patient.name, patient.patient_id);

    match dataset {
        Some(path) => {
            let json = serde_json::to_string_pretty(&store.export()?).map_err(|e| {
                HealthError::data_access("dataset", format!("failed to serialize: {}", e))
            })?;
            std::fs::write(path, json).map_err(|e| {
                HealthError::data_access(
                    "dataset",
                    format!("failed to write '{}': {}", path.display(), e),
                )
            })?;
            println!("Saved to {}", path.display());
        }
        None => println!("(seed data is not persisted; pass --dataset to save)"),
    }
    Ok(())
}
