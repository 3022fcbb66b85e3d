//! Plain-text rendering for each view.

use healthwatch_alerts::{empty_message, filter_alerts, FeedState, PrioritySummary};
use healthwatch_analytics::{DistrictInfo, DistrictMarker};
use healthwatch_contracts::alert::{Alert, Priority, PriorityFilter};
use healthwatch_dashboard::Dashboard;
use healthwatch_store::PatientListing;

pub const UNAVAILABLE: &str = "alert data is temporarily unavailable";

fn rule(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

// ── Alerts ────────────────────────────────────────────────────────────────────

pub fn alerts(state: &FeedState, filter: PriorityFilter) {
    rule("Health Alerts");
    match state {
        FeedState::Idle => println!("No alert generation has run yet."),
        FeedState::Failed { reason, .. } => {
            println!("Warning: {UNAVAILABLE}.");
            println!("  cause: {reason}");
        }
        FeedState::Ready {
            generation,
            generated_at,
            alerts,
        } => {
            let summary = PrioritySummary::from_alerts(alerts);
            println!(
                "Generation {generation} at {}",
                generated_at.format("%Y-%m-%d %H:%M UTC")
            );
            let counts: Vec<String> = summary
                .by_priority()
                .iter()
                .map(|(priority, n)| format!("{}: {}", priority.label(), n))
                .collect();
            println!("{}  total: {}", counts.join("  "), summary.total());
            println!();

            let shown = filter_alerts(alerts, filter);
            if shown.is_empty() {
                println!("{}", empty_message(filter));
                return;
            }
            for alert in shown {
                alert_row(alert);
            }
        }
    }
}

fn alert_row(alert: &Alert) {
    let marker = match alert.priority {
        Priority::Urgent => "!!",
        Priority::High => "! ",
        Priority::Medium | Priority::Low => "  ",
    };
    println!(
        "{marker} [{:<6}] {} ({})",
        alert.priority.label().to_uppercase(),
        alert.title,
        alert.alert_type
    );
    println!("            {}", alert.message);
    let mut details = Vec::new();
    if let Some(name) = &alert.patient_name {
        details.push(format!("patient: {name}"));
    }
    if let Some(district) = &alert.district {
        details.push(format!("district: {district}"));
    }
    if let Some(due) = alert.due_date {
        details.push(format!("due: {}", due.format("%Y-%m-%d")));
    }
    if !details.is_empty() {
        println!("            {}", details.join("  "));
    }
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

pub fn dashboard(dashboard: &Dashboard) {
    rule(&dashboard.title);
    let s = &dashboard.stats;
    println!("Total patients      {:>6}", s.total_patients);
    println!("Total cases         {:>6}", s.total_cases);
    println!("Migrant cases       {:>6}", s.migrant_cases);
    println!("Severe cases        {:>6}", s.severe_cases);
    println!("Recent cases (7d)   {:>6}", s.recent_cases);
    println!("Districts affected  {:>6}", s.districts_affected);
    println!("(derived from the {} most recent cases)", dashboard.sample_size);

    let charts = &dashboard.charts;
    println!();
    println!("Cases by district (migrant / local)");
    for bar in &charts.district_cases {
        println!(
            "  {:<20} {:>5}  ({} / {})",
            bar.name, bar.total, bar.migrant, bar.local
        );
    }

    println!();
    println!("Severity");
    for slice in &charts.severity {
        println!("  {:<10} {:>5}  {}", slice.severity.label(), slice.value, slice.color);
    }

    println!();
    println!("Admissions, last 30 days (cases / migrant)");
    for point in &charts.trend {
        println!("  {}  {:>4} / {}", point.date, point.cases, point.migrant);
    }

    println!();
    println!("Top diseases");
    for bar in &charts.diseases {
        println!("  {:<24} {:>5}", bar.name, bar.cases);
    }
}

// ── Patients ──────────────────────────────────────────────────────────────────

pub fn patients(listing: &PatientListing<'_>) {
    rule("Patients");
    println!("{}", listing.summary());
    println!();
    for p in &listing.shown {
        let checkup = p
            .last_checkup
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {}  {:<22} {:>3}  {:<8} {:<18} last checkup: {}",
            p.patient_id,
            p.name,
            p.age,
            if p.migrant { "migrant" } else { "local" },
            p.district,
            checkup
        );
    }
}

// ── Analytics ─────────────────────────────────────────────────────────────────

pub fn district_info(district: &str, info: &DistrictInfo) {
    rule(&format!("{district} Disease Summary"));
    let band = info.band();
    println!(
        "Total cases: {}  severity: {} ({})",
        info.total_cases(),
        band.label(),
        band.color()
    );
    if info.disease_summary.is_empty() {
        println!("No disease data reported for this district.");
        return;
    }
    for (disease, details) in info.ranked() {
        println!();
        println!("  {disease}: {} cases", details.cases);
        println!(
            "    mainly affected: {}, {}",
            details.mainly_affected.age_group, details.mainly_affected.gender
        );
        if !details.possible_causes.is_empty() {
            println!("    possible causes: {}", details.possible_causes.join(", "));
        }
    }
}

pub fn map(markers: &[DistrictMarker]) {
    rule("Kerala Health Map");
    for m in markers {
        let status = if m.available { "" } else { "  (summary unavailable)" };
        println!(
            "  {:<20} {:>8.4} {:>8.4}  {:>6} cases  {:<8} {}{}",
            m.district,
            m.coordinates.lat,
            m.coordinates.lon,
            m.summary.total_cases(),
            m.band.label(),
            m.color(),
            status
        );
    }
}
