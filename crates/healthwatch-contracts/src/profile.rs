//! Signed-in user profiles and role-based navigation.
//!
//! Authentication itself is delegated to the hosting backend; this module
//! only decides what a profile may see and which district it is scoped to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HealthError, HealthResult};

/// The three account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    GovernmentOfficial,
    Doctor,
    Migrant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::GovernmentOfficial => "government_official",
            Role::Doctor => "doctor",
            Role::Migrant => "migrant",
        }
    }

    /// Return true if this role may open `view`.
    pub fn can_open(&self, view: View) -> bool {
        view.roles().contains(self)
    }

    /// Views this role sees in the navigation bar, in display order.
    pub fn navigation(&self) -> Vec<View> {
        View::ALL.into_iter().filter(|v| self.can_open(*v)).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    HealthMap,
    Patients,
    Alerts,
    Settings,
}

impl View {
    /// Navigation order.
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::HealthMap,
        View::Patients,
        View::Alerts,
        View::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::HealthMap => "Health Map",
            View::Patients => "Patients",
            View::Alerts => "Alerts",
            View::Settings => "Settings",
        }
    }

    /// Roles permitted to open this view.
    pub fn roles(&self) -> &'static [Role] {
        match self {
            View::Dashboard | View::HealthMap | View::Alerts => {
                &[Role::GovernmentOfficial, Role::Doctor]
            }
            View::Patients => &[Role::Doctor],
            View::Settings => &[Role::GovernmentOfficial, Role::Doctor, Role::Migrant],
        }
    }
}

/// The profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    /// Home district. Only doctors are scoped to it.
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub hospital_id: Option<String>,
}

impl UserProfile {
    /// The district this profile's reads are restricted to, if any.
    pub fn scope(&self) -> Option<&str> {
        match self.role {
            Role::Doctor => self.district.as_deref(),
            Role::GovernmentOfficial | Role::Migrant => None,
        }
    }

    /// Return `Ok(())` if this profile may open `view`, else `AccessDenied`.
    pub fn authorize(&self, view: View) -> HealthResult<()> {
        if self.role.can_open(view) {
            Ok(())
        } else {
            Err(HealthError::AccessDenied {
                role: self.role.label().to_string(),
                view: view.label().to_string(),
            })
        }
    }

    /// Heading shown on the dashboard view.
    pub fn dashboard_title(&self) -> String {
        match self.scope() {
            Some(district) => format!("{district} District Health Overview"),
            None => "Kerala Health System Overview".to_string(),
        }
    }
}
