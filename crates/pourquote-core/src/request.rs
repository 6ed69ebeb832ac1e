//! # Quote Requests
//!
//! The contact form a visitor submits to ask for a firm quote, and the
//! prefill it receives from the calculator or a project page.
//!
//! Sending the request to the intake endpoint is the caller's concern; this
//! module only shapes and validates it.
//!
//! ## Prefill Notes
//! ```text
//! ?notes=...                         → used verbatim
//! ?concreteType=Fiber&strengthMPa=300 → "Type: Fiber | Strength: 300 MPa"
//! ?project=industrial-slab-warehouse → "Project reference: industrial-slab-warehouse"
//! (nothing)                          → ""
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::validation::{validate_email, validate_positive, validate_required};

/// Project types offered by the form, first is preselected.
pub const PROJECT_TYPES: [&str; 8] = [
    "Residential Driveway / Patio",
    "Foundation & Footings",
    "Industrial Floor Slab",
    "Structural Concrete",
    "Decorative / Stamped",
    "Tilt-Up Construction",
    "Bridge / Civil Infrastructure",
    "Other",
];

// =============================================================================
// Quote Request
// =============================================================================

/// A submitted quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub project_type: String,
    #[serde(rename = "desiredM3")]
    pub desired_m3: f64,
    /// Site address or general location.
    pub address: String,
    pub notes: String,
    #[serde(default)]
    #[ts(optional)]
    pub prefill_project_name: Option<String>,
}

impl QuoteRequest {
    /// An empty form seeded from a prefill.
    pub fn prefilled(prefill: &QuotePrefill) -> Self {
        QuoteRequest {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            project_type: PROJECT_TYPES[0].to_string(),
            desired_m3: prefill.volume.trim().parse().unwrap_or(0.0),
            address: String::new(),
            notes: prefill.notes(),
            prefill_project_name: Some(prefill.project.clone()).filter(|p| !p.is_empty()),
        }
    }

    /// Every rule failure, in form order.
    pub fn validate_all(&self) -> Vec<ValidationError> {
        [
            validate_required("name", &self.name),
            validate_required("phone", &self.phone),
            validate_email(&self.email),
            validate_required("projectType", &self.project_type),
            validate_positive("desiredM3", self.desired_m3),
            validate_required("address", &self.address),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    /// The first rule failure, if any.
    pub fn validate(&self) -> ValidationResult<()> {
        match self.validate_all().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Prefill
// =============================================================================

/// Raw values the quote page receives in its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotePrefill {
    pub project: String,
    pub volume: String,
    pub concrete_type: String,
    pub strength_mpa: String,
    pub notes: String,
}

impl QuotePrefill {
    /// Reads the recognised keys. `volume` wins over `volumeM3`.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut prefill = QuotePrefill::default();
        let mut volume = None;
        let mut volume_m3 = None;

        for (key, value) in pairs {
            match key {
                "project" => prefill.project = value.to_string(),
                "volume" => volume = Some(value.to_string()),
                "volumeM3" => volume_m3 = Some(value.to_string()),
                "concreteType" => prefill.concrete_type = value.to_string(),
                "strengthMPa" => prefill.strength_mpa = value.to_string(),
                "notes" => prefill.notes = value.to_string(),
                _ => {}
            }
        }

        prefill.volume = volume.or(volume_m3).unwrap_or_default();
        prefill
    }

    /// Notes the form opens with.
    pub fn notes(&self) -> String {
        if !self.notes.is_empty() {
            return self.notes.clone();
        }

        if !self.concrete_type.is_empty() || !self.strength_mpa.is_empty() {
            let mut notes = format!("Type: {}", self.concrete_type);
            if !self.strength_mpa.is_empty() {
                notes.push_str(&format!(" | Strength: {} MPa", self.strength_mpa));
            }
            return notes;
        }

        if !self.project.is_empty() {
            return format!("Project reference: {}", self.project);
        }

        String::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
