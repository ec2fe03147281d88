//! Product Footprint Model
//!
//! The aggregate root of the data exchange: a product footprint owns exactly
//! one carbon footprint and the value lists nested inside it. The database
//! row keeps the parent's typed columns and joins the owned carbon footprint
//! document from its child table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::carbon::CarbonFootprint;
use crate::utils::validation::validate_urn;

/// Lifecycle status of a product footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFootprintStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Deprecated")]
    Deprecated,
}

impl ProductFootprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFootprintStatus::Active => "Active",
            ProductFootprintStatus::Deprecated => "Deprecated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(ProductFootprintStatus::Active),
            "Deprecated" => Some(ProductFootprintStatus::Deprecated),
            _ => None,
        }
    }
}

/// A product footprint as exchanged on the wire.
///
/// `version` and `precedingPfIds` are never mutated by this host; there is
/// deliberately no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_company_ids"))]
pub struct ProductFootprint {
    pub id: Uuid,

    #[validate(length(min = 1))]
    pub spec_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub preceding_pf_ids: Option<Vec<String>>,

    #[validate(range(min = 0))]
    pub version: i32,

    pub created: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    pub status: ProductFootprintStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period_start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period_end: Option<DateTime<Utc>>,

    #[validate(length(min = 1))]
    pub company_name: String,

    #[validate(length(min = 1))]
    pub company_ids: Vec<String>,

    pub product_description: String,

    #[validate(length(min = 1))]
    pub product_ids: Vec<String>,

    pub product_category_cpc: String,

    #[validate(length(min = 1))]
    pub product_name_company: String,

    /// Required by the protocol, but may be the empty string.
    pub comment: String,

    #[validate(nested)]
    pub pcf: CarbonFootprint,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub extensions: Option<Vec<serde_json::Value>>,
}

fn validate_company_ids(footprint: &ProductFootprint) -> Result<(), ValidationError> {
    if footprint.company_ids.iter().any(|id| !validate_urn(id)) {
        return Err(ValidationError::new("company_id_not_a_urn"));
    }
    Ok(())
}

/// Database row for a product footprint joined with its owned carbon
/// footprint document.
#[derive(Debug, sqlx::FromRow)]
pub struct ProductFootprintRow {
    pub id: Uuid,
    pub spec_version: String,
    pub preceding_pf_ids: Option<Vec<String>>,
    pub version: i32,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub status: String,
    pub status_comment: Option<String>,
    pub validity_period_start: Option<DateTime<Utc>>,
    pub validity_period_end: Option<DateTime<Utc>>,
    pub company_name: String,
    pub company_ids: Vec<String>,
    pub product_description: String,
    pub product_ids: Vec<String>,
    pub product_category_cpc: String,
    pub product_name_company: String,
    pub comment: String,
    pub extensions: Option<Json<Vec<serde_json::Value>>>,
    pub pcf: Json<CarbonFootprint>,
}

impl TryFrom<ProductFootprintRow> for ProductFootprint {
    type Error = String;

    fn try_from(row: ProductFootprintRow) -> Result<Self, Self::Error> {
        let status = ProductFootprintStatus::parse(&row.status)
            .ok_or_else(|| format!("unknown footprint status '{}'", row.status))?;

        Ok(ProductFootprint {
            id: row.id,
            spec_version: row.spec_version,
            preceding_pf_ids: row.preceding_pf_ids,
            version: row.version,
            created: row.created,
            updated: row.updated,
            status,
            status_comment: row.status_comment,
            validity_period_start: row.validity_period_start,
            validity_period_end: row.validity_period_end,
            company_name: row.company_name,
            company_ids: row.company_ids,
            product_description: row.product_description,
            product_ids: row.product_ids,
            product_category_cpc: row.product_category_cpc,
            product_name_company: row.product_name_company,
            comment: row.comment,
            pcf: row.pcf.0,
            extensions: row.extensions.map(|e| e.0),
        })
    }
}

/// Builds a minimal valid footprint for tests across the crate.
#[cfg(test)]
pub(crate) fn sample_footprint(id: Uuid) -> ProductFootprint {
    use crate::models::carbon::{
        CharacterizationFactors, CrossSectoralStandard, DeclaredUnit,
    };
    use chrono::TimeZone;

    ProductFootprint {
        id,
        spec_version: "2.0.0".to_string(),
        preceding_pf_ids: None,
        version: 1,
        created: Utc.with_ymd_and_hms(2023, 6, 18, 22, 38, 2).unwrap(),
        updated: None,
        status: ProductFootprintStatus::Active,
        status_comment: None,
        validity_period_start: None,
        validity_period_end: None,
        company_name: "Clean Product Company".to_string(),
        company_ids: vec!["urn:epc:id:sgln:0614141.00002.0".to_string()],
        product_description: "Bio-ethanol, 98% purity".to_string(),
        product_ids: vec!["urn:epc:id:gtin:0614141.011111.0".to_string()],
        product_category_cpc: "22222".to_string(),
        product_name_company: "Green Ethanol".to_string(),
        comment: "".to_string(),
        pcf: CarbonFootprint {
            declared_unit: DeclaredUnit::Kilogram,
            unitary_product_amount: 1.0,
            p_cf_excluding_biogenic: 2.0,
            p_cf_including_biogenic: None,
            fossil_ghg_emissions: 1.5,
            fossil_carbon_content: 1.0,
            biogenic_carbon_content: 0.5,
            d_luc_ghg_emissions: None,
            land_management_ghg_emissions: None,
            other_biogenic_ghg_emissions: None,
            i_luc_ghg_emissions: None,
            biogenic_carbon_withdrawal: None,
            aircraft_ghg_emissions: None,
            characterization_factors: CharacterizationFactors::Ar6,
            cross_sectoral_standards_used: vec![CrossSectoralStandard::GhgProtocol],
            product_or_sector_specific_rules: None,
            biogenic_accounting_methodology: None,
            boundary_processes_description: "Cradle-to-gate".to_string(),
            reference_period_start: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            reference_period_end: Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap(),
            geography_country_subdivision: None,
            geography_country: None,
            geography_region_or_subregion: None,
            secondary_emission_factor_sources: None,
            exempted_emissions_percent: 0.0,
            exempted_emissions_description: "None exempted".to_string(),
            packaging_emissions_included: false,
            packaging_ghg_emissions: None,
            allocation_rules_description: None,
            uncertainty_assessment_description: None,
            primary_data_share: None,
            dqi: None,
            assurance: None,
        },
        extensions: None,
    }
}
