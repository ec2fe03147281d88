//! Carbon Footprint Model
//!
//! The PCF payload nested in every product footprint, plus the enumerations
//! and owned value types it carries. Wire names are camelCase and the
//! enumeration strings follow the data exchange protocol exactly.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

use crate::utils::validation::country_code_validator;

/// IPCC Global Warming Potential characterization factor releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterizationFactors {
    #[serde(rename = "AR5")]
    Ar5,
    #[serde(rename = "AR6")]
    Ar6,
}

/// The standard followed to account for biogenic emissions and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiogenicAccountingMethodology {
    #[serde(rename = "PEF")]
    Pef,
    #[serde(rename = "ISO")]
    Iso,
    #[serde(rename = "GHGP")]
    Ghgp,
    #[serde(rename = "Quantis")]
    Quantis,
}

/// Accepted declared units, SI-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredUnit {
    #[serde(rename = "liter")]
    Liter,
    #[serde(rename = "kilogram")]
    Kilogram,
    #[serde(rename = "cubic meter")]
    CubicMeter,
    #[serde(rename = "kilowatt hour")]
    KilowattHour,
    #[serde(rename = "megajoule")]
    Megajoule,
    #[serde(rename = "ton kilometer")]
    TonKilometer,
    #[serde(rename = "square meter")]
    SquareMeter,
}

/// UN geographic regions and subregions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionOrSubregion {
    #[serde(rename = "Africa")]
    Africa,
    #[serde(rename = "Americas")]
    Americas,
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Oceania")]
    Oceania,
    #[serde(rename = "Australia and New Zealand")]
    AustraliaAndNewZealand,
    #[serde(rename = "Central Asia")]
    CentralAsia,
    #[serde(rename = "Eastern Asia")]
    EasternAsia,
    #[serde(rename = "Eastern Europe")]
    EasternEurope,
    #[serde(rename = "Latin America and the Caribbean")]
    LatinAmericaAndTheCaribbean,
    #[serde(rename = "Melanesia")]
    Melanesia,
    #[serde(rename = "Micronesia")]
    Micronesia,
    #[serde(rename = "Northern Africa")]
    NorthernAfrica,
    #[serde(rename = "Northern America")]
    NorthernAmerica,
    #[serde(rename = "Northern Europe")]
    NorthernEurope,
    #[serde(rename = "Polynesia")]
    Polynesia,
    #[serde(rename = "South-eastern Asia")]
    SouthEasternAsia,
    #[serde(rename = "Southern Asia")]
    SouthernAsia,
    #[serde(rename = "Southern Europe")]
    SouthernEurope,
    #[serde(rename = "Sub-Saharan Africa")]
    SubSaharanAfrica,
    #[serde(rename = "Western Asia")]
    WesternAsia,
    #[serde(rename = "Western Europe")]
    WesternEurope,
}

/// Cross-sectoral accounting standards for PCF calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossSectoralStandard {
    #[serde(rename = "GHG Protocol Product standard")]
    GhgProtocol,
    #[serde(rename = "ISO Standard 14067")]
    Iso14067,
    #[serde(rename = "ISO Standard 14044")]
    Iso14044,
}

/// Product Category Rule operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = "PEF")]
    Pef,
    #[serde(rename = "EPD International")]
    EpdInternational,
    #[serde(rename = "Other")]
    Other,
}

/// A set of product or sector specific rules published by one operator.
///
/// `otherOperatorName` must be present exactly when the operator is `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rule_operator_name"))]
pub struct ProductOrSectorSpecificRule {
    pub operator: RuleOperator,

    #[validate(length(min = 1))]
    pub rule_names: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_operator_name: Option<String>,
}

fn validate_rule_operator_name(
    rule: &ProductOrSectorSpecificRule,
) -> Result<(), ValidationError> {
    if rule.rule_names.iter().any(|name| name.is_empty()) {
        return Err(ValidationError::new("empty_rule_name"));
    }

    match (rule.operator, rule.other_operator_name.as_deref()) {
        (RuleOperator::Other, None) | (RuleOperator::Other, Some("")) => Err(
            ValidationError::new("other_operator_name_required_for_other"),
        ),
        (RuleOperator::Other, Some(_)) => Ok(()),
        (_, Some(_)) => Err(ValidationError::new(
            "other_operator_name_forbidden_unless_other",
        )),
        (_, None) => Ok(()),
    }
}

/// Reference to an emission factor database used for secondary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmissionFactorDataset {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub version: String,
}

/// The product carbon footprint payload.
///
/// Numeric bounds mirror the protocol: unitary amount strictly positive,
/// emission figures non-negative unless explicitly signed, withdrawal
/// non-positive, exempted emissions within [0, 5] percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarbonFootprint {
    pub declared_unit: DeclaredUnit,

    #[validate(range(exclusive_min = 0.0))]
    pub unitary_product_amount: f64,

    #[validate(range(min = 0.0))]
    pub p_cf_excluding_biogenic: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_cf_including_biogenic: Option<f64>,

    #[validate(range(min = 0.0))]
    pub fossil_ghg_emissions: f64,

    #[validate(range(min = 0.0))]
    pub fossil_carbon_content: f64,

    #[validate(range(min = 0.0))]
    pub biogenic_carbon_content: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub d_luc_ghg_emissions: Option<f64>,

    /// Signed: land management may be a net removal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_management_ghg_emissions: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub other_biogenic_ghg_emissions: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub i_luc_ghg_emissions: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 0.0))]
    pub biogenic_carbon_withdrawal: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub aircraft_ghg_emissions: Option<f64>,

    pub characterization_factors: CharacterizationFactors,

    pub cross_sectoral_standards_used: Vec<CrossSectoralStandard>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub product_or_sector_specific_rules: Option<Vec<ProductOrSectorSpecificRule>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub biogenic_accounting_methodology: Option<BiogenicAccountingMethodology>,

    pub boundary_processes_description: String,

    pub reference_period_start: DateTime<Utc>,

    pub reference_period_end: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geography_country_subdivision: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "country_code_validator"))]
    pub geography_country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geography_region_or_subregion: Option<RegionOrSubregion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub secondary_emission_factor_sources: Option<Vec<EmissionFactorDataset>>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub exempted_emissions_percent: f64,

    pub exempted_emissions_description: String,

    pub packaging_emissions_included: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub packaging_ghg_emissions: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_rules_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_assessment_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub primary_data_share: Option<f64>,

    /// Data Quality Indicators, free-form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dqi: Option<serde_json::Value>,

    /// Assurance information, free-form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assurance: Option<serde_json::Value>,
}
