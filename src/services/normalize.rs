//! Conversion of raw MAAS reports into a stable response schema.
//!
//! MAAS fields used: `sol`, `terrestrial_date`, `season`, `min_temp`,
//! `max_temp`, `min_gts_temp`, `max_gts_temp`, `pressure`, `pressure_string`,
//! `sunrise`, `sunset`, `local_uv_irradiance_index`, `atmo_opacity`.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::helpers::{opt_passthrough, opt_value_to_f64, opt_value_to_string};

/// Data source tag carried by every normalized record.
pub const SOURCE_TAG: &str = "curiosity_rems_maas";

/// Air and ground temperatures in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TemperatureC {
    /// Minimum air temperature
    pub min: Option<f64>,
    /// Maximum air temperature
    pub max: Option<f64>,
    /// Minimum ground temperature
    pub min_gts: Option<f64>,
    /// Maximum ground temperature
    pub max_gts: Option<f64>,
}

/// Normalized weather report for one sol.
///
/// Absent fields serialize as `null` so clients always see the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NormalizedWeather {
    /// Data source tag, always "curiosity_rems_maas"
    #[schema(value_type = String)]
    pub source: &'static str,
    /// Sol number as reported by MAAS
    pub sol: Option<Value>,
    /// Earth date of the observation (YYYY-MM-DD)
    pub earth_date: Option<String>,
    /// Martian season (e.g. "Month 6")
    pub season: Option<String>,
    pub temperature_c: TemperatureC,
    /// Atmospheric pressure in pascals
    pub pressure_pa: Option<f64>,
    /// Qualitative pressure reading (e.g. "Higher")
    pub pressure_qual: Option<String>,
    /// Local sunrise time (HH:MM)
    pub sunrise_local: Option<String>,
    /// Local sunset time (HH:MM)
    pub sunset_local: Option<String>,
    /// Local UV irradiance index, passed through unchanged
    pub uv_index: Option<Value>,
    /// Atmospheric opacity, passed through unchanged
    pub atmo_opacity: Option<Value>,
}

/// Map a raw MAAS report to `NormalizedWeather`.
///
/// Never fails: each field is read independently and anything missing or
/// malformed comes out as `None`. A non-object input yields an all-`None`
/// record that still carries the source tag.
pub fn normalize(record: &Value) -> NormalizedWeather {
    let field = |name: &str| record.get(name);

    NormalizedWeather {
        source: SOURCE_TAG,
        sol: opt_passthrough(field("sol")),
        earth_date: opt_value_to_string(field("terrestrial_date")),
        season: opt_value_to_string(field("season")),
        temperature_c: TemperatureC {
            min: opt_value_to_f64(field("min_temp")),
            max: opt_value_to_f64(field("max_temp")),
            min_gts: opt_value_to_f64(field("min_gts_temp")),
            max_gts: opt_value_to_f64(field("max_gts_temp")),
        },
        pressure_pa: opt_value_to_f64(field("pressure")),
        pressure_qual: opt_value_to_string(field("pressure_string")),
        sunrise_local: opt_value_to_string(field("sunrise")),
        sunset_local: opt_value_to_string(field("sunset")),
        uv_index: opt_passthrough(field("local_uv_irradiance_index")),
        atmo_opacity: opt_passthrough(field("atmo_opacity")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_report() -> Value {
        json!({
            "id": "3996",
            "terrestrial_date": "2023-10-29",
            "sol": "3996",
            "ls": "97",
            "season": "Month 4",
            "min_temp": "-72",
            "max_temp": "-3",
            "pressure": "752",
            "pressure_string": "Higher",
            "abs_humidity": "--",
            "wind_speed": "--",
            "atmo_opacity": "Sunny",
            "sunrise": "05:23",
            "sunset": "17:19",
            "local_uv_irradiance_index": "Moderate",
            "min_gts_temp": "-83",
            "max_gts_temp": "4"
        })
    }

    #[test]
    fn test_normalize_full_report() {
        let w = normalize(&sample_report());

        assert_eq!(w.source, SOURCE_TAG);
        assert_eq!(w.sol, Some(json!("3996")));
        assert_eq!(w.earth_date.as_deref(), Some("2023-10-29"));
        assert_eq!(w.season.as_deref(), Some("Month 4"));
        assert_eq!(
            w.temperature_c,
            TemperatureC {
                min: Some(-72.0),
                max: Some(-3.0),
                min_gts: Some(-83.0),
                max_gts: Some(4.0),
            }
        );
        assert_eq!(w.pressure_pa, Some(752.0));
        assert_eq!(w.pressure_qual.as_deref(), Some("Higher"));
        assert_eq!(w.sunrise_local.as_deref(), Some("05:23"));
        assert_eq!(w.sunset_local.as_deref(), Some("17:19"));
        assert_eq!(w.uv_index, Some(json!("Moderate")));
        assert_eq!(w.atmo_opacity, Some(json!("Sunny")));
    }

    #[test]
    fn test_numeric_coercion_is_per_field() {
        let w = normalize(&json!({ "min_temp": "-70.5", "max_temp": "abc" }));
        assert_eq!(w.temperature_c.min, Some(-70.5));
        assert_eq!(w.temperature_c.max, None);
    }

    #[test]
    fn test_numeric_fields_accept_json_numbers() {
        let w = normalize(&json!({ "sol": 4000, "pressure": 748.5, "min_gts_temp": null }));
        assert_eq!(w.sol, Some(json!(4000)));
        assert_eq!(w.pressure_pa, Some(748.5));
        assert_eq!(w.temperature_c.min_gts, None);
    }

    #[test]
    fn test_wrong_shapes_become_absent() {
        let w = normalize(&json!({
            "season": 4,
            "terrestrial_date": ["2023-10-29"],
            "pressure": { "value": 752 },
            "sunrise": null
        }));
        assert_eq!(w.season, None);
        assert_eq!(w.earth_date, None);
        assert_eq!(w.pressure_pa, None);
        assert_eq!(w.sunrise_local, None);
    }

    #[test]
    fn test_non_object_input() {
        for input in [json!([]), json!("latest"), json!(null), json!(42)] {
            let w = normalize(&input);
            assert_eq!(w.source, SOURCE_TAG);
            assert_eq!(w.sol, None);
            assert_eq!(w.temperature_c.min, None);
        }
    }

    #[test]
    fn test_serialized_schema_is_stable() {
        let json = serde_json::to_value(normalize(&json!({}))).unwrap();
        assert_eq!(
            json,
            json!({
                "source": "curiosity_rems_maas",
                "sol": null,
                "earth_date": null,
                "season": null,
                "temperature_c": { "min": null, "max": null, "min_gts": null, "max_gts": null },
                "pressure_pa": null,
                "pressure_qual": null,
                "sunrise_local": null,
                "sunset_local": null,
                "uv_index": null,
                "atmo_opacity": null
            })
        );
    }
}
