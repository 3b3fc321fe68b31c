//! Explicit, immutable configuration for synthesis and validation.
//!
//! The column vocabulary, per-end-use capability records, and default
//! multiplier tables live in a [`ScheduleConfig`] value that callers pass
//! into the synthesizer and validator. Nothing here is process-wide state,
//! so tests can run multiple configurations side by side.

use serde::{Deserialize, Serialize};

use super::domain::ScheduleStrategy;

/// Numeric contract of a schedule column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSemantics {
    /// Normalized intensity: every cell in `[0, 1]` and the column maximum
    /// must equal exactly 1. Downstream scaling assumes the peak is 1.
    Fraction,
    /// Flow-style series: cells must be finite and non-negative, with no
    /// constraint on the maximum.
    NonNegative,
}

/// Capability record for one end-use column.
///
/// Replaces name-string dispatch in synthesis and override logic: whether an
/// end-use honors unavailable periods, which strategy it defaults to, and
/// which multiplier tables shape it are all data here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndUseSpec {
    pub name: String,
    pub semantics: ColumnSemantics,
    /// Whether unavailable periods apply to this end-use. Continuous loads
    /// (refrigerator-type) set this false and are then only affected by a
    /// period spanning the entire year.
    pub supports_unavailable_override: bool,
    pub default_strategy: ScheduleStrategy,
    /// Documented annual equivalent full-load hours for the default shape.
    /// A sanity datum for tests and reports, never enforced at runtime.
    #[serde(default)]
    pub reference_annual_flh: Option<f64>,
    #[serde(default)]
    pub weekday_multipliers: Option<[f64; 24]>,
    #[serde(default)]
    pub weekend_multipliers: Option<[f64; 24]>,
    #[serde(default)]
    pub monthly_multipliers: Option<[f64; 12]>,
}

impl EndUseSpec {
    fn new(name: &str, semantics: ColumnSemantics) -> Self {
        Self {
            name: name.to_string(),
            semantics,
            supports_unavailable_override: true,
            default_strategy: ScheduleStrategy::MultiplierTable,
            reference_annual_flh: None,
            weekday_multipliers: None,
            weekend_multipliers: None,
            monthly_multipliers: None,
        }
    }
}

/// Immutable configuration shared by the synthesizer and validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub end_uses: Vec<EndUseSpec>,
}

impl ScheduleConfig {
    /// Looks up the capability record for a column name.
    pub fn end_use(&self, name: &str) -> Option<&EndUseSpec> {
        self.end_uses.iter().find(|e| e.name == name)
    }

    /// True iff `name` belongs to the recognized column vocabulary.
    pub fn is_recognized(&self, name: &str) -> bool {
        self.end_use(name).is_some()
    }

    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// The default residential vocabulary and shape tables.
    ///
    /// Hourly shapes peak at (or near) 1.0; the synthesizer re-normalizes
    /// the composed profile so the peak is exactly 1.0 regardless. The
    /// `reference_annual_flh` values document the expected annual
    /// equivalent full-load hours of each default schedule.
    pub fn residential_defaults() -> Self {
        let mut occupants = EndUseSpec::new("occupants", ColumnSemantics::Fraction);
        occupants.reference_annual_flh = Some(6020.0);
        occupants.weekday_multipliers = Some([
            1.000, 1.000, 1.000, 1.000, 1.000, 1.000, 1.000, 0.883, 0.409, 0.242, 0.242, 0.242,
            0.242, 0.242, 0.242, 0.242, 0.295, 0.553, 0.897, 0.897, 0.897, 1.000, 1.000, 1.000,
        ]);
        occupants.weekend_multipliers = occupants.weekday_multipliers;

        let mut lighting_interior = EndUseSpec::new("lighting_interior", ColumnSemantics::Fraction);
        lighting_interior.reference_annual_flh = Some(3321.0);
        lighting_interior.weekday_multipliers = Some([
            0.070, 0.070, 0.070, 0.070, 0.210, 0.440, 0.390, 0.360, 0.320, 0.300, 0.300, 0.310,
            0.300, 0.300, 0.310, 0.340, 0.430, 0.600, 0.890, 1.000, 0.940, 0.740, 0.420, 0.160,
        ]);
        lighting_interior.weekend_multipliers = lighting_interior.weekday_multipliers;
        lighting_interior.monthly_multipliers = Some([
            1.075, 1.065, 1.038, 1.000, 0.963, 0.935, 0.925, 0.935, 0.963, 1.000, 1.038, 1.065,
        ]);

        let mut lighting_exterior = EndUseSpec::new("lighting_exterior", ColumnSemantics::Fraction);
        lighting_exterior.reference_annual_flh = Some(2763.0);
        lighting_exterior.monthly_multipliers = lighting_interior.monthly_multipliers;

        let lighting_garage = EndUseSpec::new("lighting_garage", ColumnSemantics::Fraction);

        let mut cooking_range = EndUseSpec::new("cooking_range", ColumnSemantics::Fraction);
        cooking_range.reference_annual_flh = Some(2224.0);
        cooking_range.weekday_multipliers = Some([
            0.030, 0.030, 0.020, 0.020, 0.030, 0.050, 0.110, 0.190, 0.210, 0.220, 0.190, 0.230,
            0.260, 0.210, 0.200, 0.420, 0.680, 1.000, 0.940, 0.670, 0.370, 0.210, 0.130, 0.060,
        ]);
        cooking_range.weekend_multipliers = Some([
            0.040, 0.040, 0.020, 0.020, 0.030, 0.060, 0.090, 0.210, 0.300, 0.320, 0.280, 0.280,
            0.290, 0.240, 0.220, 0.410, 0.650, 1.000, 0.910, 0.640, 0.360, 0.210, 0.130, 0.070,
        ]);

        let mut dishwasher = EndUseSpec::new("dishwasher", ColumnSemantics::Fraction);
        dishwasher.reference_annual_flh = Some(2994.0);

        let mut clothes_washer = EndUseSpec::new("clothes_washer", ColumnSemantics::Fraction);
        clothes_washer.reference_annual_flh = Some(4158.0);

        let mut clothes_dryer = EndUseSpec::new("clothes_dryer", ColumnSemantics::Fraction);
        clothes_dryer.reference_annual_flh = Some(4502.0);

        let mut ceiling_fan = EndUseSpec::new("ceiling_fan", ColumnSemantics::Fraction);
        ceiling_fan.default_strategy = ScheduleStrategy::Analytic;
        ceiling_fan.monthly_multipliers = Some([
            0.0, 0.0, 0.0, 0.3, 0.8, 1.0, 1.0, 1.0, 0.8, 0.3, 0.0, 0.0,
        ]);

        let mut refrigerator = EndUseSpec::new("refrigerator", ColumnSemantics::Fraction);
        refrigerator.supports_unavailable_override = false;
        refrigerator.reference_annual_flh = Some(6673.0);

        let mut extra_refrigerator =
            EndUseSpec::new("extra_refrigerator", ColumnSemantics::Fraction);
        extra_refrigerator.supports_unavailable_override = false;

        let mut freezer = EndUseSpec::new("freezer", ColumnSemantics::Fraction);
        freezer.supports_unavailable_override = false;

        let mut plug_loads_other = EndUseSpec::new("plug_loads_other", ColumnSemantics::Fraction);
        plug_loads_other.reference_annual_flh = Some(5468.0);

        let mut plug_loads_tv = EndUseSpec::new("plug_loads_tv", ColumnSemantics::Fraction);
        plug_loads_tv.reference_annual_flh = Some(2256.0);
        plug_loads_tv.weekday_multipliers = Some([
            0.150, 0.100, 0.070, 0.050, 0.050, 0.070, 0.130, 0.210, 0.240, 0.240, 0.240, 0.250,
            0.270, 0.280, 0.290, 0.330, 0.420, 0.550, 0.750, 0.950, 1.000, 0.900, 0.620, 0.320,
        ]);
        plug_loads_tv.weekend_multipliers = plug_loads_tv.weekday_multipliers;

        let mut hot_water_dishwasher =
            EndUseSpec::new("hot_water_dishwasher", ColumnSemantics::NonNegative);
        hot_water_dishwasher.default_strategy = ScheduleStrategy::File;

        let mut hot_water_clothes_washer =
            EndUseSpec::new("hot_water_clothes_washer", ColumnSemantics::NonNegative);
        hot_water_clothes_washer.default_strategy = ScheduleStrategy::File;

        let mut hot_water_fixtures =
            EndUseSpec::new("hot_water_fixtures", ColumnSemantics::NonNegative);
        hot_water_fixtures.reference_annual_flh = Some(4204.0);

        let mut mech_vent = EndUseSpec::new("mech_vent", ColumnSemantics::Fraction);
        mech_vent.reference_annual_flh = Some(8760.0);

        let natvent = EndUseSpec::new("natvent", ColumnSemantics::Fraction);

        Self {
            end_uses: vec![
                occupants,
                lighting_interior,
                lighting_exterior,
                lighting_garage,
                cooking_range,
                dishwasher,
                clothes_washer,
                clothes_dryer,
                ceiling_fan,
                refrigerator,
                extra_refrigerator,
                freezer,
                plug_loads_other,
                plug_loads_tv,
                hot_water_dishwasher,
                hot_water_clothes_washer,
                hot_water_fixtures,
                mech_vent,
                natvent,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_lookup() {
        let config = ScheduleConfig::residential_defaults();
        assert!(config.is_recognized("occupants"));
        assert!(config.is_recognized("hot_water_fixtures"));
        assert!(!config.is_recognized("jacuzzi"));
    }

    #[test]
    fn refrigerator_is_exempt_from_overrides() {
        let config = ScheduleConfig::residential_defaults();
        assert!(!config.end_use("refrigerator").unwrap().supports_unavailable_override);
        assert!(config.end_use("occupants").unwrap().supports_unavailable_override);
    }

    #[test]
    fn hot_water_columns_are_flow_semantics() {
        let config = ScheduleConfig::residential_defaults();
        for name in [
            "hot_water_dishwasher",
            "hot_water_clothes_washer",
            "hot_water_fixtures",
        ] {
            assert_eq!(
                config.end_use(name).unwrap().semantics,
                ColumnSemantics::NonNegative,
                "{name}"
            );
        }
        assert_eq!(
            config.end_use("occupants").unwrap().semantics,
            ColumnSemantics::Fraction
        );
    }

    #[test]
    fn config_from_toml() {
        let toml_src = r#"
            [[end_uses]]
            name = "occupants"
            semantics = "fraction"
            supports_unavailable_override = true
            default_strategy = "multiplier_table"
            reference_annual_flh = 6020.0

            [[end_uses]]
            name = "hot_water_fixtures"
            semantics = "non_negative"
            supports_unavailable_override = true
            default_strategy = "file"
        "#;
        let config = ScheduleConfig::from_toml_str(toml_src).unwrap();
        assert_eq!(config.end_uses.len(), 2);
        assert_eq!(
            config.end_use("occupants").unwrap().reference_annual_flh,
            Some(6020.0)
        );
        assert_eq!(
            config.end_use("hot_water_fixtures").unwrap().default_strategy,
            ScheduleStrategy::File
        );
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = ScheduleConfig::residential_defaults();
        let serialized = toml::to_string(&config).unwrap();
        let back = ScheduleConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(back, config);
    }
}
