//! Phone specification features and their input domains

use anyhow::{bail, Context, Result};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 20;

/// Column order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "battery_power",
    "blue",
    "clock_speed",
    "dual_sim",
    "fc",
    "four_g",
    "int_memory",
    "m_dep",
    "mobile_wt",
    "n_cores",
    "pc",
    "px_height",
    "px_width",
    "ram",
    "sc_h",
    "sc_w",
    "talk_time",
    "three_g",
    "touch_screen",
    "wifi",
];

/// Valid values for a single feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureDomain {
    /// Binary choice encoded as 0 / 1
    Flag,
    /// Whole numbers in `min..=max`, adjusted by `step`
    Count { min: u32, max: u32, step: u32 },
    /// Decimal measurement in `min..=max`, adjusted by `step`
    Measure { min: f32, max: f32, step: f32 },
}

impl FeatureDomain {
    /// Whether `value` is a legal value for this domain.
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            FeatureDomain::Flag => value == 0.0 || value == 1.0,
            FeatureDomain::Count { min, max, .. } => {
                value.fract() == 0.0 && value >= min as f64 && value <= max as f64
            }
            FeatureDomain::Measure { min, max, .. } => {
                // tolerate f32 round-off at the bounds
                value >= min as f64 - 1e-6 && value <= max as f64 + 1e-6
            }
        }
    }

    /// Clamp and round `value` onto the domain.
    pub fn coerce(&self, value: f64) -> f64 {
        match *self {
            FeatureDomain::Flag => {
                if value >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            FeatureDomain::Count { min, max, .. } => value.round().clamp(min as f64, max as f64),
            FeatureDomain::Measure { min, max, .. } => {
                let rounded = (value * 10.0).round() / 10.0;
                rounded.clamp(min as f64, max as f64)
            }
        }
    }

    /// Increment used by one slider tick.
    pub fn step(&self) -> f64 {
        match *self {
            FeatureDomain::Flag => 1.0,
            FeatureDomain::Count { step, .. } => step as f64,
            FeatureDomain::Measure { step, .. } => step as f64,
        }
    }

    /// `(min, max)` as floats.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            FeatureDomain::Flag => (0.0, 1.0),
            FeatureDomain::Count { min, max, .. } => (min as f64, max as f64),
            FeatureDomain::Measure { min, max, .. } => (min as f64, max as f64),
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, FeatureDomain::Flag)
    }
}

/// Input panel a feature is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    Connectivity,
    DisplayCamera,
    Performance,
    BatteryBuild,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 4] = [
        FeatureGroup::Connectivity,
        FeatureGroup::DisplayCamera,
        FeatureGroup::Performance,
        FeatureGroup::BatteryBuild,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FeatureGroup::Connectivity => "Connectivity Features",
            FeatureGroup::DisplayCamera => "Display & Camera",
            FeatureGroup::Performance => "Performance",
            FeatureGroup::BatteryBuild => "Battery & Build",
        }
    }

    /// Features in this group, in display order.
    pub fn features(&self) -> &'static [Feature] {
        match self {
            FeatureGroup::Connectivity => &[
                Feature::Blue,
                Feature::DualSim,
                Feature::FourG,
                Feature::ThreeG,
                Feature::Wifi,
            ],
            FeatureGroup::DisplayCamera => &[
                Feature::PxHeight,
                Feature::PxWidth,
                Feature::ScH,
                Feature::ScW,
                Feature::TouchScreen,
                Feature::Fc,
                Feature::Pc,
            ],
            FeatureGroup::Performance => &[
                Feature::ClockSpeed,
                Feature::NCores,
                Feature::Ram,
                Feature::IntMemory,
            ],
            FeatureGroup::BatteryBuild => &[
                Feature::BatteryPower,
                Feature::TalkTime,
                Feature::MobileWt,
                Feature::MDep,
            ],
        }
    }
}

/// One model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    BatteryPower,
    Blue,
    ClockSpeed,
    DualSim,
    Fc,
    FourG,
    IntMemory,
    MDep,
    MobileWt,
    NCores,
    Pc,
    PxHeight,
    PxWidth,
    Ram,
    ScH,
    ScW,
    TalkTime,
    ThreeG,
    TouchScreen,
    Wifi,
}

impl Feature {
    /// All features in model column order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::BatteryPower,
        Feature::Blue,
        Feature::ClockSpeed,
        Feature::DualSim,
        Feature::Fc,
        Feature::FourG,
        Feature::IntMemory,
        Feature::MDep,
        Feature::MobileWt,
        Feature::NCores,
        Feature::Pc,
        Feature::PxHeight,
        Feature::PxWidth,
        Feature::Ram,
        Feature::ScH,
        Feature::ScW,
        Feature::TalkTime,
        Feature::ThreeG,
        Feature::TouchScreen,
        Feature::Wifi,
    ];

    /// Column name as used by the trained model.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::BatteryPower => "battery_power",
            Feature::Blue => "blue",
            Feature::ClockSpeed => "clock_speed",
            Feature::DualSim => "dual_sim",
            Feature::Fc => "fc",
            Feature::FourG => "four_g",
            Feature::IntMemory => "int_memory",
            Feature::MDep => "m_dep",
            Feature::MobileWt => "mobile_wt",
            Feature::NCores => "n_cores",
            Feature::Pc => "pc",
            Feature::PxHeight => "px_height",
            Feature::PxWidth => "px_width",
            Feature::Ram => "ram",
            Feature::ScH => "sc_h",
            Feature::ScW => "sc_w",
            Feature::TalkTime => "talk_time",
            Feature::ThreeG => "three_g",
            Feature::TouchScreen => "touch_screen",
            Feature::Wifi => "wifi",
        }
    }

    /// Human-readable control label.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::BatteryPower => "Battery Power (mAh)",
            Feature::Blue => "Bluetooth",
            Feature::ClockSpeed => "Clock Speed (GHz)",
            Feature::DualSim => "Dual SIM",
            Feature::Fc => "Front Camera (MP)",
            Feature::FourG => "4G",
            Feature::IntMemory => "Internal Memory (GB)",
            Feature::MDep => "Mobile Depth (cm)",
            Feature::MobileWt => "Weight (g)",
            Feature::NCores => "CPU Cores",
            Feature::Pc => "Primary Camera (MP)",
            Feature::PxHeight => "Pixel Height",
            Feature::PxWidth => "Pixel Width",
            Feature::Ram => "RAM (MB)",
            Feature::ScH => "Screen Height (cm)",
            Feature::ScW => "Screen Width (cm)",
            Feature::TalkTime => "Talk Time (h)",
            Feature::ThreeG => "3G",
            Feature::TouchScreen => "Touch Screen",
            Feature::Wifi => "WiFi",
        }
    }

    pub fn domain(&self) -> FeatureDomain {
        use FeatureDomain::{Count, Flag, Measure};
        match self {
            Feature::BatteryPower => Count { min: 500, max: 5000, step: 50 },
            Feature::ClockSpeed => Measure { min: 0.5, max: 3.0, step: 0.1 },
            Feature::Fc => Count { min: 0, max: 20, step: 1 },
            Feature::IntMemory => Count { min: 2, max: 256, step: 2 },
            Feature::MDep => Measure { min: 0.1, max: 1.0, step: 0.1 },
            Feature::MobileWt => Count { min: 80, max: 250, step: 1 },
            Feature::NCores => Count { min: 1, max: 8, step: 1 },
            Feature::Pc => Count { min: 0, max: 50, step: 1 },
            Feature::PxHeight => Count { min: 0, max: 3000, step: 10 },
            Feature::PxWidth => Count { min: 300, max: 3000, step: 10 },
            Feature::Ram => Count { min: 256, max: 8000, step: 64 },
            Feature::ScH => Count { min: 5, max: 20, step: 1 },
            Feature::ScW => Count { min: 0, max: 18, step: 1 },
            Feature::TalkTime => Count { min: 2, max: 30, step: 1 },
            Feature::Blue
            | Feature::DualSim
            | Feature::FourG
            | Feature::ThreeG
            | Feature::TouchScreen
            | Feature::Wifi => Flag,
        }
    }

    pub fn group(&self) -> FeatureGroup {
        FeatureGroup::ALL
            .into_iter()
            .find(|g| g.features().contains(self))
            .unwrap_or(FeatureGroup::Connectivity)
    }

    /// Position of this feature in the model input.
    pub fn column(&self) -> usize {
        *self as usize
    }
}

/// Smartphone specification as entered by the user.
///
/// Fields are typed by what they measure; [`FeatureExtractor`](crate::FeatureExtractor)
/// turns them into the model's column layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneSpecs {
    /// Total energy capacity (mAh)
    pub battery_power: u32,
    /// Has Bluetooth
    #[serde(deserialize_with = "flag_from_json")]
    pub blue: bool,
    /// Processor speed (GHz)
    pub clock_speed: f32,
    /// Supports dual SIM
    #[serde(deserialize_with = "flag_from_json")]
    pub dual_sim: bool,
    /// Front camera megapixels
    pub fc: u32,
    /// Has 4G
    #[serde(deserialize_with = "flag_from_json")]
    pub four_g: bool,
    /// Internal storage (GB)
    pub int_memory: u32,
    /// Mobile depth (cm)
    pub m_dep: f32,
    /// Weight (g)
    pub mobile_wt: u32,
    /// CPU cores
    pub n_cores: u32,
    /// Primary camera megapixels
    pub pc: u32,
    /// Pixel resolution height
    pub px_height: u32,
    /// Pixel resolution width
    pub px_width: u32,
    /// RAM (MB)
    pub ram: u32,
    /// Screen height (cm)
    pub sc_h: u32,
    /// Screen width (cm)
    pub sc_w: u32,
    /// Maximum talk time (hours)
    pub talk_time: u32,
    /// Has 3G
    #[serde(deserialize_with = "flag_from_json")]
    pub three_g: bool,
    /// Has touch screen
    #[serde(deserialize_with = "flag_from_json")]
    pub touch_screen: bool,
    /// Has WiFi
    #[serde(deserialize_with = "flag_from_json")]
    pub wifi: bool,
}

impl Default for PhoneSpecs {
    fn default() -> Self {
        Self {
            battery_power: 1500,
            blue: true,
            clock_speed: 1.5,
            dual_sim: true,
            fc: 5,
            four_g: true,
            int_memory: 32,
            m_dep: 0.5,
            mobile_wt: 150,
            n_cores: 4,
            pc: 12,
            px_height: 800,
            px_width: 1200,
            ram: 2048,
            sc_h: 12,
            sc_w: 7,
            talk_time: 10,
            three_g: true,
            touch_screen: true,
            wifi: true,
        }
    }
}

/// Accepts a yes/no feature written as `true`/`false` or as `0`/`1`.
fn flag_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or the integer 0 or 1")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

fn flag(v: bool) -> f64 {
    if v {
        1.0
    } else {
        0.0
    }
}

impl PhoneSpecs {
    /// Current value of `feature` as a number (flags read as 0 / 1).
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::BatteryPower => self.battery_power as f64,
            Feature::Blue => flag(self.blue),
            Feature::ClockSpeed => self.clock_speed as f64,
            Feature::DualSim => flag(self.dual_sim),
            Feature::Fc => self.fc as f64,
            Feature::FourG => flag(self.four_g),
            Feature::IntMemory => self.int_memory as f64,
            Feature::MDep => self.m_dep as f64,
            Feature::MobileWt => self.mobile_wt as f64,
            Feature::NCores => self.n_cores as f64,
            Feature::Pc => self.pc as f64,
            Feature::PxHeight => self.px_height as f64,
            Feature::PxWidth => self.px_width as f64,
            Feature::Ram => self.ram as f64,
            Feature::ScH => self.sc_h as f64,
            Feature::ScW => self.sc_w as f64,
            Feature::TalkTime => self.talk_time as f64,
            Feature::ThreeG => flag(self.three_g),
            Feature::TouchScreen => flag(self.touch_screen),
            Feature::Wifi => flag(self.wifi),
        }
    }

    /// Set `feature`, coercing `value` onto its domain.
    pub fn set(&mut self, feature: Feature, value: f64) {
        let v = feature.domain().coerce(value);
        let on = v >= 0.5;
        match feature {
            Feature::BatteryPower => self.battery_power = v as u32,
            Feature::Blue => self.blue = on,
            Feature::ClockSpeed => self.clock_speed = v as f32,
            Feature::DualSim => self.dual_sim = on,
            Feature::Fc => self.fc = v as u32,
            Feature::FourG => self.four_g = on,
            Feature::IntMemory => self.int_memory = v as u32,
            Feature::MDep => self.m_dep = v as f32,
            Feature::MobileWt => self.mobile_wt = v as u32,
            Feature::NCores => self.n_cores = v as u32,
            Feature::Pc => self.pc = v as u32,
            Feature::PxHeight => self.px_height = v as u32,
            Feature::PxWidth => self.px_width = v as u32,
            Feature::Ram => self.ram = v as u32,
            Feature::ScH => self.sc_h = v as u32,
            Feature::ScW => self.sc_w = v as u32,
            Feature::TalkTime => self.talk_time = v as u32,
            Feature::ThreeG => self.three_g = on,
            Feature::TouchScreen => self.touch_screen = on,
            Feature::Wifi => self.wifi = on,
        }
    }

    /// Move `feature` by `steps` slider ticks. Flags toggle on any non-zero move.
    pub fn nudge(&mut self, feature: Feature, steps: i32) {
        let domain = feature.domain();
        if domain.is_flag() {
            if steps != 0 {
                self.set(feature, 1.0 - self.get(feature));
            }
            return;
        }
        let next = self.get(feature) + domain.step() * steps as f64;
        self.set(feature, next);
    }

    /// Parse a JSON specification, rejecting values outside their domains.
    ///
    /// Input from a file is not bounded by form controls, so nothing is
    /// clamped here.
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: PhoneSpecs =
            serde_json::from_str(json).context("Failed to parse phone specification")?;

        let out_of_range = specs.check_domains();
        if !out_of_range.is_empty() {
            let names: Vec<&str> = out_of_range.iter().map(|f| f.name()).collect();
            bail!("values outside their allowed range: {}", names.join(", "));
        }
        Ok(specs)
    }

    /// Features whose current value lies outside their domain.
    pub fn check_domains(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| !f.domain().contains(self.get(*f)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_match_columns() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.name(), FEATURE_NAMES[i]);
            assert_eq!(feature.column(), i);
        }
    }

    #[test]
    fn test_groups_cover_every_feature_once() {
        let mut seen: Vec<Feature> = FeatureGroup::ALL
            .iter()
            .flat_map(|g| g.features().iter().copied())
            .collect();
        assert_eq!(seen.len(), FEATURE_COUNT);
        seen.sort_by_key(|f| f.column());
        seen.dedup();
        assert_eq!(seen.len(), FEATURE_COUNT);
        assert_eq!(Feature::Ram.group(), FeatureGroup::Performance);
    }

    #[test]
    fn test_defaults_within_domains() {
        assert!(PhoneSpecs::default().check_domains().is_empty());
    }

    #[test]
    fn test_set_clamps_and_rounds() {
        let mut specs = PhoneSpecs::default();

        specs.set(Feature::ClockSpeed, 9.0);
        assert_eq!(specs.clock_speed, 3.0);

        specs.set(Feature::ClockSpeed, 1.84);
        assert!((specs.clock_speed - 1.8).abs() < 1e-6);

        specs.set(Feature::Ram, 100.0);
        assert_eq!(specs.ram, 256);

        specs.set(Feature::NCores, 3.6);
        assert_eq!(specs.n_cores, 4);

        specs.set(Feature::Wifi, 0.2);
        assert!(!specs.wifi);
    }

    #[test]
    fn test_nudge() {
        let mut specs = PhoneSpecs::default();

        specs.nudge(Feature::BatteryPower, 2);
        assert_eq!(specs.battery_power, 1600);

        specs.nudge(Feature::MDep, -10);
        assert!((specs.m_dep - 0.1).abs() < 1e-6);

        specs.nudge(Feature::Blue, 1);
        assert!(!specs.blue);
        specs.nudge(Feature::Blue, -1);
        assert!(specs.blue);
    }

    const SCENARIO_JSON: &str = r#"{
        "battery_power": 3000, "blue": 1, "clock_speed": 1.8, "dual_sim": 1,
        "fc": 5, "four_g": 1, "int_memory": 32, "m_dep": 0.5, "mobile_wt": 150,
        "n_cores": 4, "pc": 13, "px_height": 800, "px_width": 1200, "ram": 4000,
        "sc_h": 12, "sc_w": 7, "talk_time": 10, "three_g": 1, "touch_screen": 1,
        "wifi": 1
    }"#;

    #[test]
    fn test_from_json_accepts_numeric_flags() {
        let specs = PhoneSpecs::from_json(SCENARIO_JSON).unwrap();
        assert!(specs.blue && specs.dual_sim && specs.four_g);
        assert!(specs.three_g && specs.touch_screen && specs.wifi);
        assert_eq!(specs.ram, 4000);
        assert_eq!(specs.get(Feature::Wifi), 1.0);

        let json = SCENARIO_JSON.replace("\"blue\": 1", "\"blue\": false");
        assert!(!PhoneSpecs::from_json(&json).unwrap().blue);

        let json = SCENARIO_JSON.replace("\"wifi\": 1", "\"wifi\": 0");
        assert!(!PhoneSpecs::from_json(&json).unwrap().wifi);
    }

    #[test]
    fn test_from_json_rejects_bad_flags() {
        for bad in ["2", "-1", "0.5", "\"yes\""] {
            let json = SCENARIO_JSON.replace("\"four_g\": 1", &format!("\"four_g\": {bad}"));
            let err = PhoneSpecs::from_json(&json).unwrap_err();
            assert!(format!("{err:#}").contains("0 or 1"), "{bad}: {err:#}");
        }
    }

    #[test]
    fn test_from_json_rejects_out_of_domain_values() {
        let json = SCENARIO_JSON
            .replace("\"ram\": 4000", "\"ram\": 64")
            .replace("\"n_cores\": 4", "\"n_cores\": 12");
        let err = PhoneSpecs::from_json(&json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "values outside their allowed range: n_cores, ram"
        );
    }

    #[test]
    fn test_check_domains_reports_violations() {
        let specs = PhoneSpecs {
            battery_power: 9000,
            clock_speed: 0.1,
            ..PhoneSpecs::default()
        };
        assert_eq!(
            specs.check_domains(),
            vec![Feature::BatteryPower, Feature::ClockSpeed]
        );
    }
}
