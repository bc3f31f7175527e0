//! Biometric identity verification

use serde::{Deserialize, Serialize};

use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{round_to, DataSource, DataSourceExt};

pub const FACTORS: [&str; 4] = [
    "Face Recognition",
    "Fingerprint",
    "Voice Pattern",
    "Behavioral Typing",
];

/// Minimum match score for a factor to pass
pub const PASS_THRESHOLD: f64 = 85.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricCheck {
    pub factor: String,
    pub match_score: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Biometric;

impl Simulation for Biometric {
    type Record = BiometricCheck;

    fn kind(&self) -> PanelKind {
        PanelKind::Biometric
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(300, 20.0)
    }

    fn generate(&self, _input: &RunInput, source: &mut dyn DataSource) -> Vec<BiometricCheck> {
        FACTORS
            .iter()
            .map(|factor| {
                let match_score = round_to(source.range(72.0, 99.9), 1);
                BiometricCheck {
                    factor: factor.to_string(),
                    match_score,
                    passed: match_score >= PASS_THRESHOLD,
                }
            })
            .collect()
    }

    fn completion_toast(&self, records: &[BiometricCheck]) -> Toast {
        if records.iter().all(|c| c.passed) {
            Toast::info("Identity Verified", "All biometric factors matched")
        } else {
            let failed = records.iter().filter(|c| !c.passed).count();
            Toast::destructive(
                "Verification Failed",
                format!("{} of {} factors below threshold", failed, records.len()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;

    #[test]
    fn test_factors_in_catalogue_order() {
        let checks = Biometric.generate(&RunInput::default(), &mut ScriptedSource::new(vec![0.9, 0.1]));
        let names: Vec<_> = checks.iter().map(|c| c.factor.as_str()).collect();
        assert_eq!(names, FACTORS);
        assert!(checks[0].passed);
        assert!(!checks[1].passed);
    }

    #[test]
    fn test_failed_factor_raises_destructive_toast() {
        let checks = Biometric.generate(&RunInput::default(), &mut ScriptedSource::constant(0.0));
        assert!(Biometric.completion_toast(&checks).is_destructive());

        let checks = Biometric.generate(&RunInput::default(), &mut ScriptedSource::constant(1.0));
        assert!(!Biometric.completion_toast(&checks).is_destructive());
    }
}
