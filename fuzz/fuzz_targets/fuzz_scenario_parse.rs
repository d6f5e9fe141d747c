#![no_main]

use dilemma::config::{doge_audit, shadow_government};
use dilemma::game::{EFFECT_MAX, EFFECT_MIN, Label, ValidationPolicy, parse_scenario};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    for config in [doge_audit(), shadow_government()] {
        for policy in [ValidationPolicy::Repair, ValidationPolicy::Reject] {
            let Ok(scenario) = parse_scenario(raw, &config.metrics, policy) else {
                continue;
            };

            // Accepted scenarios are complete and in range
            for label in Label::ALL {
                let choice = scenario.choice(label);
                for metric in &config.metrics {
                    let effect = choice.effect(&metric.key);
                    if policy == ValidationPolicy::Repair {
                        assert!((EFFECT_MIN..=EFFECT_MAX).contains(&effect));
                    }
                }
            }

            // Re-encoding an accepted scenario must be accepted again
            let encoded = serde_json::to_string(&scenario).unwrap_or_default();
            assert!(parse_scenario(&encoded, &config.metrics, ValidationPolicy::Repair).is_ok());
        }
    }
});
