use crate::domain::constants::{DEFAULT_RANGE_STEP, STEP_EPSILON};
use crate::domain::models::{Finding, FindingKind, RangeSetting, ValidationResult};
use crate::services::config::{Comparison, FractionalSteps, RangePolicy};
use serde_json::Value;

/// Checks `type: "range"` declarations against the slider step limit and bounds.
#[derive(Debug, Clone)]
pub struct RangeSettingValidator {
    policy: RangePolicy,
}

impl RangeSettingValidator {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RangePolicy {
        &self.policy
    }

    /// Validates a raw setting declaration. Non-range declarations pass untouched.
    ///
    /// Field paths in the returned findings are relative to the declaration
    /// (`step`, `default`, ...).
    pub fn validate(&self, decl: &Value) -> ValidationResult {
        if decl.get("type").and_then(Value::as_str) != Some("range") {
            return ValidationResult::Pass;
        }
        match parse_range(decl) {
            Ok(parsed) => {
                let mut findings = parsed.field_findings;
                findings.extend(self.validate_setting(&parsed.setting).into_findings());
                ValidationResult::from_findings(findings)
            }
            Err(findings) => ValidationResult::Findings(findings),
        }
    }

    pub fn validate_setting(&self, s: &RangeSetting) -> ValidationResult {
        let mut findings = Vec::new();
        let label = setting_label(s);

        if s.step <= 0.0 {
            findings.push(
                Finding::new(
                    FindingKind::NonPositiveStep,
                    format!("{} has step {}; step must be greater than 0", label, fmt_num(s.step)),
                )
                .at("step"),
            );
        } else if let Some(f) = self.check_step_count(s, &label) {
            findings.push(f);
        }

        if let Some(default) = s.default {
            if default < s.min || default > s.max {
                findings.push(
                    Finding::new(
                        FindingKind::DefaultOutOfBounds,
                        format!(
                            "{} default {} is outside [{}, {}]",
                            label,
                            fmt_num(default),
                            fmt_num(s.min),
                            fmt_num(s.max)
                        ),
                    )
                    .at("default"),
                );
            } else if s.step > 0.0 && !is_whole((default - s.min) / s.step) {
                findings.push(
                    Finding::new(
                        FindingKind::DefaultOffStep,
                        format!(
                            "{} default {} is not reachable from min {} in steps of {}",
                            label,
                            fmt_num(default),
                            fmt_num(s.min),
                            fmt_num(s.step)
                        ),
                    )
                    .at("default"),
                );
            }
        }

        ValidationResult::from_findings(findings)
    }

    /// Raw `(max - min) / step`, or `None` when `step` is not positive.
    pub fn step_count(&self, s: &RangeSetting) -> Option<f64> {
        if s.step <= 0.0 {
            return None;
        }
        Some((s.max - s.min) / s.step)
    }

    fn check_step_count(&self, s: &RangeSetting, label: &str) -> Option<Finding> {
        let raw = (s.max - s.min) / s.step;
        let limit = self.policy.max_steps;
        let remedy = format!(
            "reduce step count below {} by increasing `step` or narrowing `max - min`",
            limit
        );
        let finding = |message: String| {
            Finding::new(FindingKind::InvalidStepCount, message)
                .at("step")
                .with_remedy(remedy.clone())
        };

        if s.max < s.min {
            return Some(finding(format!(
                "{} has max {} below min {}",
                label,
                fmt_num(s.max),
                fmt_num(s.min)
            )));
        }

        let count = if is_whole(raw) {
            raw.round()
        } else {
            match self.policy.fractional_steps {
                FractionalSteps::Reject => {
                    return Some(finding(format!(
                        "{} has a fractional step count: ({} - {}) / {} = {:.2}",
                        label,
                        fmt_num(s.max),
                        fmt_num(s.min),
                        fmt_num(s.step),
                        raw
                    )));
                }
                FractionalSteps::Floor => raw.floor(),
                FractionalSteps::Ceil => raw.ceil(),
            }
        };

        let limit_f = f64::from(limit);
        let over = match self.policy.comparison {
            Comparison::Inclusive => count > limit_f,
            Comparison::Strict => count >= limit_f,
        };
        if over {
            let op = match self.policy.comparison {
                Comparison::Inclusive => "<=",
                Comparison::Strict => "<",
            };
            return Some(finding(format!(
                "{} violates (max - min) / step {} {}: ({} - {}) / {} = {}",
                label,
                op,
                limit,
                fmt_num(s.max),
                fmt_num(s.min),
                fmt_num(s.step),
                fmt_num(count)
            )));
        }
        None
    }
}

/// A readable range declaration plus problems with its optional fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRange {
    pub setting: RangeSetting,
    pub field_findings: Vec<Finding>,
}

/// Reads bounds out of a range declaration. `step` falls back to the platform default.
///
/// Fails only when `min`, `max` or `step` cannot be read. A non-numeric `default`
/// is reported and dropped so the step checks still run.
pub fn parse_range(decl: &Value) -> Result<ParsedRange, Vec<Finding>> {
    let mut fatal = Vec::new();
    let min = read_number(decl, "min", true, &mut fatal);
    let max = read_number(decl, "max", true, &mut fatal);
    let step = read_number(decl, "step", false, &mut fatal);

    let mut field_findings = Vec::new();
    let default = read_number(decl, "default", false, &mut field_findings);

    match (min, max) {
        (Some(min), Some(max)) if fatal.is_empty() => Ok(ParsedRange {
            setting: RangeSetting {
                id: decl.get("id").and_then(Value::as_str).map(str::to_string),
                min,
                max,
                step: step.unwrap_or(DEFAULT_RANGE_STEP),
                unit: decl.get("unit").and_then(Value::as_str).map(str::to_string),
                default,
            },
            field_findings,
        }),
        _ => {
            fatal.extend(field_findings);
            Err(fatal)
        }
    }
}

fn read_number(decl: &Value, key: &str, required: bool, findings: &mut Vec<Finding>) -> Option<f64> {
    match decl.get(key) {
        None | Some(Value::Null) => {
            if required {
                findings.push(
                    Finding::new(
                        FindingKind::InvalidField,
                        format!("range setting is missing required `{}`", key),
                    )
                    .at(key),
                );
            }
            None
        }
        Some(v) => {
            let n = v.as_f64();
            if n.is_none() {
                findings.push(
                    Finding::new(
                        FindingKind::InvalidField,
                        format!("range setting `{}` must be a number, got {}", key, v),
                    )
                    .at(key),
                );
            }
            n
        }
    }
}

pub fn is_whole(x: f64) -> bool {
    x.is_finite() && (x - x.round()).abs() <= STEP_EPSILON * x.abs().max(1.0)
}

/// Formats whole numbers without a trailing `.0`.
pub fn fmt_num(x: f64) -> String {
    if is_whole(x) && x.abs() < 1e15 {
        format!("{}", x.round() as i64)
    } else {
        format!("{}", x)
    }
}

fn setting_label(s: &RangeSetting) -> String {
    match &s.id {
        Some(id) => format!("range setting '{}'", id),
        None => "range setting".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn validator() -> RangeSettingValidator {
        RangeSettingValidator::new(RangePolicy::default())
    }

    fn kinds(r: &ValidationResult) -> Vec<FindingKind> {
        r.findings().iter().map(|f| f.kind).collect()
    }

    #[test]
    fn twenty_five_steps_pass() {
        let r = validator().validate(&json!({
            "type": "range", "id": "gap", "min": 0, "max": 100, "step": 4, "default": 64
        }));
        assert!(r.is_pass(), "{:?}", r);
    }

    #[test]
    fn one_hundred_steps_pass() {
        let r = validator().validate(&json!({
            "type": "range", "min": 0, "max": 100, "step": 1, "default": 50
        }));
        assert!(r.is_pass(), "{:?}", r);
    }

    #[test]
    fn thousand_steps_fail() {
        let r = validator().validate(&json!({
            "type": "range", "id": "count", "min": 0, "max": 1000, "step": 1
        }));
        assert_eq!(kinds(&r), vec![FindingKind::InvalidStepCount]);
        let f = &r.findings()[0];
        assert_eq!(f.field.as_deref(), Some("step"));
        assert!(f.message.contains("= 1000"), "{}", f.message);
        assert!(f.remedy.contains("below 101"));
    }

    #[test]
    fn zero_step_fails_without_step_count_finding() {
        let r = validator().validate(&json!({
            "type": "range", "min": 0, "max": 50, "step": 0, "default": 10
        }));
        assert_eq!(kinds(&r), vec![FindingKind::NonPositiveStep]);
    }

    #[test]
    fn negative_step_fails() {
        let r = validator().validate(&json!({
            "type": "range", "min": 0, "max": 50, "step": -5
        }));
        assert_eq!(kinds(&r), vec![FindingKind::NonPositiveStep]);
    }

    #[test]
    fn default_below_min_fails() {
        let r = validator().validate(&json!({
            "type": "range", "min": 10, "max": 20, "step": 2, "default": 5
        }));
        assert_eq!(kinds(&r), vec![FindingKind::DefaultOutOfBounds]);
        assert_eq!(r.findings()[0].field.as_deref(), Some("default"));
    }

    #[test]
    fn missing_default_raises_nothing() {
        let r = validator().validate(&json!({
            "type": "range", "min": 10, "max": 20, "step": 2
        }));
        assert!(r.is_pass());
    }

    #[test]
    fn off_step_default_is_only_a_warning() {
        let r = validator().validate(&json!({
            "type": "range", "min": 0, "max": 100, "step": 4, "default": 63
        }));
        assert_eq!(kinds(&r), vec![FindingKind::DefaultOffStep]);
        assert!(r.succeeded());
    }

    #[test]
    fn non_range_declarations_pass() {
        let r = validator().validate(&json!({"type": "text", "id": "title", "min": "x"}));
        assert!(r.is_pass());
    }

    #[test]
    fn missing_step_defaults_to_one() {
        let s = parse_range(&json!({"type": "range", "min": 0, "max": 10}))
            .unwrap()
            .setting;
        assert_eq!(s.step, 1.0);
        assert!(validator().validate_setting(&s).is_pass());
    }

    #[test]
    fn non_numeric_default_keeps_step_checks() {
        let r = validator().validate(&json!({
            "type": "range", "id": "n", "min": 0, "max": 1000, "step": 1, "default": "10"
        }));
        assert_eq!(
            kinds(&r),
            vec![FindingKind::InvalidField, FindingKind::InvalidStepCount]
        );
        assert_eq!(r.findings()[0].field.as_deref(), Some("default"));
    }

    #[test]
    fn non_numeric_step_is_fatal() {
        let errs = parse_range(&json!({"type": "range", "min": 0, "max": 10, "step": "1"}))
            .unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field.as_deref(), Some("step"));
    }

    #[test]
    fn missing_bounds_are_invalid_fields() {
        let errs = parse_range(&json!({"type": "range", "max": "ten"})).unwrap_err();
        let fields: Vec<_> = errs.iter().filter_map(|f| f.field.as_deref()).collect();
        assert_eq!(fields, vec!["min", "max"]);
        assert!(errs.iter().all(|f| f.kind == FindingKind::InvalidField));
    }

    #[test]
    fn inverted_bounds_fail_step_count() {
        let r = validator().validate(&json!({"type": "range", "min": 10, "max": 0, "step": 1}));
        assert_eq!(kinds(&r), vec![FindingKind::InvalidStepCount]);
        assert!(r.findings()[0].message.contains("below min"));
    }

    #[test]
    fn fractional_step_count_follows_policy() {
        let decl = json!({"type": "range", "min": 0, "max": 10, "step": 3});
        assert_eq!(kinds(&validator().validate(&decl)), vec![FindingKind::InvalidStepCount]);

        for mode in [FractionalSteps::Floor, FractionalSteps::Ceil] {
            let v = RangeSettingValidator::new(RangePolicy {
                fractional_steps: mode,
                ..RangePolicy::default()
            });
            assert!(v.validate(&decl).is_pass(), "{:?}", mode);
        }
    }

    #[test]
    fn ceil_can_push_a_count_over_the_limit() {
        let decl = json!({"type": "range", "min": 0, "max": 101.5, "step": 1});
        let floor = RangeSettingValidator::new(RangePolicy {
            fractional_steps: FractionalSteps::Floor,
            ..RangePolicy::default()
        });
        let ceil = RangeSettingValidator::new(RangePolicy {
            fractional_steps: FractionalSteps::Ceil,
            ..RangePolicy::default()
        });
        assert!(floor.validate(&decl).is_pass());
        assert!(ceil.validate(&decl).has_kind(FindingKind::InvalidStepCount));
    }

    #[test]
    fn strict_comparison_rejects_the_limit_itself() {
        let decl = json!({"type": "range", "min": 0, "max": 101, "step": 1});
        assert!(validator().validate(&decl).is_pass());

        let strict = RangeSettingValidator::new(RangePolicy {
            comparison: Comparison::Strict,
            ..RangePolicy::default()
        });
        assert!(strict.validate(&decl).has_kind(FindingKind::InvalidStepCount));
    }

    #[test]
    fn float_noise_does_not_make_counts_fractional() {
        let r = validator().validate(&json!({
            "type": "range", "min": 0.1, "max": 1.0, "step": 0.1, "default": 0.3
        }));
        assert!(r.is_pass(), "{:?}", r);
    }

    #[test]
    fn fmt_num_trims_whole_numbers() {
        assert_eq!(fmt_num(4.0), "4");
        assert_eq!(fmt_num(-2.0), "-2");
        assert_eq!(fmt_num(0.5), "0.5");
    }

    fn config() -> ProptestConfig {
        ProptestConfig {
            cases: std::env::var("PROPTEST_CASES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
            failure_persistence: None,
            ..ProptestConfig::default()
        }
    }

    proptest! {
        #![proptest_config(config())]

        #[test]
        fn whole_counts_within_limit_pass(
            min in -500i32..500,
            step in 1i32..50,
            count in 0u32..=101,
            k in 0u32..=101,
        ) {
            let k = k.min(count);
            let max = min as i64 + (count as i64) * step as i64;
            let default = min as i64 + (k as i64) * step as i64;
            let r = validator().validate(&json!({
                "type": "range", "min": min, "max": max, "step": step, "default": default
            }));
            prop_assert!(r.is_pass(), "{:?}", r);
        }

        #[test]
        fn counts_over_limit_fail(
            min in -500i32..500,
            step in 1i32..50,
            count in 102u32..5000,
        ) {
            let max = min as i64 + (count as i64) * step as i64;
            let r = validator().validate(&json!({
                "type": "range", "min": min, "max": max, "step": step
            }));
            prop_assert!(r.has_kind(FindingKind::InvalidStepCount));
        }

        #[test]
        fn non_positive_steps_fail(
            min in -500i32..500,
            span in 0i32..500,
            step in -50i32..=0,
        ) {
            let r = validator().validate(&json!({
                "type": "range", "min": min, "max": min + span, "step": step
            }));
            prop_assert!(r.has_kind(FindingKind::NonPositiveStep));
            prop_assert!(!r.has_kind(FindingKind::InvalidStepCount));
        }

        #[test]
        fn defaults_outside_bounds_fail(
            min in -500i32..500,
            span in 0i32..100,
            offset in 1i32..1000,
            below in any::<bool>(),
        ) {
            let max = min + span;
            let default = if below { min - offset } else { max + offset };
            let r = validator().validate(&json!({
                "type": "range", "min": min, "max": max, "step": 1, "default": default
            }));
            prop_assert!(r.has_kind(FindingKind::DefaultOutOfBounds));
        }

        #[test]
        fn absent_default_never_out_of_bounds(
            min in -500i32..500,
            span in 0i32..5000,
            step in -5i32..50,
        ) {
            let r = validator().validate(&json!({
                "type": "range", "min": min, "max": min + span, "step": step
            }));
            prop_assert!(!r.has_kind(FindingKind::DefaultOutOfBounds));
        }
    }
}
