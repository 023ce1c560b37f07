use gridline_types::DetectionRule;
use regex::Regex;
use std::collections::HashMap;

/// Decide whether a widget is active for this render.
///
/// `force` short-circuits everything; with no rule and no force a widget
/// is active by default (opt-out model). Rule evaluation probes the
/// declared variables in order: the first one that is present in the
/// environment snapshot and satisfies the matcher activates the rule.
/// A present variable that fails the matcher does not end the search.
pub fn is_active(
    rule: Option<&DetectionRule>,
    force: Option<bool>,
    env: &HashMap<String, String>,
) -> bool {
    if let Some(forced) = force {
        return forced;
    }

    let Some(rule) = rule else {
        return true;
    };

    rule.env
        .names()
        .iter()
        .any(|name| env.get(*name).is_some_and(|value| matches(rule, value)))
}

/// Apply the rule's matcher to one present variable value. Precedence
/// when several matchers are declared: equals > contains > pattern.
/// No matcher declared means existence alone suffices.
fn matches(rule: &DetectionRule, value: &str) -> bool {
    if let Some(expected) = &rule.equals {
        return value == expected;
    }
    if let Some(needle) = &rule.contains {
        return value.contains(needle);
    }
    if let Some(pattern) = &rule.pattern {
        // Full match; a malformed pattern is an unsatisfied matcher.
        return Regex::new(&format!("^(?:{})$", pattern))
            .map(|re| re.is_match(value))
            .unwrap_or(false);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_types::EnvProbe;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rule(names: &[&str]) -> DetectionRule {
        DetectionRule {
            env: EnvProbe::Many(names.iter().map(|n| n.to_string()).collect()),
            equals: None,
            contains: None,
            pattern: None,
        }
    }

    #[test]
    fn test_force_overrides_everything() {
        let mut gated = rule(&["NEVER_SET"]);
        gated.equals = Some("x".to_string());

        assert!(is_active(Some(&gated), Some(true), &env(&[])));
        assert!(!is_active(
            Some(&rule(&["HOME"])),
            Some(false),
            &env(&[("HOME", "/root")])
        ));
    }

    #[test]
    fn test_no_rule_no_force_is_active() {
        assert!(is_active(None, None, &env(&[])));
    }

    #[test]
    fn test_existence_alone_suffices_without_matcher() {
        let r = rule(&["KUBECONFIG"]);
        assert!(is_active(Some(&r), None, &env(&[("KUBECONFIG", "")])));
        assert!(!is_active(Some(&r), None, &env(&[])));
    }

    #[test]
    fn test_equals_probes_variables_in_order() {
        let mut r = rule(&["A", "B"]);
        r.equals = Some("x".to_string());

        // A unset, B matches.
        assert!(is_active(Some(&r), None, &env(&[("B", "x")])));
        // A present but wrong, B unset.
        assert!(!is_active(Some(&r), None, &env(&[("A", "y")])));
        // A present but wrong, B matches: search continues past the miss.
        assert!(is_active(Some(&r), None, &env(&[("A", "y"), ("B", "x")])));
    }

    #[test]
    fn test_contains_matcher() {
        let mut r = rule(&["TERM"]);
        r.contains = Some("256".to_string());
        assert!(is_active(Some(&r), None, &env(&[("TERM", "xterm-256color")])));
        assert!(!is_active(Some(&r), None, &env(&[("TERM", "dumb")])));
    }

    #[test]
    fn test_pattern_is_full_match() {
        let mut r = rule(&["CI"]);
        r.pattern = Some("true|1".to_string());
        assert!(is_active(Some(&r), None, &env(&[("CI", "true")])));
        assert!(is_active(Some(&r), None, &env(&[("CI", "1")])));
        assert!(!is_active(Some(&r), None, &env(&[("CI", "untrue")])));
    }

    #[test]
    fn test_malformed_pattern_is_inactive() {
        let mut r = rule(&["CI"]);
        r.pattern = Some("(unclosed".to_string());
        assert!(!is_active(Some(&r), None, &env(&[("CI", "anything")])));
    }

    #[test]
    fn test_matcher_precedence_equals_first() {
        let mut r = rule(&["X"]);
        r.equals = Some("exact".to_string());
        r.contains = Some("ex".to_string());
        assert!(!is_active(Some(&r), None, &env(&[("X", "exactly")])));
        assert!(is_active(Some(&r), None, &env(&[("X", "exact")])));
    }
}
