#![cfg(feature = "serde")]

use exprguard::{
    ComparisonPolicy, ConditionNode, ExpressionValidator, ValidatorConfig, conditions, parse,
};

#[test]
fn config_round_trip() {
    let config = ValidatorConfig::default()
        .allow("github.event.issue.body")
        .comparison_policy(ComparisonPolicy::LeftOperand)
        .max_suggestions(5);
    let json = serde_json::to_string(&config).unwrap();
    let back: ValidatorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn policy_uses_snake_case() {
    assert_eq!(
        serde_json::to_string(&ComparisonPolicy::LeftOperand).unwrap(),
        "\"left_operand\""
    );
    let policy: ComparisonPolicy = serde_json::from_str("\"all_operands\"").unwrap();
    assert_eq!(policy, ComparisonPolicy::AllOperands);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let config: ValidatorConfig = serde_json::from_str(
        r#"{ "allowed_expressions": ["github.actor"], "comparison_policy": "left_operand" }"#,
    )
    .unwrap();
    let defaults = ValidatorConfig::default();
    assert_eq!(config.allowed_expressions, vec!["github.actor"]);
    assert_eq!(config.comparison_policy, ComparisonPolicy::LeftOperand);
    assert_eq!(config.dangerous_properties, defaults.dangerous_properties);
    assert_eq!(config.max_suggestions, defaults.max_suggestions);

    let validator = ExpressionValidator::new(config);
    assert!(validator.validate_document("${{ github.actor }}").is_ok());
    assert!(validator.validate_document("${{ github.workflow }}").is_err());
}

#[test]
fn empty_object_is_default_config() {
    let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn condition_tree_round_trip() {
    let trees = [
        parse("(a || !b) && c == 'x'").unwrap(),
        conditions::from_allowed_forks(&["octo/*", "acme/tools"]),
        conditions::detection_succeeded("detection").and(!conditions::not_from_fork()),
    ];
    for tree in trees {
        let json = serde_json::to_string(&tree).unwrap();
        let back: ConditionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.render(), tree.render());
    }
}
