use super::*;

fn env_with(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        vars.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_no_color_environment_variable() {
    let color = env_with(&[("NO_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_environment_variable() {
    let color = env_with(&[("FORCE_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let env_config = env_with(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR=1 wins over NO_COLOR and CLICOLOR
    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Always
    );
}

#[test]
fn test_ci_environment_variable() {
    let env_config = env_with(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(
        env_config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Never
    );
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env_with(&[("NO_COLOR", "")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env_with(&[("FORCE_COLOR", "invalid")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables() {
    let color = env_with(&[("CLICOLOR", "0")]).apply_color_config(ColorIntent::Always);
    assert_eq!(color, ColorIntent::Never);
}
