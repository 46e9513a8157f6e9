//! Conditions command

use anyhow::{Result, bail};
use catsel_schema::conditions::{
    CONDITION_REASONS, CONDITION_TYPES, is_condition_reason, is_condition_type,
};

/// What a condition string is known as.
fn classify(value: &str) -> Option<&'static str> {
    if is_condition_type(value) {
        Some("type")
    } else if is_condition_reason(value) {
        Some("reason")
    } else {
        None
    }
}

/// List every condition type and reason, or check the given `values` against them.
pub fn conditions(values: &[String]) -> Result<()> {
    if values.is_empty() {
        println!("Types:");
        for t in CONDITION_TYPES {
            println!("  {t}");
        }
        println!("Reasons:");
        for r in CONDITION_REASONS {
            println!("  {r}");
        }
        return Ok(());
    }

    let mut unknown = Vec::new();
    for value in values {
        match classify(value) {
            Some(kind) => println!("{value}: {kind}"),
            None => {
                println!("{value}: unknown");
                unknown.push(value.as_str());
            }
        }
    }
    if !unknown.is_empty() {
        bail!("Unknown condition value(s): {}", unknown.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("Resolved"), Some("type"));
        assert_eq!(classify("ResolutionFailed"), Some("reason"));
        assert_eq!(classify("resolved"), None);
    }

    #[test]
    fn test_unknown_values_fail() {
        assert!(conditions(&["Installed".to_string()]).is_ok());
        assert!(conditions(&["Installed".to_string(), "Bogus".to_string()]).is_err());
    }
}
