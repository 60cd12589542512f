use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

/// `?, ?, ?` for an `IN (...)` clause with `count` parameters.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

pub fn validate_color(color: &str) -> Result<()> {
    let hex_part = color
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("Invalid color format. Must be hex (#RRGGBB)"))?;

    if hex_part.len() != 6 && hex_part.len() != 8 {
        bail!("Invalid color format. Must be hex (#RRGGBB or #RRGGBBAA)");
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid color format. Must be hex (#RRGGBB)");
    }

    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Label name must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rgb_and_rgba_colors() {
        assert!(validate_color("#00ff7A").is_ok());
        assert!(validate_color("#00ff7a80").is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["00ff7a", "#0f0", "#gg0000", "#00ff7a8", ""] {
            assert!(validate_color(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn rejects_blank_names() {
        assert!(validate_name("bug").is_ok());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn builds_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
    }

    #[test]
    fn parses_optional_datetime() {
        let parsed =
            parse_optional_datetime(Some("2024-01-02T03:04:05+00:00".into()), "deleted_at")
                .unwrap();
        assert!(parsed.is_some());
        assert!(parse_optional_datetime(None, "deleted_at").unwrap().is_none());
        assert!(parse_datetime("yesterday", "created_at").is_err());
    }
}
