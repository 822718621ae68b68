//! Setting value validation.

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "TRYON_OUTPUT_FILE" => {
            if value.trim().is_empty() || value.len() > 255 {
                return Err("file name must be 1-255 characters".into());
            }
            if value.ends_with('/') || value.ends_with('\\') {
                return Err("must name a file, not a directory".into());
            }
        }
        "TRYON_JPEG_QUALITY" => validate_int_range(value, 1, 100)?,
        "TRYON_SCALE_MIN_PERCENT" | "TRYON_SCALE_MAX_PERCENT" | "TRYON_DEFAULT_SCALE_PERCENT" => {
            validate_int_range(value, 1, 1000)?
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.trim().parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
