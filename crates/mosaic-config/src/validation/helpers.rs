//! Shared range-validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range<T>(errors: &mut Vec<String>, name: &str, value: T, min: T, max: T)
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is not an `http(s)://` or `mosaic://` address.
pub(crate) fn validate_address(errors: &mut Vec<String>, name: &str, value: &str) {
    const SCHEMES: [&str; 4] = ["http://", "https://", "mosaic://", "file://"];
    if !SCHEMES.iter().any(|s| value.starts_with(s)) {
        errors.push(format!("{name} = {value:?} is not a loadable address"));
    }
}
