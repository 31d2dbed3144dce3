use crate::utils::error::{OrderError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(OrderError::config(format!("{}: path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(OrderError::config(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(OrderError::config(format!(
            "{}: unsupported file extension '{}'. Allowed extensions: {}",
            field_name,
            extension,
            allowed_extensions.join(", ")
        ))),
        None => Err(OrderError::config(format!(
            "{}: '{}' has no extension",
            field_name, path
        ))),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(OrderError::config(format!(
            "{}: '{}' is not one of {}",
            field_name,
            value,
            allowed.join(", ")
        )));
    }
    Ok(())
}
