use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// The variable holds a comma-separated list of origins, e.g.
/// `http://localhost:5173,https://admin.example.com`. When it is unset the
/// layer is permissive, which suits local development.
///
/// # Errors
/// Returns `InvalidInput` if the variable is set but empty or holds an
/// origin that is not a valid header value.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    };

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<HeaderValue>)
        .collect::<Result<_, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!(origins = %origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_permissive() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(cors_layer_from_env().is_ok());
        });
    }

    #[test]
    fn test_origin_list() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:5173, https://admin.example.com"),
            || {
                assert!(cors_layer_from_env().is_ok());
            },
        );
    }

    #[test]
    fn test_blank_list_rejected() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            let err = cors_layer_from_env().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        });
    }

    #[test]
    fn test_invalid_header_rejected() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("http://bad\norigin"), || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
