use crate::dto::HealthRes;
use chrono::Utc;

pub const SERVICE_NAME: &str = "Symptom Checker API";

/// Liveness check shared by the REST server and the CLI.
pub struct HealthService;

impl HealthService {
    /// Report the service as healthy, stamped with the current UTC time.
    ///
    /// The engine holds no external resources, so a running process is a healthy one.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            timestamp: Utc::now().to_rfc3339(),
            service: SERVICE_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_healthy_with_timestamp() {
        let res = HealthService::check_health();
        assert_eq!(res.status, "healthy");
        assert_eq!(res.service, SERVICE_NAME);
        assert!(chrono::DateTime::parse_from_rfc3339(&res.timestamp).is_ok());
    }
}
