use crate::models::HealthRes;

/// Health check shared by every binary that serves the API.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Reports that the service is up.
    ///
    /// The check has no dependencies: it does not contact the upstream generator.
    ///
    /// # Returns
    /// A `HealthRes` with `ok` set and a fixed status message.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "SkillNaav assessment service is alive".into(),
        }
    }
}
