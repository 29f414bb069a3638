use crate::dto::HealthRes;

/// Simple health service shared by every delivery surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance.
    ///
    /// This is the preferred method for health checks as it doesn't require
    /// instantiating the service.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Sketchdeck is alive".into(),
        }
    }
}
