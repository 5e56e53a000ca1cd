/// Result of the shallow storage reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthReport {
    Healthy,
    Unhealthy { error: String },
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthReport::Healthy)
    }
}
