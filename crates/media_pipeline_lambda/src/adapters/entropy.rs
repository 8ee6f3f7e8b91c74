pub trait IdentifierEntropy {
    /// A value in `[0, 1)`.
    fn random_fraction(&self) -> f64;
    fn timestamp_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl IdentifierEntropy for SystemEntropy {
    fn random_fraction(&self) -> f64 {
        rand::random::<f64>()
    }

    fn timestamp_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}
