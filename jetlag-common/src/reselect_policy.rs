/// What happens when the already active record is selected again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReselectPolicy {
    /// Selecting the active record again does nothing
    Keep,
    /// Selecting the active record again clears the selection
    Toggle,
}

#[allow(clippy::derivable_impls)]
impl Default for ReselectPolicy {
    fn default() -> Self {
        ReselectPolicy::Keep
    }
}

impl std::str::FromStr for ReselectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(ReselectPolicy::Keep),
            "toggle" => Ok(ReselectPolicy::Toggle),
            other => Err(format!("unknown reselect policy: {other}")),
        }
    }
}
