use crate::{
    BuildNumber, Env, ModelError,
    domain::constants::{ENV_PROMOTED_JOB_NAME, ENV_PROMOTED_NUMBER},
};

/// Reference to the upstream run a promotion was triggered for.
///
/// Read from [`ENV_PROMOTED_JOB_NAME`] and [`ENV_PROMOTED_NUMBER`].
/// The number is kept raw; it is only parsed when the upstream run is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRef {
    pub job: String,
    pub number: String,
}

impl PromotionRef {
    /// Extract the promotion reference from a run environment.
    ///
    /// Returns `None` unless both variables are present and non-empty.
    pub fn from_env(env: &Env) -> Option<Self> {
        let job = env.get_non_empty(ENV_PROMOTED_JOB_NAME)?;
        let number = env.get_non_empty(ENV_PROMOTED_NUMBER)?;
        Some(Self {
            job: job.to_string(),
            number: number.to_string(),
        })
    }

    /// Parse the raw build number. Surrounding whitespace is not accepted.
    pub fn build_number(&self) -> Result<BuildNumber, ModelError> {
        self.number
            .parse()
            .map_err(|e: std::num::ParseIntError| ModelError::InvalidBuildNumber {
                value: self.number.clone(),
                reason: e.to_string(),
            })
    }
}
