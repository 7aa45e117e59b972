mod domain;
pub use domain::{BuildNumber, BuildRef, BuildResult, Env, PromotionRef};
pub use domain::{ENV_BUILD_NUMBER, ENV_JOB_NAME, ENV_P4_CHANGELIST};
pub use domain::{ENV_PROMOTED_JOB_NAME, ENV_PROMOTED_NUMBER};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::TagStepSpec;
