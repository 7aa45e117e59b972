mod env;
pub use env::Env;

mod result;
pub use result::BuildResult;

mod build;
pub use build::{BuildNumber, BuildRef};

mod promotion;
pub use promotion::PromotionRef;

mod constants;
pub use constants::{ENV_BUILD_NUMBER, ENV_JOB_NAME, ENV_P4_CHANGELIST};
pub use constants::{ENV_PROMOTED_JOB_NAME, ENV_PROMOTED_NUMBER};
