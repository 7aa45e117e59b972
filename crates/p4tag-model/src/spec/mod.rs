mod step;
pub use step::TagStepSpec;
