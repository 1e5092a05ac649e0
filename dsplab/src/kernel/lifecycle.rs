use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
///
/// `try_new` performs every eager check the configuration allows, so a
/// constructed kernel can run without re-validating its parameters.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
