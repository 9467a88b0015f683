/// Prefix some configurations put in front of role names. Stripped on construction.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Principal name carried by the unauthenticated identity.
pub const ANONYMOUS_PRINCIPAL: &str = "anonymous";
