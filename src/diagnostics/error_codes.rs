//! Error code definitions

/// Compilation unit loading errors (E0xxx)
pub mod unit {
    pub const UNREADABLE_UNIT: &str = "E0100";
    pub const MALFORMED_UNIT: &str = "E0101";
    pub const UNKNOWN_SCOPE: &str = "E0102";
    pub const DUPLICATE_DECLARATION: &str = "E0103";
    pub const QUERY_DECLARATION: &str = "E0104";
}

/// Name and type resolution errors (E1xxx)
pub mod types {
    pub const UNRESOLVED_NAME: &str = "E1002";
    pub const NOT_CALLABLE: &str = "E1013";
}

/// Features that are recognised but not implemented yet (E19xx)
pub mod unsupported {
    pub const NOT_IMPLEMENTED: &str = "E1900";
}

/// Warnings (W0xxx)
pub mod warnings {
    pub const SHADOWED_BINDING: &str = "W0006";
}
