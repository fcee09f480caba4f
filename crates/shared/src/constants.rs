/// REST API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "40.0";
/// OAuth login host for production orgs.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";
/// Maximum subrequests in a single Composite request.
pub const MAX_COMPOSITE_SUBREQUESTS: usize = 25;
/// Maximum records across all trees in one SObject Tree request.
pub const MAX_TREE_RECORDS: usize = 200;
/// Maximum nesting depth of an SObject tree, root included.
pub const MAX_TREE_DEPTH: usize = 5;
/// Maximum distinct sObject types in one SObject Tree request.
pub const MAX_TREE_TYPES: usize = 5;

/// REST data path for an API version, e.g. `/services/data/v40.0`.
pub fn data_path(api_version: &str) -> String {
    format!("/services/data/v{}", api_version.trim_start_matches('v'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_uses_version() {
        assert_eq!(data_path("40.0"), "/services/data/v40.0");
    }

    #[test]
    fn data_path_tolerates_leading_v() {
        assert_eq!(data_path("v39.0"), "/services/data/v39.0");
    }

    #[test]
    fn default_api_version_matches_data_path() {
        assert_eq!(data_path(DEFAULT_API_VERSION), "/services/data/v40.0");
    }

    #[test]
    fn all_limits_positive() {
        assert!(MAX_COMPOSITE_SUBREQUESTS > 0);
        assert!(MAX_TREE_RECORDS > 0);
        assert!(MAX_TREE_DEPTH > 0);
        assert!(MAX_TREE_TYPES > 0);
    }
}
