/// SbomRequest - Internal request DTO for the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomRequest {
    /// Name of the application/system being inventoried (root component)
    pub root_name: String,
}

impl SbomRequest {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
        }
    }
}
