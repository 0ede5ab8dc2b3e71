#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// The element implied by a site label does not match the element
    /// declared for this site. This aborts the analysis of the structure.
    StructuralIntegrity {
        /// label of the offending site
        label: String,
        /// element declared for this site
        declared: String,
        /// element implied by the label, if any could be found
        implied: Option<String>,
    },
    /// The requested site label does not exist in the structure
    UnknownSite(String),
    /// No coordination method was valid for the requested site
    UndeterminedSite(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::StructuralIntegrity { label, declared, implied } => {
                match implied {
                    Some(implied) => write!(f,
                        "different elements found in atom site and label: site '{}' is declared as {} but its label implies {}",
                        label, declared, implied
                    ),
                    None => write!(f,
                        "could not find an element in the label of site '{}' (declared as {})",
                        label, declared
                    ),
                }
            }
            Error::UnknownSite(label) => write!(f, "unknown site label '{}'", label),
            Error::UndeterminedSite(label) => write!(f,
                "the coordination number of site '{}' could not be determined", label
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::StructuralIntegrity { .. } |
            Error::UnknownSite(_) |
            Error::UndeterminedSite(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}
