use camino::{Utf8Path, Utf8PathBuf};
use polsim_domain::{MalformedPolicy, Policy};
use polsim_types::PolicyDocument;

#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("cannot read policy file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse policy file {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed policy in {path}")]
    Malformed {
        path: Utf8PathBuf,
        #[source]
        source: MalformedPolicy,
    },
}

impl PolicyLoadError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            PolicyLoadError::Read { path, .. }
            | PolicyLoadError::Parse { path, .. }
            | PolicyLoadError::Malformed { path, .. } => path,
        }
    }
}

/// Parse a JSON policy document. `path` is only used for error context.
pub fn parse_policy_json(path: &Utf8Path, text: &str) -> Result<Policy, PolicyLoadError> {
    let doc: PolicyDocument =
        serde_json::from_str(text).map_err(|source| PolicyLoadError::Parse {
            path: path.to_owned(),
            source,
        })?;

    Policy::from_document(doc).map_err(|source| PolicyLoadError::Malformed {
        path: path.to_owned(),
        source,
    })
}

pub fn load_policy(path: &Utf8Path) -> Result<Policy, PolicyLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| PolicyLoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let policy = parse_policy_json(path, &text)?;
    tracing::debug!(path = %path, rules = policy.len(), "loaded policy");
    Ok(policy)
}
