use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error in {path}: {source}")]
    Xml {
        path: String,
        #[source]
        source: quick_xml::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
