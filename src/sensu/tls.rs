//! trusted-ca-file loading

use log::debug;
use std::fs;
use std::path::Path;
use x509_parser::pem::parse_x509_pem;

use crate::error::{OscError, Result};

/// Load the first PEM block of `path` as a CA certificate.
///
/// The certificate must parse as X.509 and carry the basic-constraints CA
/// flag. Nothing is sent over the network before this succeeds.
pub fn load_trusted_ca(path: &Path) -> Result<reqwest::Certificate> {
    let data = fs::read(path).map_err(|e| {
        OscError::Tls(format!(
            "Unable to load trusted-ca-file {}: {}",
            path.display(),
            e
        ))
    })?;

    let (_, pem) = parse_x509_pem(&data).map_err(|_| {
        OscError::Tls(format!(
            "Unable to decode trusted-ca-file {}. Is it in PEM format?",
            path.display()
        ))
    })?;

    let cert = pem
        .parse_x509()
        .map_err(|e| OscError::Tls(format!("Invalid trusted-ca-file {}: {}", path.display(), e)))?;

    let is_ca = cert
        .basic_constraints()
        .map_err(|e| OscError::Tls(format!("Invalid trusted-ca-file {}: {}", path.display(), e)))?
        .map(|ext| ext.value.ca)
        .unwrap_or(false);
    if !is_ca {
        return Err(OscError::Tls(format!(
            "Certificate in trusted-ca-file {} is not a CA",
            path.display()
        )));
    }

    debug!(
        "Trusting CA '{}' from {}",
        cert.subject(),
        path.display()
    );

    reqwest::Certificate::from_der(&pem.contents)
        .map_err(|e| OscError::Tls(format!("Invalid trusted-ca-file {}: {}", path.display(), e)))
}
