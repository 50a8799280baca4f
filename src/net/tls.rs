//! TLS material loading for outbound platform connections.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::net::transport::TransportConfigError;

/// Certificates and identity read from disk, ready to hand to the HTTP client.
#[derive(Debug, Default)]
pub struct TlsMaterial {
    /// DER-encoded trust anchors from the CA bundle.
    pub ca_certs: Vec<Vec<u8>>,

    /// PEM client certificate chain followed by its private key.
    pub identity_pem: Option<Vec<u8>>,
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TransportConfigError> {
    fs::read(path).map_err(|source| TransportConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_certs(path: &Path, pem: &[u8]) -> Result<Vec<Vec<u8>>, TransportConfigError> {
    let mut reader = BufReader::new(pem);
    let certs = rustls_pemfile::certs(&mut reader)
        .map(|cert| cert.map(|der| der.as_ref().to_vec()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TransportConfigError::Pem {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(TransportConfigError::NoCertificates {
            path: path.to_path_buf(),
        });
    }
    Ok(certs)
}

/// Load every certificate in a PEM CA bundle.
pub fn load_ca_bundle(path: &Path) -> Result<Vec<Vec<u8>>, TransportConfigError> {
    let pem = read_pem(path)?;
    parse_certs(path, &pem)
}

/// Load a client certificate chain and private key for mutual TLS.
///
/// Both files are checked before they are concatenated so a bad key is
/// reported against its own path.
pub fn load_client_identity(cert_path: &Path, key_path: &Path) -> Result<Vec<u8>, TransportConfigError> {
    let cert_pem = read_pem(cert_path)?;
    parse_certs(cert_path, &cert_pem)?;

    let key_pem = read_pem(key_path)?;
    let mut reader = BufReader::new(key_pem.as_slice());
    let key = rustls_pemfile::private_key(&mut reader).map_err(|source| TransportConfigError::Pem {
        path: key_path.to_path_buf(),
        source,
    })?;
    if key.is_none() {
        return Err(TransportConfigError::NoPrivateKey {
            path: key_path.to_path_buf(),
        });
    }

    let mut identity = cert_pem;
    if !identity.ends_with(b"\n") {
        identity.push(b'\n');
    }
    identity.extend_from_slice(&key_pem);
    Ok(identity)
}

impl TlsMaterial {
    /// Read whatever material the paths point at.
    pub fn load(
        ca_path: Option<&Path>,
        identity: Option<(&Path, &Path)>,
    ) -> Result<Self, TransportConfigError> {
        if ca_path.is_none() && identity.is_none() {
            return Err(TransportConfigError::MissingMaterial);
        }

        let ca_certs = match ca_path {
            Some(path) => load_ca_bundle(path)?,
            None => Vec::new(),
        };
        let identity_pem = match identity {
            Some((cert, key)) => Some(load_client_identity(cert, key)?),
            None => None,
        };

        Ok(Self {
            ca_certs,
            identity_pem,
        })
    }

    pub fn from_config(tls: &crate::config::PlatformTlsConfig) -> Result<Self, TransportConfigError> {
        let ca_path = tls.ca_path.as_ref().map(PathBuf::from);
        let identity = match (&tls.cert_path, &tls.key_path) {
            (Some(cert), Some(key)) => Some((PathBuf::from(cert), PathBuf::from(key))),
            _ => None,
        };

        Self::load(
            ca_path.as_deref(),
            identity.as_ref().map(|(c, k)| (c.as_path(), k.as_path())),
        )
    }
}
