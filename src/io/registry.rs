// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Local certificate registry.
//!
//! Recipient certificates for encryption are kept in a small sqlite
//! database keyed by email. The user's own certificate lands here too,
//! fetched from the native service and registered under the configured
//! identity email.

use anyhow::{anyhow, Result};
use sqlite::{Connection, State};
use std::path::Path;

pub struct CertificateRegistry {
    conn: Connection,
}

impl CertificateRegistry {
    /// Open (and if needed create) the registry database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = sqlite::open(path)
            .map_err(|e| anyhow!("failed to open certificate registry: {e}"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS certificates (
                email TEXT PRIMARY KEY,
                certificate TEXT NOT NULL,
                registered_at TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }

    /// Whether a certificate is registered for the given email.
    pub fn is_present(&self, email: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM certificates WHERE email = ?")?;
        stmt.bind((1, email))?;
        Ok(matches!(stmt.next()?, State::Row))
    }

    /// Register (or replace) a certificate for the given email.
    pub fn register(&self, email: &str, certificate: &str) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO certificates (email, certificate, registered_at)
             VALUES (?, ?, datetime('now'))
             ON CONFLICT(email) DO UPDATE SET
                 certificate = excluded.certificate,
                 registered_at = excluded.registered_at",
        )?;
        stmt.bind((1, email))?;
        stmt.bind((2, certificate))?;
        stmt.next()?;
        Ok(())
    }

    /// Look up the certificate registered for a recipient email.
    pub fn lookup(&self, email: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT certificate FROM certificates WHERE email = ?")?;
        stmt.bind((1, email))?;
        if let State::Row = stmt.next()? {
            Ok(Some(stmt.read::<String, _>(0)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry() -> (tempfile::TempDir, CertificateRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = CertificateRegistry::open(&dir.path().join("certs.db")).unwrap();
        (dir, registry)
    }

    #[test]
    fn test_register_and_lookup() {
        let (_dir, registry) = temp_registry();
        assert!(!registry.is_present("alice@example.com").unwrap());
        assert!(registry.lookup("alice@example.com").unwrap().is_none());

        registry
            .register("alice@example.com", "-----BEGIN CERTIFICATE-----")
            .unwrap();
        assert!(registry.is_present("alice@example.com").unwrap());
        assert_eq!(
            registry.lookup("alice@example.com").unwrap().as_deref(),
            Some("-----BEGIN CERTIFICATE-----")
        );
    }

    #[test]
    fn test_register_replaces_existing() {
        let (_dir, registry) = temp_registry();
        registry.register("bob@example.com", "old").unwrap();
        registry.register("bob@example.com", "new").unwrap();
        assert_eq!(
            registry.lookup("bob@example.com").unwrap().as_deref(),
            Some("new")
        );
    }

    #[test]
    fn test_registry_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certs.db");
        {
            let registry = CertificateRegistry::open(&path).unwrap();
            registry.register("carol@example.com", "pem").unwrap();
        }
        let registry = CertificateRegistry::open(&path).unwrap();
        assert!(registry.is_present("carol@example.com").unwrap());
    }
}
