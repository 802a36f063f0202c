//! Ed25519 key management for token signing and verification.

use std::fs;
use std::io::Write;
use std::path::Path;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH};
use jsonwebtoken::{DecodingKey, EncodingKey};
use pem::Pem;
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::errors::{DomainError, KeyError};

/// PEM block type for the private key file
pub const PRIVATE_KEY_PEM_TYPE: &str = "PRIVATE KEY";
/// PEM block type for the public key file
pub const PUBLIC_KEY_PEM_TYPE: &str = "PUBLIC KEY";
/// File name for the persisted private key
pub const PRIVATE_KEY_FILE: &str = "private.pem";
/// File name for the persisted public key
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// Manager for the Ed25519 key pair used in token operations.
///
/// Key material is owned by one manager instance and shared by reference
/// only; claims never carry keys. The private PEM block holds the 64-byte
/// keypair encoding (seed followed by public key), the public block the
/// 32-byte public key.
pub struct Ed25519KeyManager {
    signing_key: SigningKey,
    /// Private key for signing tokens
    encoding_key: EncodingKey,
    /// Public key for verifying tokens
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for Ed25519KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyManager")
            .field("public_key", &self.public_key_base64())
            .finish()
    }
}

impl Ed25519KeyManager {
    /// Generates a fresh key pair from the OS random source.
    ///
    /// Every call produces a new pair; keys are never reused across calls.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Builds a manager from two PEM blocks.
    ///
    /// Decoded byte lengths must exactly match the Ed25519 key sizes
    /// (64-byte private keypair, 32-byte public key), and the public block
    /// must match the public half embedded in the private block.
    pub fn from_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self, DomainError> {
        let private_block = pem::parse(private_key_pem).map_err(|e| KeyError::InvalidPem {
            message: format!("private key: {}", e),
        })?;
        if private_block.tag() != PRIVATE_KEY_PEM_TYPE {
            return Err(KeyError::InvalidPem {
                message: format!(
                    "private key: unexpected block type '{}'",
                    private_block.tag()
                ),
            }
            .into());
        }

        let public_block = pem::parse(public_key_pem).map_err(|e| KeyError::InvalidPem {
            message: format!("public key: {}", e),
        })?;
        if public_block.tag() != PUBLIC_KEY_PEM_TYPE {
            return Err(KeyError::InvalidPem {
                message: format!("public key: unexpected block type '{}'", public_block.tag()),
            }
            .into());
        }

        let private_bytes = Zeroizing::new(private_block.contents().to_vec());
        let keypair_bytes: &[u8; KEYPAIR_LENGTH] =
            private_bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyError::InvalidKeyLength {
                    kind: "private",
                    expected: KEYPAIR_LENGTH,
                    actual: private_bytes.len(),
                })?;

        let public_bytes: &[u8; PUBLIC_KEY_LENGTH] = public_block
            .contents()
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength {
                kind: "public",
                expected: PUBLIC_KEY_LENGTH,
                actual: public_block.contents().len(),
            })?;

        // from_keypair_bytes rejects a seed whose derived public half does
        // not match the embedded one
        let signing_key =
            SigningKey::from_keypair_bytes(keypair_bytes).map_err(|_| KeyError::KeyMismatch)?;
        let verifying_key =
            VerifyingKey::from_bytes(public_bytes).map_err(|e| KeyError::InvalidPem {
                message: format!("public key: {}", e),
            })?;

        if signing_key.verifying_key() != verifying_key {
            return Err(KeyError::KeyMismatch.into());
        }

        Ok(Self::from_signing_key(signing_key))
    }

    /// Builds a manager from PEM files on disk.
    pub fn from_pem_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_pem = fs::read_to_string(&private_key_path).map_err(|e| KeyError::Io {
            message: format!(
                "failed to read {}: {}",
                private_key_path.as_ref().display(),
                e
            ),
        })?;
        let public_pem = fs::read_to_string(&public_key_path).map_err(|e| KeyError::Io {
            message: format!(
                "failed to read {}: {}",
                public_key_path.as_ref().display(),
                e
            ),
        })?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Loads the key pair from `dir` if both files exist, otherwise
    /// generates a fresh pair and persists it there.
    pub fn load_or_generate<P: AsRef<Path>>(dir: P) -> Result<Self, DomainError> {
        let dir = dir.as_ref();
        let private_path = dir.join(PRIVATE_KEY_FILE);
        let public_path = dir.join(PUBLIC_KEY_FILE);

        if private_path.exists() && public_path.exists() {
            tracing::debug!(dir = %dir.display(), "loading existing key pair");
            return Self::from_pem_files(&private_path, &public_path);
        }

        tracing::info!(dir = %dir.display(), "generating new key pair");
        let manager = Self::generate();
        manager.persist(dir)?;
        Ok(manager)
    }

    /// Persists the key pair under `dir` as `private.pem` (mode 0600) and
    /// `public.pem` (mode 0644). The directory is created with mode 0700.
    pub fn persist<P: AsRef<Path>>(&self, dir: P) -> Result<(), DomainError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| KeyError::Io {
            message: format!("failed to create {}: {}", dir.display(), e),
        })?;
        set_mode(dir, 0o700)?;

        let keypair_bytes = Zeroizing::new(self.signing_key.to_keypair_bytes().to_vec());
        let private_pem = pem::encode(&Pem::new(PRIVATE_KEY_PEM_TYPE, keypair_bytes.to_vec()));
        write_key_file(&dir.join(PRIVATE_KEY_FILE), private_pem.as_bytes(), 0o600)?;

        let public_pem = pem::encode(&Pem::new(
            PUBLIC_KEY_PEM_TYPE,
            self.signing_key.verifying_key().to_bytes().to_vec(),
        ));
        write_key_file(&dir.join(PUBLIC_KEY_FILE), public_pem.as_bytes(), 0o644)?;

        tracing::info!(dir = %dir.display(), "persisted key pair");
        Ok(())
    }

    /// Returns the encoding key for signing tokens
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying tokens
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// The public key as unpadded base64url
    pub fn public_key_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.signing_key.verifying_key().to_bytes())
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let pkcs8_der = pkcs8_from_seed(&signing_key.to_bytes());
        let encoding_key = EncodingKey::from_ed_der(&pkcs8_der);
        let decoding_key = DecodingKey::from_ed_der(&signing_key.verifying_key().to_bytes());

        Self {
            signing_key,
            encoding_key,
            decoding_key,
        }
    }
}

/// Wraps a raw Ed25519 seed in a PKCS#8 v1 document, the format
/// `EncodingKey::from_ed_der` expects.
fn pkcs8_from_seed(seed: &[u8; 32]) -> Zeroizing<Vec<u8>> {
    let mut der = Zeroizing::new(vec![
        0x30, 0x2e, // SEQUENCE, 46 bytes
        0x02, 0x01, 0x00, // INTEGER version 0
        0x30, 0x05, // SEQUENCE, 5 bytes (algorithm identifier)
        0x06, 0x03, 0x2b, 0x65, 0x70, // OID 1.3.101.112 (Ed25519)
        0x04, 0x22, // OCTET STRING, 34 bytes
        0x04, 0x20, // OCTET STRING, 32 bytes (the seed)
    ]);
    der.extend_from_slice(seed);
    der
}

fn write_key_file(path: &Path, contents: &[u8], mode: u32) -> Result<(), KeyError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).map_err(|e| KeyError::Io {
        message: format!("failed to open {}: {}", path.display(), e),
    })?;
    file.write_all(contents).map_err(|e| KeyError::Io {
        message: format!("failed to write {}: {}", path.display(), e),
    })?;

    // An existing file keeps its old mode; enforce the requested one
    set_mode(path, mode)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), KeyError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| KeyError::Io {
        message: format!("failed to set permissions on {}: {}", path.display(), e),
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), KeyError> {
    Ok(())
}
