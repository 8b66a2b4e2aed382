//! Hash generator
//!
//! Computes SHA-1/SHA-256/SHA-512 (and XXH3-64) digests of the input bytes exactly as read,
//! rendered as lowercase hex. Inline text is hashed as UTF-8.
//!
//! Digest requests are tagged with a generation by [`DigestSession`]; a result is only
//! published when its generation is still the latest, so the shown digests always belong
//! to the most recent input even when computations finish out of order.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tracing::{debug, trace};
use xxhash_rust::xxh3::xxh3_64;

use crate::core::error::ToolError;
use crate::core::input::Input;
use crate::core::model::{Kind, ResultItem, ResultSet};
use crate::core::util::to_hex;

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
    /// Non-cryptographic, for quick content fingerprints
    Xxh3,
}

impl Algorithm {
    /// The algorithms computed when none are requested
    pub const DEFAULT_SET: [Algorithm; 3] = [Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Xxh3 => "xxh3",
        }
    }

    /// Digest length in bits
    pub fn bits(&self) -> u32 {
        match self {
            Algorithm::Sha1 => 160,
            Algorithm::Sha256 => 256,
            Algorithm::Sha512 => 512,
            Algorithm::Xxh3 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "sha512" | "sha-512" => Ok(Algorithm::Sha512),
            "xxh3" | "xxh3-64" | "xxhash" => Ok(Algorithm::Xxh3),
            _ => Err(ToolError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Parse algorithm names; the first unknown name is an error
pub fn parse_algorithms(names: &[String]) -> Result<Vec<Algorithm>, ToolError> {
    names.iter().map(|name| name.parse()).collect()
}

/// Raw digest bytes of `data`
pub fn digest(algorithm: Algorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => Sha1::digest(data).to_vec(),
        Algorithm::Sha256 => Sha256::digest(data).to_vec(),
        Algorithm::Sha512 => Sha512::digest(data).to_vec(),
        Algorithm::Xxh3 => xxh3_64(data).to_be_bytes().to_vec(),
    }
}

/// One computed digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashValue {
    pub algorithm: Algorithm,
    pub hex: String,
}

/// Hex digests of `data` for each algorithm, in the order given
#[cfg(not(feature = "parallel"))]
pub fn digest_all(data: &[u8], algorithms: &[Algorithm]) -> Vec<HashValue> {
    algorithms
        .iter()
        .map(|&algorithm| HashValue {
            algorithm,
            hex: to_hex(&digest(algorithm, data)),
        })
        .collect()
}

/// Hex digests of `data` for each algorithm, in the order given
#[cfg(feature = "parallel")]
pub fn digest_all(data: &[u8], algorithms: &[Algorithm]) -> Vec<HashValue> {
    use rayon::prelude::*;

    algorithms
        .par_iter()
        .map(|&algorithm| HashValue {
            algorithm,
            hex: to_hex(&digest(algorithm, data)),
        })
        .collect()
}

/// Digests computed for one request generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSet {
    pub generation: u64,
    pub values: Vec<HashValue>,
}

/// A pending digest computation tagged with its generation
#[derive(Debug, Clone)]
pub struct DigestRequest {
    generation: u64,
    data: Vec<u8>,
    algorithms: Vec<Algorithm>,
}

impl DigestRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn compute(self) -> DigestSet {
        trace!(generation = self.generation, "computing digests");
        DigestSet {
            generation: self.generation,
            values: digest_all(&self.data, &self.algorithms),
        }
    }
}

/// Tracks the latest request generation and the digests currently shown
#[derive(Debug, Default)]
pub struct DigestSession {
    latest: AtomicU64,
    shown: Mutex<Option<DigestSet>>,
}

impl DigestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `data`; it supersedes every earlier request
    pub fn begin(&self, data: impl Into<Vec<u8>>, algorithms: &[Algorithm]) -> DigestRequest {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        DigestRequest {
            generation,
            data: data.into(),
            algorithms: algorithms.to_vec(),
        }
    }

    /// Show `set` if it belongs to the latest request. Returns whether it was accepted.
    pub fn publish(&self, set: DigestSet) -> bool {
        let mut shown = self.shown.lock().expect("digest session mutex poisoned");
        // Checked under the lock so a stale result can never overwrite a newer one
        let latest = self.latest.load(Ordering::SeqCst);
        if set.generation != latest {
            debug!(
                generation = set.generation,
                latest, "discarding stale digest result"
            );
            return false;
        }
        *shown = Some(set);
        true
    }

    /// The digests currently shown
    pub fn current(&self) -> Option<DigestSet> {
        self.shown
            .lock()
            .expect("digest session mutex poisoned")
            .clone()
    }

    /// Compute on a background thread and publish on completion
    pub fn spawn(
        self: &Arc<Self>,
        data: impl Into<Vec<u8>>,
        algorithms: &[Algorithm],
    ) -> JoinHandle<bool> {
        let request = self.begin(data, algorithms);
        let session = Arc::clone(self);
        std::thread::spawn(move || session.publish(request.compute()))
    }
}

/// Run the hash command
pub fn run_hash(input: &Input, algorithms: &[Algorithm]) -> Result<ResultSet> {
    let algorithms: Vec<Algorithm> = if algorithms.is_empty() {
        Algorithm::DEFAULT_SET.to_vec()
    } else {
        algorithms.to_vec()
    };
    debug!(?algorithms, bytes = input.bytes.len(), "hashing input");

    let session = Arc::new(DigestSession::new());
    session
        .spawn(input.bytes.clone(), &algorithms)
        .join()
        .map_err(|_| anyhow!("digest worker panicked"))?;
    let set = session
        .current()
        .context("digest worker finished without publishing a result")?;

    // Digests cover the raw bytes, so neither truncation nor lossy decoding applies
    let meta = input.bytes_meta();
    Ok(set
        .values
        .into_iter()
        .map(|value| {
            ResultItem::output(Kind::Digest, format!("hash.{}", value.algorithm), value.hex)
                .with_data(serde_json::json!({
                    "algorithm": value.algorithm,
                    "bits": value.algorithm.bits(),
                }))
                .with_input_meta(&meta)
        })
        .collect())
}
