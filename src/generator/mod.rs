//! Document and payload generation.
//!
//! Every function here is a pure mapping from a service snapshot to strings
//! or JSON values. Wall-clock time and synthetic ids are the only varying
//! inputs and both come from a [`GenerationContext`].

use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod document;
pub mod examples;
pub mod fields;
pub mod payload;
pub mod report;
pub mod request;
pub mod templates;

pub use document::{generate_preview_packet, generate_welcome_packet};
pub use examples::{generate_failure_example, generate_success_example};
pub use fields::derive_field_rules;
pub use payload::{generate_email_payload, generate_webhook_payload, webhook_auth_headers};
pub use report::{mock_events, render_service_report};
pub use request::generate_request_body;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Clock reading and id source shared by one generation pass.
pub struct GenerationContext {
    now: DateTime<Utc>,
    rng: StdRng,
}

impl GenerationContext {
    /// Current wall-clock time and an entropy-seeded id source.
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A pinned clock and seeded id source. Two contexts built with the same
    /// arguments produce byte-identical documents.
    pub fn fixed(now: DateTime<Utc>, seed: u64) -> Self {
        Self {
            now,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// ISO-8601 timestamp with millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.
    pub fn timestamp(&self) -> String {
        self.now.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.now.timestamp_millis()
    }

    /// Synthetic id such as `req_k3j9x0a1b`.
    pub fn id(&mut self, prefix: &str) -> String {
        let suffix: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        format!("{}_{}", prefix, suffix)
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::system()
    }
}
