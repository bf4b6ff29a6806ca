use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;

/// Number of random bytes drawn for each opaque token
pub const TOKEN_ENTROPY_BYTES: usize = 32;

/// Function to generate a fresh opaque token for account activation and
/// password reset links
/// Draws from the thread-local CSPRNG and encodes URL-safe, so the value can
/// be embedded in a link without escaping
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..TOKEN_ENTROPY_BYTES).map(|_| rng.gen()).collect();

    URL_SAFE_NO_PAD.encode(bytes)
}
