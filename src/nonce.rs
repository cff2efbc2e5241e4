use rand::Rng;

/// Generates an alphanumeric nonce of `length` characters from the OS CSPRNG.
pub fn random_nonce(length: usize) -> String {
    rand::rngs::OsRng
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
