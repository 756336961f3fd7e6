use rand::Rng;

/// Upper-case letters and digits minus the easily confused `0 O 1 I`.
pub const DEFAULT_CHARSET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Random code of `len` characters from [`DEFAULT_CHARSET`].
pub fn random_code<R: Rng>(rng: &mut R, len: usize) -> String {
    random_code_from(rng, len, DEFAULT_CHARSET)
}

/// Random code of `len` characters drawn uniformly from `charset`.
///
/// An empty charset yields an empty string.
pub fn random_code_from<R: Rng>(rng: &mut R, len: usize, charset: &str) -> String {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    (0..len)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/codes.rs"]
mod tests;
