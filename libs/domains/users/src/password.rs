use rand::Rng;

pub const PASSWORD_LENGTH: usize = 10;

/// Alphabet the generated passwords draw from
pub const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Random password assigned at creation, each character drawn uniformly from [`CHARSET`].
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}
