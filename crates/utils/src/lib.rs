use rand::Rng;

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();
    std::iter::repeat(())
        .map(|_| rng.sample(rand::distributions::Alphanumeric))
        .map(char::from)
        .take(secret_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_secret_of_given_length() {
        for len in [0, 1, 16, 64] {
            let secret = create_random_secret(len);
            assert_eq!(secret.len(), len);
            assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn secrets_are_not_repeated() {
        assert_ne!(create_random_secret(32), create_random_secret(32));
    }
}
