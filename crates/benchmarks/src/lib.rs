//! Benchmark utilities for the membership filter
pub mod utils {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    /// Random alphanumeric key of `len` characters
    pub fn generate_random_key(len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// `count` random keys of `len` characters
    pub fn generate_keys(count: usize, len: usize) -> Vec<String> {
        (0..count).map(|_| generate_random_key(len)).collect()
    }

    /// Keys sharing a long common prefix and differing only in the tail
    pub fn generate_prefixed_keys(count: usize) -> Vec<String> {
        let prefix = "https://docs.example.com/articles/frontend/";
        (0..count).map(|i| format!("{}{:08}", prefix, i)).collect()
    }
}
