use rand::Rng;

const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789";

/// Generates fixed-length random strings over an alphabet.
///
/// Every character is drawn independently through `gen_range`, which is
/// unbiased, from the thread-local CSPRNG seeded by the OS.
#[derive(Debug, Clone)]
pub struct RandomNameGenerator {
    charset: Vec<char>,
}

impl Default for RandomNameGenerator {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

impl RandomNameGenerator {
    /// Returns `None` for an empty alphabet.
    pub fn with_alphabet(alphabet: &str) -> Option<Self> {
        let charset: Vec<char> = alphabet.chars().collect();
        if charset.is_empty() {
            return None;
        }
        Some(Self { charset })
    }

    pub fn generate(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();

        (0..length)
            .map(|_| {
                let idx = rng.gen_range(0..self.charset.len());
                self.charset[idx]
            })
            .collect()
    }
}

/// Random string over `A-Z a-z 0-9`.
pub fn random_string(length: usize) -> String {
    RandomNameGenerator::default().generate(length)
}
