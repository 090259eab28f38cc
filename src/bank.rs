//! A bank of ready-made input expressions for demos and smoke tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Inputs written the informal way users type them; every entry parses after
/// normalization.
pub const BUILTIN_EXAMPLES: &[&str] = &[
    "x**2 + 3*x - 5",
    "2x^3 - 4x + 1",
    "sin(x)*cos(x)",
    "3sin(2x)",
    "exp(2x)",
    "x*exp(x**2)",
    "log(x)",
    "1/(x^2+1)",
    "(2x+3)/(x+1)",
    "1/(x^2-1)",
    "x/(x^2+4)",
    "(x+1)(x-2)",
    "sqrt(x)",
    "tan(x)",
    "5",
];

/// A fixed pool of example inputs with deterministic sampling.
#[derive(Debug, Clone)]
pub struct ExampleBank {
    entries: Vec<String>,
}

impl ExampleBank {
    pub fn builtin() -> Self {
        Self::new(BUILTIN_EXAMPLES.iter().map(|s| s.to_string()))
    }

    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        ExampleBank {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Draw up to `count` distinct entries. The same seed always yields the
    /// same selection in the same order.
    pub fn pick(&self, seed: u64, count: usize) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = self.entries.clone();
        pool.shuffle(&mut rng);
        pool.truncate(count);
        pool
    }
}
