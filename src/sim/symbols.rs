//! Reel symbols and the sources that draw them

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_GLYPHS;
use crate::error::ConfigError;

/// A single reel glyph. Symbols compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    pub fn glyph(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed, non-empty set of symbols a reel can land on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Alphabet(Vec<Symbol>);

impl Alphabet {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self(symbols))
    }

    /// Build from raw glyphs
    pub fn from_glyphs(glyphs: &[char]) -> Result<Self, ConfigError> {
        Self::new(glyphs.iter().copied().map(Symbol).collect())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for an alphabet built through `new`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol at `index`, wrapping around the alphabet
    pub fn get_wrapped(&self, index: usize) -> Symbol {
        self.0[index % self.0.len()]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self(DEFAULT_GLYPHS.iter().copied().map(Symbol).collect())
    }
}

impl TryFrom<Vec<Symbol>> for Alphabet {
    type Error = ConfigError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<Alphabet> for Vec<Symbol> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.0
    }
}

/// Supplies one symbol per call.
///
/// Grid generation is only as deterministic as the source behind it, so every
/// source used by the engine must be reproducible from its construction inputs.
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Symbol;
}

/// Uniform draws from an alphabet using a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededSource {
    alphabet: Alphabet,
    rng: Pcg32,
}

impl SeededSource {
    pub fn new(alphabet: Alphabet, seed: u64) -> Self {
        Self {
            alphabet,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl SymbolSource for SeededSource {
    fn next_symbol(&mut self) -> Symbol {
        let i = self.rng.random_range(0..self.alphabet.len());
        self.alphabet.symbols()[i]
    }
}

/// Replays a fixed sequence, cycling when exhausted.
///
/// Used to engineer specific grids in tests and demos.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Alphabet,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: Alphabet) -> Self {
        Self { script, cursor: 0 }
    }

    /// Script laid out reel by reel, matching the order [`super::Grid::generate`] draws in
    pub fn from_reels(reels: &[&[char]]) -> Result<Self, ConfigError> {
        let glyphs: Vec<char> = reels.iter().flat_map(|r| r.iter().copied()).collect();
        Ok(Self::new(Alphabet::from_glyphs(&glyphs)?))
    }
}

impl SymbolSource for ScriptedSource {
    fn next_symbol(&mut self) -> Symbol {
        let symbol = self.script.get_wrapped(self.cursor);
        self.cursor = (self.cursor + 1) % self.script.len();
        symbol
    }
}
