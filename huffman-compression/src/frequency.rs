use std::io::Read;

use crate::error::Result;

pub const SYMBOL_COUNT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable([u64; SYMBOL_COUNT]);

impl Default for FrequencyTable {
    fn default() -> Self {
        Self([0; SYMBOL_COUNT])
    }
}

impl FrequencyTable {
    pub fn count(buffer: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in buffer {
            table.0[byte as usize] += 1;
        }
        table
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.0[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, frequency: u64) {
        self.0[symbol as usize] = frequency;
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&frequency| frequency == 0)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn distinct_symbols(&self) -> usize {
        self.0.iter().filter(|&&frequency| frequency > 0).count()
    }

    /// ascending by symbol
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .zip(self.0.iter().copied())
            .filter(|&(_, frequency)| frequency > 0)
    }
}

pub fn count_frequencies<R: Read>(reader: &mut R) -> Result<FrequencyTable> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    Ok(FrequencyTable::count(&content))
}
