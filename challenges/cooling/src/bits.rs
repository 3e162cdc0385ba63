//! Word-packed bitsets for per-cell grid state.
//!
//! Bits live in `u64` words and padding bits past `len` are always zero, so
//! whole-word operations never see phantom cells.

use crate::Error;

const WORD_BITS: usize = 64;

#[inline(always)]
fn words_for_bits(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Fixed-length bitset, one bit per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Creates an all-clear set of `len` bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; words_for_bits(len)],
            len,
        }
    }

    /// Like [`BitSet::new`], but reports allocation failure instead of aborting.
    pub fn try_new(len: usize) -> Result<Self, Error> {
        let mut words = Vec::new();
        words.try_reserve_exact(words_for_bits(len))?;
        words.resize(words_for_bits(len), 0);
        Ok(Self { words, len })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "bit {} out of range {}", idx, self.len);
        self.words[idx / WORD_BITS] & (1u64 << (idx % WORD_BITS)) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < self.len, "bit {} out of range {}", idx, self.len);
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    #[inline(always)]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < self.len, "bit {} out of range {}", idx, self.len);
        self.words[idx / WORD_BITS] &= !(1u64 << (idx % WORD_BITS));
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Overwrites `self` with `other` without allocating.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn copy_from(&mut self, other: &BitSet) {
        assert_eq!(self.len, other.len, "bitset length mismatch");
        self.words.copy_from_slice(&other.words);
    }

    /// In-place union.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn union_with(&mut self, other: &BitSet) {
        assert_eq!(self.len, other.len, "bitset length mismatch");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    /// Set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        Ones::new(self.words.iter().copied(), self.len)
    }

    /// Positions clear in both `a` and `b`, in ascending order.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn zeros_of_union<'a>(a: &'a BitSet, b: &'a BitSet) -> impl Iterator<Item = usize> + 'a {
        assert_eq!(a.len, b.len, "bitset length mismatch");
        let words = a.words.iter().zip(&b.words).map(|(x, y)| !(x | y));
        Ones::new(words, a.len)
    }

    #[inline]
    fn last_word_mask(len: usize) -> u64 {
        match len % WORD_BITS {
            0 => u64::MAX,
            rem => (1u64 << rem) - 1,
        }
    }
}

/// Walks the set bits of a word stream, masking the tail word to `len`.
struct Ones<I> {
    words: I,
    word_idx: usize,
    current: u64,
    last_word_idx: usize,
    last_word_mask: u64,
}

impl<I: Iterator<Item = u64>> Ones<I> {
    fn new(mut words: I, len: usize) -> Self {
        let last_word_idx = words_for_bits(len).saturating_sub(1);
        let last_word_mask = BitSet::last_word_mask(len);
        let mut current = words.next().unwrap_or(0);
        if last_word_idx == 0 {
            current &= if len == 0 { 0 } else { last_word_mask };
        }
        Self {
            words,
            word_idx: 0,
            current,
            last_word_idx,
            last_word_mask,
        }
    }
}

impl<I: Iterator<Item = u64>> Iterator for Ones<I> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                // clear lowest set bit
                self.current &= self.current.wrapping_sub(1);
                return Some(self.word_idx * WORD_BITS + bit);
            }
            self.current = self.words.next()?;
            self.word_idx += 1;
            if self.word_idx == self.last_word_idx {
                self.current &= self.last_word_mask;
            }
        }
    }
}
