//! Fixed-size bit vectors keyed by real node index.

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    words: Vec<u64>,
    len: usize,
}

impl Flags {
    pub fn new(len: usize, value: bool) -> Self {
        let fill = if value { u64::MAX } else { 0 };
        let mut flags = Self {
            words: vec![fill; len.div_ceil(WORD_BITS)],
            len,
        };
        flags.clear_tail();
        flags
    }

    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut flags = Self::new(len, false);
        for i in 0..len {
            if f(i) {
                flags.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        flags
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Out-of-range indices (including `NOT_LOADED`) read as unset.
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Returns the previous value. Writes past the end are ignored.
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        if index >= self.len {
            debug_assert!(false, "flag index {index} out of range {}", self.len);
            return false;
        }
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        let prev = *word & mask != 0;
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        prev
    }

    pub fn set_all(&mut self, value: bool) {
        let fill = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|w| *w = fill);
        self.clear_tail();
    }

    pub fn copy_from(&mut self, other: &Flags) {
        debug_assert_eq!(self.len, other.len);
        self.words.clone_from(&other.words);
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &word)| {
                let mut rest = word;
                std::iter::from_fn(move || {
                    if rest == 0 {
                        return None;
                    }
                    let bit = rest.trailing_zeros() as usize;
                    rest &= rest - 1;
                    Some(word_idx * WORD_BITS + bit)
                })
            })
    }

    fn clear_tail(&mut self) {
        let used = self.len % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

/// The three per-node bit vectors a visible graph works with.
///
/// `visible` drives the index map, `visible_in_branch` is the branch-filter eligibility that
/// collapse/filter state is layered on, and `thick` is the current highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFlags {
    visible: Flags,
    visible_in_branch: Flags,
    thick: Flags,
}

impl GraphFlags {
    pub fn new(visible_in_branch: Flags) -> Self {
        let len = visible_in_branch.len();
        Self {
            visible: visible_in_branch.clone(),
            visible_in_branch,
            thick: Flags::new(len, false),
        }
    }

    pub fn all_visible(len: usize) -> Self {
        Self::new(Flags::new(len, true))
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index)
    }

    pub fn set_visible(&mut self, index: usize, value: bool) -> bool {
        self.visible.set(index, value)
    }

    pub fn is_visible_in_branch(&self, index: usize) -> bool {
        self.visible_in_branch.get(index)
    }

    pub fn is_thick(&self, index: usize) -> bool {
        self.thick.get(index)
    }

    pub fn set_thick(&mut self, index: usize, value: bool) -> bool {
        self.thick.set(index, value)
    }

    pub fn clear_thick(&mut self) {
        self.thick.set_all(false);
    }

    /// Lets a highlight pass read visibility while it rewrites `thick`.
    pub fn visible_and_thick_mut(&mut self) -> (&Flags, &mut Flags) {
        (&self.visible, &mut self.thick)
    }

    /// Drops all ad-hoc visibility state: `visible` becomes `visible_in_branch` again.
    pub fn reset_visible(&mut self) {
        self.visible.copy_from(&self.visible_in_branch);
    }

    pub fn visible(&self) -> &Flags {
        &self.visible
    }

    pub fn visible_in_branch(&self) -> &Flags {
        &self.visible_in_branch
    }

    pub fn thick(&self) -> &Flags {
        &self.thick
    }
}
