use super::Lit;

/// Vec wrapper indexed by [`Lit`].
///
/// The two literals of a variable occupy adjacent slots, positive first.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LitVec<T>(Vec<T>);

impl<T> LitVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }
}

impl<T: Clone> LitVec<T> {
    /// Grow so that `l` is a valid index.
    pub fn expand(&mut self, l: Lit, val: T) {
        let len = l.index() + 1;
        if len > self.0.len() {
            self.0.resize(len, val)
        }
    }
}

impl<T> Default for LitVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
